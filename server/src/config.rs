use anyhow::Result;

/// Environment-driven server configuration. The verification and
/// notification endpoints default to the hosted third-party APIs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub email_validation_url: String,
    pub department_verification_url: String,
    pub notification_url: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let email_validation_url = env_or("EMAIL_VALIDATION_URL", "https://api.emailvalidation.com");
        let department_verification_url = env_or(
            "DEPARTMENT_VERIFICATION_URL",
            "https://api.departmentverification.com",
        );
        let notification_url = env_or("NOTIFICATION_URL", "https://api.emailservice.com/send");

        Ok(Self {
            cors_allowed_origins,
            email_validation_url,
            department_verification_url,
            notification_url,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
