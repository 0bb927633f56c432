use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Outbound email-validity check, one blocking call per create.
#[async_trait]
pub trait EmailVerifier: Send + Sync {
    async fn is_valid(&self, email: &str) -> Result<bool>;
}

/// Outbound department-validity check.
#[async_trait]
pub trait DepartmentVerifier: Send + Sync {
    async fn is_valid(&self, department: &str) -> Result<bool>;
}

#[derive(Debug, Deserialize)]
struct VerificationResponse {
    valid: bool,
}

/// Third-party email validation API client.
pub struct HttpEmailVerifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEmailVerifier {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EmailVerifier for HttpEmailVerifier {
    async fn is_valid(&self, email: &str) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/validate", self.base_url))
            .query(&[("email", email)])
            .send()
            .await
            .context("email validation call failed")?
            .error_for_status()
            .context("email validation API returned an error")?
            .json::<VerificationResponse>()
            .await
            .context("email validation response malformed")?;
        Ok(response.valid)
    }
}

/// Third-party department verification API client.
pub struct HttpDepartmentVerifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDepartmentVerifier {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DepartmentVerifier for HttpDepartmentVerifier {
    async fn is_valid(&self, department: &str) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/validate", self.base_url))
            .query(&[("department", department)])
            .send()
            .await
            .context("department verification call failed")?
            .error_for_status()
            .context("department verification API returned an error")?
            .json::<VerificationResponse>()
            .await
            .context("department verification response malformed")?;
        Ok(response.valid)
    }
}
