use platform_api::{ApiError, ApiResult};
use serde::Deserialize;

use crate::service::EmployeeInput;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;

/// Raw create-request body. Every field is optional at the decode stage so
/// that an absent field reaches the validation rules (and their messages)
/// instead of failing deserialization.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
}

/// Field validation for the create boundary. Rules run in a fixed order
/// and the first failure wins; the update path deliberately skips this.
pub fn validate_fields(payload: EmployeePayload) -> ApiResult<EmployeeInput> {
    let first_name = validate_name("First name", payload.first_name)?;
    let last_name = validate_name("Last name", payload.last_name)?;
    let email = match payload.email {
        Some(email) if !email.trim().is_empty() => email,
        _ => return Err(ApiError::invalid_input("Email is required")),
    };
    if !is_email_shaped(&email) {
        return Err(ApiError::invalid_input("Email should be valid"));
    }
    let department = match payload.department {
        Some(department) if !department.trim().is_empty() => department,
        _ => return Err(ApiError::invalid_input("Department is required")),
    };
    let Some(salary) = payload.salary else {
        return Err(ApiError::invalid_input("Salary is required"));
    };
    Ok(EmployeeInput {
        first_name,
        last_name,
        email,
        department,
        salary,
    })
}

fn validate_name(field: &str, value: Option<String>) -> ApiResult<String> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Err(ApiError::invalid_input(format!("{field} is required")));
    };
    let len = value.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(ApiError::invalid_input(format!(
            "{field} must be between {NAME_MIN} and {NAME_MAX} characters"
        )));
    }
    Ok(value)
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
/// Validity beyond the shape is the external verifier's call.
fn is_email_shaped(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.split('.').count() >= 2 && !domain.starts_with('.') && !domain.ends_with('.')
}
