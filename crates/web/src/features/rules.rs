use crate::error::{ServiceError, ServiceResult};

/// Trim a required text field, rejecting blank input with `message`.
pub fn required_text(value: &str, message: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(message));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field. Blank input becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Trim a text field supplied in a partial update.
///
/// An empty string is kept so the storage layer clears the column.
pub fn clearable_text(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Lowercase and check an email address.
pub fn normalize_email(value: &str, message: &str) -> ServiceResult<String> {
    let email = required_text(value, message)?.to_lowercase();
    if !email.contains('@') {
        return Err(ServiceError::validation("Email is not a valid address"));
    }
    Ok(email)
}
