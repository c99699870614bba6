//! Shared-secret bearer authentication.

use ingestor_core::AppError;
use subtle::ConstantTimeEq;

const BEARER_PREFIX: &str = "Bearer ";

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check an `Authorization` header value against the configured secret.
///
/// A leading `Bearer ` is stripped when present; the remainder must equal the secret.
pub fn authenticate(auth_header: Option<&str>, secret: &str) -> Result<(), AppError> {
    let Some(auth_header) = auth_header else {
        tracing::warn!("Rejected request without authorization header");
        return Err(AppError::Unauthorized(
            "Missing authorization header".to_string(),
        ));
    };

    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .unwrap_or(auth_header);

    if !secure_compare(token, secret) {
        tracing::warn!("Rejected request with invalid credentials");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_accepted() {
        assert!(authenticate(Some("Bearer s3cret"), "s3cret").is_ok());
    }

    #[test]
    fn test_bare_token_accepted() {
        assert!(authenticate(Some("s3cret"), "s3cret").is_ok());
    }

    #[test]
    fn test_wrong_token_rejected() {
        assert!(matches!(
            authenticate(Some("Bearer nope"), "s3cret"),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            authenticate(Some("Bearer s3cret "), "s3cret"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert!(authenticate(Some("bearer s3cret"), "s3cret").is_err());
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        assert!(matches!(
            authenticate(None, "s3cret"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_secure_compare() {
        assert!(secure_compare("abc", "abc"));
        assert!(!secure_compare("abc", "abd"));
        assert!(!secure_compare("abc", "abcd"));
    }
}
