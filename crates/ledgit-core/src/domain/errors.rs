//! Domain error types
//!
//! Validation failures for user-supplied configuration. Invalid state
//! transitions are not errors anywhere in the domain; they are documented
//! no-ops handled by the transition function itself.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Personal access token is empty or blank
    #[error("Invalid token: must not be empty")]
    InvalidToken,

    /// Repository slug does not match the `owner/name` pattern
    #[error("Invalid repository '{0}': expected owner/name")]
    InvalidRepo(String),

    /// Branch name is empty or contains an empty path segment
    #[error("Invalid branch '{0}'")]
    InvalidBranch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::InvalidToken.to_string(),
            "Invalid token: must not be empty"
        );

        let err = DomainError::InvalidRepo("nodash".to_string());
        assert_eq!(err.to_string(), "Invalid repository 'nodash': expected owner/name");

        let err = DomainError::InvalidBranch("a//b".to_string());
        assert_eq!(err.to_string(), "Invalid branch 'a//b'");
    }

    #[test]
    fn test_error_equality() {
        let err1 = DomainError::InvalidBranch("a//b".to_string());
        let err2 = DomainError::InvalidBranch("a//b".to_string());
        let err3 = DomainError::InvalidBranch("other".to_string());

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
