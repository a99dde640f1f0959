use thiserror::Error;

/// Failures reported by the user directory when changing group membership.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("User pool not found: {0}")]
    DirectoryNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Throttled: {0}")]
    Throttled(String),

    #[error("Directory service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unexpected directory error: {0}")]
    Unexpected(String),
}

impl DirectoryError {
    /// Whether the failure is a transient condition on the service side.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DirectoryError::Throttled(_) | DirectoryError::ServiceUnavailable(_)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type AssignResult<T> = Result<T, AssignError>;
