use capacity::{ProjectId, ResourceId, ValidationError};
use thiserror::Error;

/// Errors that can occur during allocation operations.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("resource not found: {0}")]
    ResourceNotFound(ResourceId),
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Storage refused the write because of dependent or duplicate rows.
    #[error("{0}")]
    ConstraintViolation(String),
    #[error("{0}")]
    Storage(String),
}

impl AllocationError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::ConstraintViolation(msg.into())
    }

    /// Replaces the storage message of a constraint violation with one
    /// meant for the person who asked for the change.
    pub fn with_constraint_message(self, msg: impl Into<String>) -> Self {
        match self {
            Self::ConstraintViolation(_) => Self::ConstraintViolation(msg.into()),
            other => other,
        }
    }
}
