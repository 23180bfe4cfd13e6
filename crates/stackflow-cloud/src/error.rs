//! Cloud client error types

use thiserror::Error;

/// Errors returned by control plane and object store clients
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Stack not found: {0}")]
    StackNotFound(String),

    #[error("Change-set not found: {0}")]
    ChangeSetNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Waiter failed: {0}")]
    WaiterFailed(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
