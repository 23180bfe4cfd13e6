//! Orchestration error types

use stackflow_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    /// A control plane or object store call failed
    #[error("[{operation}] failed for [{target}]: {source}")]
    Remote {
        operation: &'static str,
        target: String,
        #[source]
        source: CloudError,
    },

    #[error("Change-Set [{change_set}] failed on stack [{stack}]: {reason}")]
    ChangeSetFailed {
        stack: String,
        change_set: String,
        reason: String,
    },

    /// Polling observed a status that cannot lead to CREATE_COMPLETE or FAILED
    #[error("Change-Set [{change_set}] on stack [{stack}] reported unexpected status [{status}]")]
    UnexpectedStatus {
        stack: String,
        change_set: String,
        status: String,
    },

    #[error("Unknown change-set request: {0}")]
    UnknownRequest(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StackError {
    pub fn remote(operation: &'static str, target: impl Into<String>, source: CloudError) -> Self {
        StackError::Remote {
            operation,
            target: target.into(),
            source,
        }
    }

    /// Name of the remote operation that failed, if any
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            StackError::Remote { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Attach the operation name and target to a failed remote call
pub trait RemoteContext<T> {
    fn remote(self, operation: &'static str, target: &str) -> Result<T>;
}

impl<T> RemoteContext<T> for stackflow_cloud::Result<T> {
    fn remote(self, operation: &'static str, target: &str) -> Result<T> {
        self.map_err(|e| StackError::remote(operation, target, e))
    }
}

pub type Result<T> = std::result::Result<T, StackError>;
