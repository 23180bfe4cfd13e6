//! Client trait definitions

use crate::error::Result;
use crate::model::{ChangeSetDetail, ChangeSetSummary, CreateChangeSetRequest, StackEvent};
use async_trait::async_trait;

/// Declarative-infrastructure control plane
///
/// Implementations own their session and credentials. None of these calls is
/// retried by the orchestrators; retry policy belongs to the implementation.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Returns the provider name (e.g., "cloudformation")
    fn name(&self) -> &str;

    async fn create_change_set(&self, request: &CreateChangeSetRequest) -> Result<()>;

    async fn describe_change_set(&self, stack: &str, change_set: &str)
    -> Result<ChangeSetDetail>;

    async fn list_change_sets(&self, stack: &str) -> Result<Vec<ChangeSetSummary>>;

    async fn execute_change_set(&self, stack: &str, change_set: &str) -> Result<()>;

    async fn delete_change_set(&self, stack: &str, change_set: &str) -> Result<()>;

    async fn delete_stack(&self, stack: &str) -> Result<()>;

    /// Block until the stack reaches a terminal update status
    async fn wait_until_stack_update_complete(&self, stack: &str) -> Result<()>;

    /// Block until the stack reaches a terminal delete status
    async fn wait_until_stack_delete_complete(&self, stack: &str) -> Result<()>;

    /// Recent stack events, oldest first
    ///
    /// `stack` is a name or a unique stack id. Deleted stacks are only
    /// reachable by id; asking by name then fails with
    /// [`CloudError::StackNotFound`](crate::CloudError::StackNotFound).
    async fn fetch_recent_stack_events(&self, stack: &str) -> Result<Vec<StackEvent>>;

    /// Unique id of a live stack, `None` when no such stack exists
    async fn stack_id(&self, stack: &str) -> Result<Option<String>>;
}

/// Object store used to stage templates too large to inline
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    async fn create_bucket(&self, bucket: &str) -> Result<()>;

    /// Store `body` under `key` and return its URL
    async fn put_object(&self, bucket: &str, key: &str, body: &str) -> Result<String>;
}
