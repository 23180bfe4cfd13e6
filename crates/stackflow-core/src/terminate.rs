//! Stack termination

use crate::error::{RemoteContext, Result, StackError};
use crate::orchestrator::{Orchestrator, require};
use crate::stack::Stack;
use crate::tail::TailCommand;

impl Orchestrator {
    /// Delete a stack, tailing its events until deletion settles
    ///
    /// Deleting a stack that does not exist succeeds without issuing any
    /// mutating call.
    pub async fn terminate(&self, stack: &Stack) -> Result<()> {
        require(&stack.name, "stack name")?;
        tracing::debug!("terminate called for: [{}]", stack.name);

        let stack_id = self
            .control_plane
            .stack_id(&stack.name)
            .await
            .remote("DescribeStacks", &stack.name)?;

        let Some(stack_id) = stack_id else {
            tracing::info!("{}: does not exist...", stack.name);
            self.reporter.stack_missing(&stack.name);
            return Ok(());
        };

        // Once deleted, the stack's events are only reachable by id
        let tail = self
            .start_tail(&stack.name, Some(&stack_id), TailCommand::Delete)
            .await;

        tracing::debug!("Calling [DeleteStack] for [{}]", stack.name);
        if let Err(e) = self.control_plane.delete_stack(&stack.name).await {
            tail.stop().await;
            return Err(StackError::remote("DeleteStack", &stack.name, e));
        }

        let waited = self
            .control_plane
            .wait_until_stack_delete_complete(&stack.name)
            .await;

        tail.stop().await;
        waited.remote("WaitUntilStackDeleteComplete", &stack.name)?;

        tracing::info!("deletion successful: [{}]", stack.name);
        self.reporter.stack_deleted(&stack.name);
        Ok(())
    }
}
