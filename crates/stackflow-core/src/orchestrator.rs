//! Shared orchestrator context

use crate::config::OrchestratorConfig;
use crate::error::{Result, StackError};
use crate::reporter::Reporter;
use crate::tail::{TailCommand, TailHandle, TailSession};
use stackflow_cloud::{CloudError, ControlPlane, ObjectStore};
use std::sync::Arc;

/// Drives change-set and termination operations against one control plane
///
/// Operations are implemented in [`crate::change`] and [`crate::terminate`].
pub struct Orchestrator {
    pub(crate) control_plane: Arc<dyn ControlPlane>,
    pub(crate) object_store: Arc<dyn ObjectStore>,
    pub(crate) reporter: Arc<dyn Reporter>,
    pub(crate) config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        control_plane: Arc<dyn ControlPlane>,
        object_store: Arc<dyn ObjectStore>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        tracing::debug!("Using control plane [{}]", control_plane.name());
        Self {
            control_plane,
            object_store,
            reporter,
            config: OrchestratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Launch a tailer for `stack`; the caller must `stop()` the handle
    ///
    /// Events already present are fetched first and excluded, so only events
    /// caused by the upcoming operation are printed. With `stack_id` the
    /// tailer keeps reaching the stack after it has been deleted.
    pub(crate) async fn start_tail(
        &self,
        stack: &str,
        stack_id: Option<&str>,
        command: TailCommand,
    ) -> TailHandle {
        let source = stack_id.unwrap_or(stack);
        let baseline = match self.control_plane.fetch_recent_stack_events(source).await {
            Ok(events) => events,
            Err(CloudError::StackNotFound(_)) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to fetch existing events for [{}]: {}", stack, e);
                Vec::new()
            }
        };

        let mut session = TailSession::new(stack, command, self.config.tail_interval)
            .with_baseline(baseline);
        if let Some(stack_id) = stack_id {
            session = session.with_stack_id(stack_id);
        }
        session.spawn(self.control_plane.clone(), self.reporter.clone())
    }
}

/// Reject empty identifiers before anything is sent to the control plane
pub(crate) fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StackError::InvalidRequest(format!("{} must not be empty", what)));
    }
    Ok(())
}
