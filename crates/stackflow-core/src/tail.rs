//! Stack event tailing
//!
//! A [`TailSession`] is spawned onto the runtime and handed back as a
//! [`TailHandle`]. The handle owns the only sender of a oneshot stop channel;
//! [`TailHandle::stop`] consumes it, so a session can be stopped at most once.
//! Stopping waits for the tailer task to finish, which means no event line can
//! be printed after the orchestrator has returned.
//!
//! Events that already existed before the operation are passed in as a
//! baseline and never printed. The baseline comes from the control plane
//! itself, so local clock skew cannot hide new events.

use crate::reporter::Reporter;
use stackflow_cloud::{CloudError, ControlPlane, StackEvent};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Command whose progress is being tailed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailCommand {
    Update,
    Delete,
}

impl TailCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TailCommand::Update => "UPDATE",
            TailCommand::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for TailCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one tailing run
#[derive(Debug)]
pub struct TailSession {
    /// Stack name, as shown to the user
    stack: String,

    /// Name or unique id passed to the event fetch
    source: String,

    command: TailCommand,
    interval: Duration,

    /// Event ids already handled, printed or not
    seen: HashSet<String>,
}

impl TailSession {
    pub fn new(stack: impl Into<String>, command: TailCommand, interval: Duration) -> Self {
        let stack = stack.into();
        Self {
            source: stack.clone(),
            stack,
            command,
            interval,
            seen: HashSet::new(),
        }
    }

    /// Fetch events by unique stack id instead of by name
    pub fn with_stack_id(mut self, stack_id: impl Into<String>) -> Self {
        self.source = stack_id.into();
        self
    }

    /// Mark events that predate the operation as already seen
    pub fn with_baseline(mut self, events: impl IntoIterator<Item = StackEvent>) -> Self {
        self.seen.extend(events.into_iter().map(|event| event.event_id));
        self
    }

    /// Filter `events` down to the ones not handled yet, marking them seen
    pub fn take_unseen(&mut self, events: Vec<StackEvent>) -> Vec<StackEvent> {
        events
            .into_iter()
            .filter(|event| self.seen.insert(event.event_id.clone()))
            .collect()
    }

    /// Start tailing in the background
    pub fn spawn(
        self,
        control_plane: Arc<dyn ControlPlane>,
        reporter: Arc<dyn Reporter>,
    ) -> TailHandle {
        let (stop_tx, stop_rx) = oneshot::channel();
        let command = self.command;
        tracing::debug!("Tailing [{}] for {} via [{}]", self.stack, command, self.source);

        let task = tokio::spawn(self.run(control_plane, reporter, stop_rx));

        TailHandle {
            command,
            stop: stop_tx,
            task,
        }
    }

    async fn run(
        mut self,
        control_plane: Arc<dyn ControlPlane>,
        reporter: Arc<dyn Reporter>,
        mut stop: oneshot::Receiver<()>,
    ) -> usize {
        let mut printed = 0;
        // Set once the stack is gone; nothing more can be fetched
        let mut ended = false;

        loop {
            if !ended {
                // A closed channel (handle dropped) counts as a stop
                let fetched = tokio::select! {
                    biased;
                    _ = &mut stop => break,
                    fetched = control_plane.fetch_recent_stack_events(&self.source) => fetched,
                };

                match fetched {
                    Ok(events) => {
                        for event in self.take_unseen(events) {
                            reporter.stack_event(&self.stack, self.command.as_str(), &event);
                            printed += 1;
                        }
                    }
                    Err(CloudError::StackNotFound(_)) => {
                        tracing::debug!("[{}] no longer has events to fetch", self.stack);
                        ended = true;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to fetch events for [{}]: {}", self.stack, e);
                    }
                }
            }

            tokio::select! {
                biased;
                _ = &mut stop => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        reporter.tail_stopped(&self.stack, self.command.as_str(), printed);
        printed
    }
}

/// Owner of a running tailer
#[derive(Debug)]
pub struct TailHandle {
    command: TailCommand,
    stop: oneshot::Sender<()>,
    task: JoinHandle<usize>,
}

impl TailHandle {
    /// Signal the tailer to stop and wait until it has
    ///
    /// Returns the number of events the tailer printed.
    pub async fn stop(self) -> usize {
        let TailHandle {
            command,
            stop,
            task,
        } = self;

        // Err means the receiver is gone, i.e. the task already exited
        let _ = stop.send(());

        match task.await {
            Ok(printed) => printed,
            Err(e) => {
                tracing::warn!("Tailer for {} ended abnormally: {}", command, e);
                0
            }
        }
    }
}
