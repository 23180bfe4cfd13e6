//! stackflow Core
//!
//! Drives the change-set lifecycle of a remote infrastructure stack and
//! streams stack events while long-running transitions are in flight.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stackflow_core::{ChangeRequest, ConsoleReporter, Orchestrator, Stack};
//!
//! let orchestrator = Orchestrator::new(control_plane, object_store, Arc::new(ConsoleReporter));
//! let stack = Stack::new("web", template).with_bucket("my-bucket");
//!
//! orchestrator.change(&stack, ChangeRequest::Create, "cs1").await?;
//! orchestrator.change(&stack, ChangeRequest::Execute, "cs1").await?;
//! orchestrator.terminate(&stack).await?;
//! ```

pub mod change;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod reporter;
pub mod stack;
pub mod tail;
pub mod template;
pub mod terminate;

pub use change::ChangeRequest;
pub use config::OrchestratorConfig;
pub use error::{RemoteContext, Result, StackError};
pub use orchestrator::Orchestrator;
pub use reporter::{ConsoleReporter, Reporter};
pub use stack::Stack;
pub use tail::{TailCommand, TailHandle, TailSession};
