//! stackflow Cloud Abstraction
//!
//! This crate defines the narrow interfaces stackflow uses to talk to a
//! declarative-infrastructure control plane and to an object store, together
//! with the data types that cross those interfaces.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 stackflow CLI                    │
//! │          (change / terminate commands)           │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                stackflow-core                    │
//! │   Orchestrator ── Tailer ── TailHandle (stop)    │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               stackflow-cloud                    │
//! │  trait ControlPlane { ... }                      │
//! │  trait ObjectStore  { ... }                      │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │             stackflow-cloud-aws                  │
//! │       CloudFormation  /  S3 (aws-sdk)            │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod model;
pub mod provider;

// Re-exports
pub use error::{CloudError, Result};
pub use model::{
    Capability, ChangeSetDetail, ChangeSetStatus, ChangeSetSummary, CreateChangeSetRequest,
    StackEvent, TemplateSource,
};
pub use provider::{ControlPlane, ObjectStore};
