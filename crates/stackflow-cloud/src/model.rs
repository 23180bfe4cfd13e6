//! Types exchanged with the control plane

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the control plane should read the template from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    /// Template body sent inline with the request
    Body(String),
    /// Template previously uploaded to an object store
    Url(String),
}

/// Capabilities that must be acknowledged when a template touches IAM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "CAPABILITY_IAM")]
    Iam,
    #[serde(rename = "CAPABILITY_NAMED_IAM")]
    NamedIam,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Iam => "CAPABILITY_IAM",
            Capability::NamedIam => "CAPABILITY_NAMED_IAM",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a create-change-set call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChangeSetRequest {
    pub stack_name: String,
    pub change_set_name: String,
    pub template: TemplateSource,
    pub capabilities: Vec<Capability>,
}

impl CreateChangeSetRequest {
    pub fn new(
        stack_name: impl Into<String>,
        change_set_name: impl Into<String>,
        template: TemplateSource,
    ) -> Self {
        Self {
            stack_name: stack_name.into(),
            change_set_name: change_set_name.into(),
            template,
            capabilities: Vec::new(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }
}

/// Lifecycle status of a change-set
///
/// Mirrors the control plane's vocabulary. Strings outside this set are not
/// representable, so callers must decide what an unrecognized value means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeSetStatus {
    /// Accepted, not yet being computed
    Pending,
    /// Diff is being computed
    InProgress,
    /// Diff computed, ready to execute
    CreateComplete,
    /// Diff could not be computed
    Failed,
    /// Change-set has been executed against the stack
    ExecuteComplete,
    /// Change-set has been removed
    Deleted,
}

impl ChangeSetStatus {
    /// Parse a status string as returned by the control plane
    pub fn from_api(status: &str) -> Option<Self> {
        match status {
            "CREATE_PENDING" | "PENDING" => Some(ChangeSetStatus::Pending),
            "CREATE_IN_PROGRESS" => Some(ChangeSetStatus::InProgress),
            "CREATE_COMPLETE" => Some(ChangeSetStatus::CreateComplete),
            "FAILED" => Some(ChangeSetStatus::Failed),
            "EXECUTE_COMPLETE" => Some(ChangeSetStatus::ExecuteComplete),
            "DELETE_COMPLETE" | "DELETED" => Some(ChangeSetStatus::Deleted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeSetStatus::Pending => "CREATE_PENDING",
            ChangeSetStatus::InProgress => "CREATE_IN_PROGRESS",
            ChangeSetStatus::CreateComplete => "CREATE_COMPLETE",
            ChangeSetStatus::Failed => "FAILED",
            ChangeSetStatus::ExecuteComplete => "EXECUTE_COMPLETE",
            ChangeSetStatus::Deleted => "DELETE_COMPLETE",
        }
    }
}

impl std::fmt::Display for ChangeSetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full description of a single change-set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSetDetail {
    pub change_set_name: String,
    pub stack_name: String,

    /// Raw status string; see [`ChangeSetStatus::from_api`]
    pub status: String,

    pub execution_status: Option<String>,
    pub status_reason: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,

    /// Complete response as returned by the control plane
    pub raw: serde_json::Value,
}

/// One entry of a change-set listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSetSummary {
    pub change_set_name: String,
    pub status: Option<String>,
    pub execution_status: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
}

/// A single stack event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEvent {
    /// Stable identifier used for deduplication
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub logical_resource_id: Option<String>,
    pub resource_type: Option<String>,
    pub resource_status: Option<String>,
    pub status_reason: Option<String>,
}

impl StackEvent {
    pub fn new(event_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            event_id: event_id.into(),
            timestamp,
            logical_resource_id: None,
            resource_type: None,
            resource_status: None,
            status_reason: None,
        }
    }
}
