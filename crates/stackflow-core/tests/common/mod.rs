#![allow(dead_code)]

use async_trait::async_trait;
use stackflow_cloud::{
    ChangeSetDetail, ChangeSetSummary, CloudError, ControlPlane, CreateChangeSetRequest,
    ObjectStore, StackEvent,
};
use stackflow_core::{Orchestrator, OrchestratorConfig, Reporter};
use chrono::{DateTime, Utc};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Unique id the fake assigns to every existing stack
pub const STACK_ID: &str = "arn:aws:cloudformation:us-east-1:123456789012:stack/web/1";

pub fn event(id: &str, at: DateTime<Utc>, logical_id: &str, status: &str) -> StackEvent {
    StackEvent {
        logical_resource_id: Some(logical_id.to_string()),
        resource_status: Some(status.to_string()),
        ..StackEvent::new(id, at)
    }
}

/// Ordered record of every call made against the fakes and the reporter
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.position(entry).is_some()
    }
}

/// Calls that change remote state
pub const MUTATING_CALLS: &[&str] = &[
    "create_change_set",
    "execute_change_set",
    "delete_change_set",
    "delete_stack",
];

pub struct FakeControlPlane {
    journal: Journal,
    statuses: Mutex<VecDeque<String>>,
    status_reason: Option<String>,
    prior_events: Vec<StackEvent>,
    events: Vec<StackEvent>,
    /// Set by the first successful execute or delete-stack call
    mutated: AtomicBool,
    missing_after_delete: bool,
    summaries: Vec<ChangeSetSummary>,
    exists: bool,
    failing: HashSet<&'static str>,
    wait_delay: Duration,
    pub requests: Mutex<Vec<CreateChangeSetRequest>>,
    /// Target of every event fetch, in call order
    pub fetched_for: Mutex<Vec<String>>,
}

impl FakeControlPlane {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            statuses: Mutex::new(VecDeque::from(vec!["CREATE_COMPLETE".to_string()])),
            status_reason: None,
            prior_events: Vec::new(),
            events: Vec::new(),
            mutated: AtomicBool::new(false),
            missing_after_delete: false,
            summaries: Vec::new(),
            exists: true,
            failing: HashSet::new(),
            wait_delay: Duration::from_millis(0),
            requests: Mutex::new(Vec::new()),
            fetched_for: Mutex::new(Vec::new()),
        }
    }

    /// Statuses returned by successive describe calls; the last one repeats
    pub fn with_statuses(mut self, statuses: &[&str]) -> Self {
        self.statuses = Mutex::new(statuses.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_status_reason(mut self, reason: &str) -> Self {
        self.status_reason = Some(reason.to_string());
        self
    }

    /// Events already on the stack before anything is executed or deleted
    pub fn with_prior_events(mut self, events: Vec<StackEvent>) -> Self {
        self.prior_events = events;
        self
    }

    /// Events that appear once a change-set is executed or the stack deleted
    pub fn with_events(mut self, events: Vec<StackEvent>) -> Self {
        self.events = events;
        self
    }

    /// After deletion, every event fetch fails with StackNotFound
    pub fn missing_after_delete(mut self) -> Self {
        self.missing_after_delete = true;
        self
    }

    pub fn with_summaries(mut self, summaries: Vec<ChangeSetSummary>) -> Self {
        self.summaries = summaries;
        self
    }

    pub fn without_stack(mut self) -> Self {
        self.exists = false;
        self
    }

    pub fn failing(mut self, call: &'static str) -> Self {
        self.failing.insert(call);
        self
    }

    pub fn with_wait_delay(mut self, delay: Duration) -> Self {
        self.wait_delay = delay;
        self
    }

    fn call(&self, name: &'static str) -> stackflow_cloud::Result<()> {
        self.journal.push(name);
        if self.failing.contains(name) {
            return Err(CloudError::ApiError(format!("{} rejected", name)));
        }
        Ok(())
    }

    async fn wait(&self, name: &'static str) -> stackflow_cloud::Result<()> {
        self.journal.push(format!("{}:start", name));
        tokio::time::sleep(self.wait_delay).await;
        self.journal.push(format!("{}:done", name));
        if self.failing.contains(name) {
            return Err(CloudError::WaiterFailed(format!("{} ended in a failure state", name)));
        }
        Ok(())
    }
}

#[async_trait]
impl ControlPlane for FakeControlPlane {
    fn name(&self) -> &str {
        "fake"
    }

    async fn create_change_set(&self, request: &CreateChangeSetRequest) -> stackflow_cloud::Result<()> {
        self.call("create_change_set")?;
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn describe_change_set(
        &self,
        stack: &str,
        change_set: &str,
    ) -> stackflow_cloud::Result<ChangeSetDetail> {
        self.call("describe_change_set")?;

        let status = {
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.len() > 1 {
                statuses.pop_front().unwrap()
            } else {
                statuses.front().cloned().unwrap()
            }
        };

        Ok(ChangeSetDetail {
            change_set_name: change_set.to_string(),
            stack_name: stack.to_string(),
            status: status.clone(),
            execution_status: Some("AVAILABLE".to_string()),
            status_reason: self.status_reason.clone(),
            creation_time: None,
            raw: serde_json::json!({
                "ChangeSetName": change_set,
                "StackName": stack,
                "Status": status,
            }),
        })
    }

    async fn list_change_sets(&self, _stack: &str) -> stackflow_cloud::Result<Vec<ChangeSetSummary>> {
        self.call("list_change_sets")?;
        Ok(self.summaries.clone())
    }

    async fn execute_change_set(&self, _stack: &str, _change_set: &str) -> stackflow_cloud::Result<()> {
        self.call("execute_change_set")?;
        self.mutated.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_change_set(&self, _stack: &str, _change_set: &str) -> stackflow_cloud::Result<()> {
        self.call("delete_change_set")
    }

    async fn delete_stack(&self, _stack: &str) -> stackflow_cloud::Result<()> {
        self.call("delete_stack")?;
        self.mutated.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn wait_until_stack_update_complete(&self, _stack: &str) -> stackflow_cloud::Result<()> {
        self.wait("wait_update").await
    }

    async fn wait_until_stack_delete_complete(&self, _stack: &str) -> stackflow_cloud::Result<()> {
        self.wait("wait_delete").await
    }

    async fn fetch_recent_stack_events(&self, stack: &str) -> stackflow_cloud::Result<Vec<StackEvent>> {
        // Not journaled: the tailer polls at its own pace
        self.fetched_for.lock().unwrap().push(stack.to_string());
        if self.failing.contains("fetch_events") {
            return Err(CloudError::ApiError("Throttling: Rate exceeded".to_string()));
        }

        let mutated = self.mutated.load(Ordering::SeqCst);
        let deleted = mutated && self.journal.contains("delete_stack");
        // Deleted stacks are only reachable by id
        if deleted && (self.missing_after_delete || stack != STACK_ID) {
            return Err(CloudError::StackNotFound(stack.to_string()));
        }

        let mut events = self.prior_events.clone();
        if mutated {
            events.extend(self.events.iter().cloned());
        }
        Ok(events)
    }

    async fn stack_id(&self, _stack: &str) -> stackflow_cloud::Result<Option<String>> {
        self.call("describe_stack")?;
        Ok(self.exists.then(|| STACK_ID.to_string()))
    }
}

pub struct FakeObjectStore {
    journal: Journal,
    exists: Option<bool>,
    fail_create: bool,
    pub objects: Mutex<Vec<(String, String, String)>>,
}

impl FakeObjectStore {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            exists: Some(true),
            fail_create: false,
            objects: Mutex::new(Vec::new()),
        }
    }

    pub fn without_bucket(mut self) -> Self {
        self.exists = Some(false);
        self
    }

    /// Existence check returns an error
    pub fn with_unreadable_bucket(mut self) -> Self {
        self.exists = None;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn bucket_exists(&self, _bucket: &str) -> stackflow_cloud::Result<bool> {
        self.journal.push("bucket_exists");
        self.exists
            .ok_or_else(|| CloudError::ApiError("AccessDenied".to_string()))
    }

    async fn create_bucket(&self, _bucket: &str) -> stackflow_cloud::Result<()> {
        self.journal.push("create_bucket");
        if self.fail_create {
            return Err(CloudError::ApiError("BucketAlreadyExists".to_string()));
        }
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: &str) -> stackflow_cloud::Result<String> {
        self.journal.push("put_object");
        self.objects
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string(), body.to_string()));
        Ok(format!("https://{}.s3.amazonaws.com/{}", bucket, key))
    }
}

/// Reporter keeping everything it is told
#[derive(Default)]
pub struct RecordingReporter {
    journal: Journal,
    pub statuses: Mutex<Vec<String>>,
    pub events: Mutex<Vec<(String, String)>>,
    pub summaries: Mutex<Vec<String>>,
    pub details: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Default::default()
        }
    }

    pub fn printed_event_ids(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, id)| id.clone())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn change_set_status(&self, _stack: &str, _change_set: &str, status: &str) {
        self.statuses.lock().unwrap().push(status.to_string());
    }

    fn change_set_summary(&self, _stack: &str, summary: &ChangeSetSummary) {
        self.summaries
            .lock()
            .unwrap()
            .push(summary.change_set_name.clone());
    }

    fn change_set_deleted(&self, _stack: &str, change_set: &str) {
        self.journal.push(format!("deleted:{}", change_set));
    }

    fn change_set_detail(&self, rendered: &str) {
        self.details.lock().unwrap().push(rendered.to_string());
    }

    fn bucket_created(&self, bucket: &str) {
        self.journal.push(format!("bucket_created:{}", bucket));
    }

    fn stack_event(&self, _stack: &str, command: &str, event: &StackEvent) {
        self.events
            .lock()
            .unwrap()
            .push((command.to_string(), event.event_id.clone()));
    }

    fn tail_stopped(&self, _stack: &str, command: &str, _printed: usize) {
        self.journal.push(format!("tail_stopped:{}", command));
    }

    fn stack_updated(&self, stack: &str) {
        self.journal.push(format!("updated:{}", stack));
    }

    fn stack_deleted(&self, stack: &str) {
        self.journal.push(format!("deleted_stack:{}", stack));
    }

    fn stack_missing(&self, stack: &str) {
        self.journal.push(format!("missing:{}", stack));
    }
}

pub struct Harness {
    pub journal: Journal,
    pub control_plane: Arc<FakeControlPlane>,
    pub object_store: Arc<FakeObjectStore>,
    pub reporter: Arc<RecordingReporter>,
    pub orchestrator: Orchestrator,
}

impl Harness {
    pub fn new(
        journal: Journal,
        control_plane: FakeControlPlane,
        object_store: FakeObjectStore,
    ) -> Self {
        let control_plane = Arc::new(control_plane);
        let object_store = Arc::new(object_store);
        let reporter = Arc::new(RecordingReporter::new(journal.clone()));

        let orchestrator = Orchestrator::new(
            control_plane.clone(),
            object_store.clone(),
            reporter.clone(),
        )
        .with_config(
            OrchestratorConfig::new()
                .with_poll_interval(Duration::from_millis(1))
                .with_tail_interval(Duration::from_millis(5)),
        );

        Self {
            journal,
            control_plane,
            object_store,
            reporter,
            orchestrator,
        }
    }

    pub fn mutating_calls(&self) -> usize {
        MUTATING_CALLS
            .iter()
            .map(|call| self.journal.count(call))
            .sum()
    }
}
