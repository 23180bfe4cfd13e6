//! CloudFormation control plane

use crate::{api_error, to_chrono};
use async_trait::async_trait;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::client::Waiters;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::operation::describe_change_set::DescribeChangeSetOutput;
use aws_sdk_cloudformation::types::{Capability as SdkCapability, StackEvent as SdkStackEvent};
use serde_json::json;
use stackflow_cloud::{
    Capability, ChangeSetDetail, ChangeSetSummary, CloudError, ControlPlane,
    CreateChangeSetRequest, Result, StackEvent, TemplateSource,
};
use std::time::Duration;

/// CloudFormation client
pub struct CloudFormation {
    client: Client,
    max_wait: Duration,
}

impl CloudFormation {
    pub fn new(client: Client, max_wait: Duration) -> Self {
        Self { client, max_wait }
    }
}

fn sdk_capability(capability: Capability) -> SdkCapability {
    match capability {
        Capability::Iam => SdkCapability::CapabilityIam,
        Capability::NamedIam => SdkCapability::CapabilityNamedIam,
    }
}

fn waiter_error<E: std::error::Error>(stack: &str, err: E) -> CloudError {
    CloudError::WaiterFailed(format!("[{}] {}", stack, DisplayErrorContext(err)))
}

/// Structured view of a describe-change-set response
fn change_set_json(output: &DescribeChangeSetOutput) -> serde_json::Value {
    let changes: Vec<serde_json::Value> = output
        .changes()
        .iter()
        .map(|change| {
            json!({
                "Type": change.r#type().map(|t| t.as_str()),
                "ResourceChange": change.resource_change().map(|rc| json!({
                    "Action": rc.action().map(|a| a.as_str()),
                    "LogicalResourceId": rc.logical_resource_id(),
                    "PhysicalResourceId": rc.physical_resource_id(),
                    "ResourceType": rc.resource_type(),
                    "Replacement": rc.replacement().map(|r| r.as_str()),
                })),
            })
        })
        .collect();

    let capabilities: Vec<&str> = output.capabilities().iter().map(|c| c.as_str()).collect();

    json!({
        "ChangeSetName": output.change_set_name(),
        "ChangeSetId": output.change_set_id(),
        "StackName": output.stack_name(),
        "StackId": output.stack_id(),
        "Description": output.description(),
        "Status": output.status().map(|s| s.as_str()),
        "StatusReason": output.status_reason(),
        "ExecutionStatus": output.execution_status().map(|s| s.as_str()),
        "CreationTime": output.creation_time().and_then(to_chrono).map(|t| t.to_rfc3339()),
        "Capabilities": capabilities,
        "Changes": changes,
    })
}

/// Missing stacks surface as a ValidationError, not a typed variant
fn is_missing_stack<E, R>(err: &SdkError<E, R>) -> bool
where
    E: ProvideErrorMetadata,
{
    err.as_service_error()
        .and_then(|se| se.message())
        .map(|m| m.contains("does not exist"))
        .unwrap_or(false)
}

fn stack_event(event: &SdkStackEvent) -> Option<StackEvent> {
    Some(StackEvent {
        event_id: event.event_id()?.to_string(),
        timestamp: to_chrono(event.timestamp()?)?,
        logical_resource_id: event.logical_resource_id().map(str::to_string),
        resource_type: event.resource_type().map(str::to_string),
        resource_status: event.resource_status().map(|s| s.as_str().to_string()),
        status_reason: event.resource_status_reason().map(str::to_string),
    })
}

#[async_trait]
impl ControlPlane for CloudFormation {
    fn name(&self) -> &str {
        "cloudformation"
    }

    async fn create_change_set(&self, request: &CreateChangeSetRequest) -> Result<()> {
        let mut call = self
            .client
            .create_change_set()
            .stack_name(&request.stack_name)
            .change_set_name(&request.change_set_name);

        call = match request.template {
            TemplateSource::Body(ref body) => call.template_body(body),
            TemplateSource::Url(ref url) => call.template_url(url),
        };

        for capability in &request.capabilities {
            call = call.capabilities(sdk_capability(*capability));
        }

        tracing::debug!(
            "Calling [CreateChangeSet] for [{}/{}]",
            request.stack_name,
            request.change_set_name
        );
        call.send().await.map_err(api_error)?;
        Ok(())
    }

    async fn describe_change_set(&self, stack: &str, change_set: &str) -> Result<ChangeSetDetail> {
        let output = self
            .client
            .describe_change_set()
            .stack_name(stack)
            .change_set_name(change_set)
            .send()
            .await
            .map_err(|e| {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_change_set_not_found_exception())
                    .unwrap_or(false);
                if not_found {
                    CloudError::ChangeSetNotFound(format!("{}/{}", stack, change_set))
                } else {
                    api_error(e)
                }
            })?;

        Ok(ChangeSetDetail {
            change_set_name: output
                .change_set_name()
                .unwrap_or(change_set)
                .to_string(),
            stack_name: output.stack_name().unwrap_or(stack).to_string(),
            status: output
                .status()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            execution_status: output.execution_status().map(|s| s.as_str().to_string()),
            status_reason: output.status_reason().map(str::to_string),
            creation_time: output.creation_time().and_then(to_chrono),
            raw: change_set_json(&output),
        })
    }

    async fn list_change_sets(&self, stack: &str) -> Result<Vec<ChangeSetSummary>> {
        let mut summaries = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_change_sets()
                .stack_name(stack)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(api_error)?;

            summaries.extend(output.summaries().iter().map(|s| ChangeSetSummary {
                change_set_name: s.change_set_name().unwrap_or_default().to_string(),
                status: s.status().map(|v| v.as_str().to_string()),
                execution_status: s.execution_status().map(|v| v.as_str().to_string()),
                creation_time: s.creation_time().and_then(to_chrono),
            }));

            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        Ok(summaries)
    }

    async fn execute_change_set(&self, stack: &str, change_set: &str) -> Result<()> {
        self.client
            .execute_change_set()
            .stack_name(stack)
            .change_set_name(change_set)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn delete_change_set(&self, stack: &str, change_set: &str) -> Result<()> {
        self.client
            .delete_change_set()
            .stack_name(stack)
            .change_set_name(change_set)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn delete_stack(&self, stack: &str) -> Result<()> {
        self.client
            .delete_stack()
            .stack_name(stack)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn wait_until_stack_update_complete(&self, stack: &str) -> Result<()> {
        tracing::debug!(
            "Calling [WaitUntilStackUpdateComplete] for [{}] (max {:?})",
            stack,
            self.max_wait
        );
        self.client
            .wait_until_stack_update_complete()
            .stack_name(stack)
            .wait(self.max_wait)
            .await
            .map_err(|e| waiter_error(stack, e))?;
        Ok(())
    }

    async fn wait_until_stack_delete_complete(&self, stack: &str) -> Result<()> {
        tracing::debug!(
            "Calling [WaitUntilStackDeleteComplete] for [{}] (max {:?})",
            stack,
            self.max_wait
        );
        self.client
            .wait_until_stack_delete_complete()
            .stack_name(stack)
            .wait(self.max_wait)
            .await
            .map_err(|e| waiter_error(stack, e))?;
        Ok(())
    }

    async fn fetch_recent_stack_events(&self, stack: &str) -> Result<Vec<StackEvent>> {
        let output = self
            .client
            .describe_stack_events()
            .stack_name(stack)
            .send()
            .await
            .map_err(|e| {
                if is_missing_stack(&e) {
                    CloudError::StackNotFound(stack.to_string())
                } else {
                    api_error(e)
                }
            })?;

        // The API returns newest first
        let mut events: Vec<StackEvent> =
            output.stack_events().iter().filter_map(stack_event).collect();
        events.reverse();
        Ok(events)
    }

    async fn stack_id(&self, stack: &str) -> Result<Option<String>> {
        match self.client.describe_stacks().stack_name(stack).send().await {
            Ok(output) => Ok(output
                .stacks()
                .first()
                .and_then(|s| s.stack_id())
                .map(str::to_string)),
            Err(e) if is_missing_stack(&e) => Ok(None),
            Err(e) => Err(api_error(e)),
        }
    }
}
