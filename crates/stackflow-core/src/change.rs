//! Change-set management

use crate::error::{RemoteContext, Result, StackError};
use crate::orchestrator::{Orchestrator, require};
use crate::stack::Stack;
use crate::tail::TailCommand;
use crate::template;
use chrono::Utc;
use stackflow_cloud::{
    ChangeSetDetail, ChangeSetStatus, ChangeSetSummary, CreateChangeSetRequest, TemplateSource,
};
use std::str::FromStr;

/// Change-set sub-operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeRequest {
    Create,
    Execute,
    List,
    Delete,
    Describe,
}

impl FromStr for ChangeRequest {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(ChangeRequest::Create),
            "execute" => Ok(ChangeRequest::Execute),
            "list" => Ok(ChangeRequest::List),
            "rm" | "delete" => Ok(ChangeRequest::Delete),
            "desc" | "describe" => Ok(ChangeRequest::Describe),
            other => Err(StackError::UnknownRequest(other.to_string())),
        }
    }
}

fn target(stack: &Stack, change_set: &str) -> String {
    format!("{}/{}", stack.name, change_set)
}

impl Orchestrator {
    /// Run one change-set sub-operation
    ///
    /// `change_set` is ignored by [`ChangeRequest::List`].
    pub async fn change(
        &self,
        stack: &Stack,
        request: ChangeRequest,
        change_set: &str,
    ) -> Result<()> {
        match request {
            ChangeRequest::Create => self.create_change_set(stack, change_set).await.map(|_| ()),
            ChangeRequest::Execute => self.execute_change_set(stack, change_set).await,
            ChangeRequest::List => self.list_change_sets(stack).await.map(|_| ()),
            ChangeRequest::Delete => self.delete_change_set(stack, change_set).await,
            ChangeRequest::Describe => self.describe_change_set(stack, change_set).await.map(|_| ()),
        }
    }

    /// Create a change-set and poll until the control plane has computed it
    pub async fn create_change_set(
        &self,
        stack: &Stack,
        change_set: &str,
    ) -> Result<ChangeSetStatus> {
        require(&stack.name, "stack name")?;
        require(change_set, "change-set name")?;
        tracing::debug!("Updated template:\n{}", stack.template);

        let source = match stack.bucket.as_deref() {
            Some(bucket) => TemplateSource::Url(self.stage_template(stack, bucket).await?),
            None => TemplateSource::Body(stack.template.clone()),
        };

        let request = CreateChangeSetRequest::new(&stack.name, change_set, source)
            .with_capabilities(template::required_capabilities(&stack.template));

        tracing::debug!(
            "Calling [CreateChangeSet] for [{}] with capabilities [{}]",
            target(stack, change_set),
            request
                .capabilities
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.control_plane
            .create_change_set(&request)
            .await
            .remote("CreateChangeSet", &target(stack, change_set))?;

        self.poll_change_set(stack, change_set).await
    }

    /// Upload the template to `bucket`, creating the bucket when needed
    async fn stage_template(&self, stack: &Stack, bucket: &str) -> Result<String> {
        let exists = match self.object_store.bucket_exists(bucket).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!("Received error when checking if [{}] exists: {}", bucket, e);
                false
            }
        };

        if !exists {
            tracing::info!("Creating bucket [{}]", bucket);
            self.object_store
                .create_bucket(bucket)
                .await
                .remote("CreateBucket", bucket)?;
            self.reporter.bucket_created(bucket);
        }

        let key = template::template_key(&stack.name, Utc::now());
        let url = self
            .object_store
            .put_object(bucket, &key, &stack.template)
            .await
            .remote("PutObject", &format!("{}/{}", bucket, key))?;

        tracing::debug!("Template for [{}] staged at {}", stack.name, url);
        Ok(url)
    }

    async fn poll_change_set(&self, stack: &Stack, change_set: &str) -> Result<ChangeSetStatus> {
        let target = target(stack, change_set);

        loop {
            let detail = self
                .control_plane
                .describe_change_set(&stack.name, change_set)
                .await
                .remote("DescribeChangeSet", &target)?;

            self.reporter
                .change_set_status(&stack.name, change_set, &detail.status);

            let unexpected = || StackError::UnexpectedStatus {
                stack: stack.name.clone(),
                change_set: change_set.to_string(),
                status: detail.status.clone(),
            };

            match ChangeSetStatus::from_api(&detail.status).ok_or_else(unexpected)? {
                ChangeSetStatus::CreateComplete => {
                    tracing::info!("[{}] reached {}", target, ChangeSetStatus::CreateComplete);
                    return Ok(ChangeSetStatus::CreateComplete);
                }
                ChangeSetStatus::Failed => {
                    return Err(StackError::ChangeSetFailed {
                        stack: stack.name.clone(),
                        change_set: change_set.to_string(),
                        reason: detail
                            .status_reason
                            .clone()
                            .unwrap_or_else(|| "no reason given".to_string()),
                    });
                }
                ChangeSetStatus::Pending | ChangeSetStatus::InProgress => {}
                ChangeSetStatus::ExecuteComplete | ChangeSetStatus::Deleted => {
                    return Err(unexpected());
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Execute a change-set, tailing stack events until the update settles
    pub async fn execute_change_set(&self, stack: &Stack, change_set: &str) -> Result<()> {
        require(&stack.name, "stack name")?;
        require(change_set, "change-set name")?;

        let tail = self
            .start_tail(&stack.name, None, TailCommand::Update)
            .await;

        if let Err(e) = self
            .control_plane
            .execute_change_set(&stack.name, change_set)
            .await
        {
            tail.stop().await;
            return Err(StackError::remote(
                "ExecuteChangeSet",
                target(stack, change_set),
                e,
            ));
        }

        tracing::debug!("Calling [WaitUntilStackUpdateComplete] for [{}]", stack.name);
        let waited = self
            .control_plane
            .wait_until_stack_update_complete(&stack.name)
            .await;

        tail.stop().await;
        waited.remote("WaitUntilStackUpdateComplete", &stack.name)?;

        self.reporter.stack_updated(&stack.name);
        Ok(())
    }

    pub async fn list_change_sets(&self, stack: &Stack) -> Result<Vec<ChangeSetSummary>> {
        require(&stack.name, "stack name")?;

        let summaries = self
            .control_plane
            .list_change_sets(&stack.name)
            .await
            .remote("ListChangeSets", &stack.name)?;

        for summary in &summaries {
            self.reporter.change_set_summary(&stack.name, summary);
        }
        Ok(summaries)
    }

    pub async fn delete_change_set(&self, stack: &Stack, change_set: &str) -> Result<()> {
        require(&stack.name, "stack name")?;
        require(change_set, "change-set name")?;

        self.control_plane
            .delete_change_set(&stack.name, change_set)
            .await
            .remote("DeleteChangeSet", &target(stack, change_set))?;

        self.reporter.change_set_deleted(&stack.name, change_set);
        Ok(())
    }

    /// Describe a change-set, emitting the full response as indented JSON
    pub async fn describe_change_set(
        &self,
        stack: &Stack,
        change_set: &str,
    ) -> Result<ChangeSetDetail> {
        require(&stack.name, "stack name")?;
        require(change_set, "change-set name")?;

        let detail = self
            .control_plane
            .describe_change_set(&stack.name, change_set)
            .await
            .remote("DescribeChangeSet", &target(stack, change_set))?;

        let rendered = serde_json::to_string_pretty(&detail.raw)?;
        self.reporter.change_set_detail(&rendered);
        Ok(detail)
    }
}
