pub mod change;
pub mod terminate;

use colored::Colorize;
use stackflow_cloud_aws::AwsSession;
use stackflow_config::Settings;
use stackflow_core::{ConsoleReporter, Orchestrator, OrchestratorConfig};
use std::sync::Arc;

/// 接続先 AWS アカウントと設定（CLI フラグ適用済み）
pub struct Target {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub settings: Settings,
}

impl Target {
    /// AWS セッションを読み込み、コンソール出力付きの Orchestrator を組み立てる
    pub async fn connect(&self) -> Orchestrator {
        let session = AwsSession::load(self.region.as_deref(), self.profile.as_deref()).await;
        match session.region() {
            Some(region) => println!("リージョン: {}", region.cyan()),
            None => tracing::debug!("No AWS region resolved; relying on the SDK default"),
        }
        tracing::debug!(
            "Waiter ceiling: {:?}, poll: {:?}, tail: {:?}",
            self.settings.wait_timeout(),
            self.settings.poll_interval(),
            self.settings.tail_interval()
        );

        let config = OrchestratorConfig::new()
            .with_poll_interval(self.settings.poll_interval())
            .with_tail_interval(self.settings.tail_interval());

        Orchestrator::new(
            Arc::new(session.cloudformation(self.settings.wait_timeout())),
            Arc::new(session.s3()),
            Arc::new(ConsoleReporter),
        )
        .with_config(config)
    }
}
