//! Shared SDK configuration

use crate::cloudformation::CloudFormation;
use crate::s3::S3Store;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_cloudformation::config::Region;
use std::time::Duration;

/// Resolved AWS configuration shared by every client of one invocation
#[derive(Debug, Clone)]
pub struct AwsSession {
    config: SdkConfig,
}

impl AwsSession {
    /// Load configuration from the default provider chain
    ///
    /// `region` and `profile` override what the environment provides.
    pub async fn load(region: Option<&str>, profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }

        let config = loader.load().await;
        tracing::debug!(
            "Loaded AWS configuration (region: {})",
            config
                .region()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unset".to_string())
        );

        Self { config }
    }

    pub fn region(&self) -> Option<String> {
        self.config.region().map(|r| r.to_string())
    }

    /// CloudFormation client whose waiters give up after `max_wait`
    pub fn cloudformation(&self, max_wait: Duration) -> CloudFormation {
        CloudFormation::new(aws_sdk_cloudformation::Client::new(&self.config), max_wait)
    }

    pub fn s3(&self) -> S3Store {
        S3Store::new(aws_sdk_s3::Client::new(&self.config), self.region())
    }
}
