//! S3 object store

use crate::api_error;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use stackflow_cloud::{ObjectStore, Result};

/// Region in which buckets are created without a location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// S3 client for staging templates
pub struct S3Store {
    client: Client,
    region: Option<String>,
}

impl S3Store {
    pub fn new(client: Client, region: Option<String>) -> Self {
        Self { client, region }
    }
}

/// Virtual-hosted style URL of an object
fn object_url(bucket: &str, key: &str, region: Option<&str>) -> String {
    match region {
        Some(region) if region != DEFAULT_REGION => {
            format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
        }
        _ => format!("https://{}.s3.amazonaws.com/{}", bucket, key),
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_not_found())
                    .unwrap_or(false);
                if not_found {
                    Ok(false)
                } else {
                    Err(api_error(e))
                }
            }
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        let mut call = self.client.create_bucket().bucket(bucket);

        if let Some(region) = self.region.as_deref().filter(|r| *r != DEFAULT_REGION) {
            call = call.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            );
        }

        tracing::debug!("Calling [CreateBucket] for [{}]", bucket);
        call.send().await.map_err(api_error)?;
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: &str) -> Result<String> {
        tracing::debug!("Uploading template to s3://{}/{}", bucket, key);
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body.as_bytes().to_vec()))
            .send()
            .await
            .map_err(api_error)?;

        Ok(object_url(bucket, key, self.region.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url() {
        assert_eq!(
            object_url("my-bucket", "web_2024-3-7_95.template", Some("ap-northeast-1")),
            "https://my-bucket.s3.ap-northeast-1.amazonaws.com/web_2024-3-7_95.template"
        );
        assert_eq!(
            object_url("my-bucket", "web.template", Some("us-east-1")),
            "https://my-bucket.s3.amazonaws.com/web.template"
        );
        assert_eq!(
            object_url("my-bucket", "web.template", None),
            "https://my-bucket.s3.amazonaws.com/web.template"
        );
    }
}
