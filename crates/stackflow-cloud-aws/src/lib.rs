//! AWS clients for stackflow
//!
//! Implements [`ControlPlane`](stackflow_cloud::ControlPlane) on top of
//! CloudFormation and [`ObjectStore`](stackflow_cloud::ObjectStore) on top of
//! S3.
//!
//! # Requirements
//!
//! - Credentials resolvable by the default AWS provider chain
//!   (environment, shared config/credentials files, SSO, instance role)
//!
//! # Example
//!
//! ```ignore
//! use stackflow_cloud_aws::AwsSession;
//!
//! let session = AwsSession::load(Some("ap-northeast-1"), None).await;
//! let control_plane = session.cloudformation(Duration::from_secs(3600));
//! let object_store = session.s3();
//! ```

pub mod cloudformation;
pub mod s3;
pub mod session;

pub use cloudformation::CloudFormation;
pub use s3::S3Store;
pub use session::AwsSession;

use stackflow_cloud::CloudError;

/// Flatten an SDK error, including its source chain, into a [`CloudError`]
pub(crate) fn api_error<E: std::error::Error>(err: E) -> CloudError {
    CloudError::ApiError(aws_sdk_cloudformation::error::DisplayErrorContext(err).to_string())
}

/// Convert an SDK timestamp
pub(crate) fn to_chrono(
    at: &aws_sdk_cloudformation::primitives::DateTime,
) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(at.secs(), at.subsec_nanos())
}
