//! Stack definition

/// One remote infrastructure stack, as seen by a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    /// Stack name on the control plane
    pub name: String,

    /// Rendered template body (deploy-time expressions already resolved)
    pub template: String,

    /// Bucket used to stage the template instead of inlining it
    pub bucket: Option<String>,
}

impl Stack {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            bucket: None,
        }
    }

    /// Stack reference without a template, for operations that never send one
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        self.bucket = if bucket.is_empty() { None } else { Some(bucket) };
        self
    }
}
