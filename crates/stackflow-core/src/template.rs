//! Template inspection helpers

use chrono::{DateTime, Datelike, Timelike, Utc};
use stackflow_cloud::Capability;

/// Marker whose presence anywhere in a template triggers IAM acknowledgement
const IAM_MARKER: &str = "AWS::IAM";

/// Capabilities to acknowledge for `template`
///
/// This is a substring search, not a parse: the marker inside a comment or a
/// resource name also counts.
pub fn required_capabilities(template: &str) -> Vec<Capability> {
    if template.contains(IAM_MARKER) {
        vec![Capability::Iam, Capability::NamedIam]
    } else {
        Vec::new()
    }
}

/// Object key under which a stack's template is staged
///
/// Date fields are not zero-padded: `web_2024-3-7_95.template` is 09:05.
pub fn template_key(stack: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}-{}-{}_{}{}.template",
        stack,
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute()
    )
}
