//! Error types for declaration assembly

use thiserror::Error;

/// Errors raised while assembling declarations, before anything is emitted
#[derive(Debug, Error)]
pub enum SynthError {
    /// A policy statement was constructed with no actions
    #[error("policy statement has no actions (resources: {resources:?})")]
    EmptyActions { resources: Vec<String> },

    /// A policy statement was constructed with no resources
    #[error("policy statement has no resources (actions: {actions:?})")]
    EmptyResources { actions: Vec<String> },

    /// A resource reference carried a malformed ARN
    #[error("invalid ARN '{value}': {reason}")]
    InvalidArn { value: String, reason: &'static str },

    /// The delivery stream name was empty
    #[error("firehose stream name must not be empty")]
    EmptyStreamName,

    /// A stack environment field was empty
    #[error("stack environment field '{field}' must not be empty")]
    EmptyEnvField { field: &'static str },
}
