// firehose-synth-config - Stack configuration
//
// Supports configuration from multiple sources:
// 1. Environment variables (highest priority, FIREHOSE_SYNTH_* prefix)
// 2. Config file path from FIREHOSE_SYNTH_CONFIG env var
// 3. Config file contents from FIREHOSE_SYNTH_CONFIG_CONTENT env var
// 4. Default config file locations (./firehose-synth.toml, ./.firehose-synth.toml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{EnvSource, ENV_PREFIX};

/// Full stack configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackConfig {
    /// Name of the deployable stack; keys the output exports
    #[serde(default)]
    pub stack_name: String,

    #[serde(default)]
    pub environment: EnvironmentConfig,

    #[serde(default)]
    pub firehose: FirehoseConfig,

    #[serde(default)]
    pub resources: ResourceRefsConfig,
}

/// Deployment target environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_partition")]
    pub partition: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub account_id: String,
}

fn default_partition() -> String {
    "aws".to_string()
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            partition: default_partition(),
            region: String::new(),
            account_id: String::new(),
        }
    }
}

/// Delivery stream settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirehoseConfig {
    #[serde(default)]
    pub stream_name: String,
}

/// ARNs of the already-provisioned resources the role needs to reach
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceRefsConfig {
    /// Record-transform Lambda function
    #[serde(default)]
    pub function_arn: String,
    /// Source Kinesis data stream
    #[serde(default)]
    pub source_stream_arn: String,
    /// Destination S3 bucket
    #[serde(default)]
    pub bucket_arn: String,
}

impl StackConfig {
    /// Load configuration from all sources with priority
    pub fn load() -> Result<Self> {
        sources::load_config()
    }

    /// Load configuration from a specific file path (for CLI --config flag)
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        sources::load_from_file_path(path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}
