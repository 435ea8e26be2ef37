// Configuration source loading
//
// Priority order:
// 1. Environment variables (FIREHOSE_SYNTH_* prefix)
// 2. Config file path from FIREHOSE_SYNTH_CONFIG
// 3. Inline config content from FIREHOSE_SYNTH_CONFIG_CONTENT
// 4. Default config files (./firehose-synth.toml, ./.firehose-synth.toml)

use crate::env_overrides::{self, StdEnvSource};
use crate::StackConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;

/// Load configuration from the default source chain and validate it.
pub fn load_config() -> Result<StackConfig> {
    let mut config = load_from_file()?.unwrap_or_default();

    env_overrides::apply_env_overrides(&mut config, &StdEnvSource);
    config.validate()?;
    Ok(config)
}

fn load_from_file() -> Result<Option<StackConfig>> {
    if let Ok(path) = env::var("FIREHOSE_SYNTH_CONFIG") {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: StackConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        return Ok(Some(config));
    }

    if let Ok(content) = env::var("FIREHOSE_SYNTH_CONFIG_CONTENT") {
        let config: StackConfig = toml::from_str(&content)
            .context("Failed to parse inline config from FIREHOSE_SYNTH_CONFIG_CONTENT")?;
        return Ok(Some(config));
    }

    for path in &["./firehose-synth.toml", "./.firehose-synth.toml"] {
        if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            let config: StackConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?;
            return Ok(Some(config));
        }
    }

    Ok(None)
}

/// Load configuration from a specific file path (for CLI --config flag).
/// Environment overrides still apply on top of the file content.
pub fn load_from_file_path(path: impl AsRef<Path>) -> Result<StackConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: StackConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    env_overrides::apply_env_overrides(&mut config, &StdEnvSource);
    config.validate()?;
    Ok(config)
}
