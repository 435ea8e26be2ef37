// Configuration validation
//
// Validates that required fields are present and values are sensible
// before any declaration assembly happens.

use crate::StackConfig;
use anyhow::{bail, Result};
use tracing::warn;

// IAM caps role names at 64 characters
const IAM_ROLE_NAME_MAX: usize = 64;
const ROLE_NAME_PREFIX_LEN: usize = "KinesisFirehoseServiceRole-".len();

pub fn validate_config(config: &StackConfig) -> Result<()> {
    validate_stack_name(&config.stack_name)?;
    validate_environment(config)?;
    validate_firehose(config)?;
    validate_resources(config)?;
    Ok(())
}

fn validate_stack_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("stack_name is required");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        bail!("stack_name must contain only alphanumeric characters and hyphens: '{name}'");
    }
    Ok(())
}

fn validate_environment(config: &StackConfig) -> Result<()> {
    let env = &config.environment;

    if env.partition.is_empty() {
        bail!("environment.partition must not be empty");
    }

    if env.region.is_empty() {
        bail!("environment.region is required (or set AWS_REGION)");
    }
    if !env
        .region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        bail!("environment.region does not look like a region: '{}'", env.region);
    }
    if env.region.split('-').count() < 3 {
        warn!(
            region = %env.region,
            "environment.region does not match the usual <area>-<direction>-<n> shape"
        );
    }

    if env.account_id.len() != 12 || !env.account_id.chars().all(|c| c.is_ascii_digit()) {
        bail!(
            "environment.account_id must be a 12-digit AWS account id, got '{}'",
            env.account_id
        );
    }

    Ok(())
}

fn validate_firehose(config: &StackConfig) -> Result<()> {
    let stream_name = &config.firehose.stream_name;
    if stream_name.is_empty() {
        bail!("firehose.stream_name is required");
    }

    // Role name is KinesisFirehoseServiceRole-<stream>-<region>; it must
    // fit under the IAM cap or deployment will fail much later.
    let role_name_len =
        ROLE_NAME_PREFIX_LEN + stream_name.len() + 1 + config.environment.region.len();
    if role_name_len > IAM_ROLE_NAME_MAX {
        bail!(
            "firehose.stream_name '{}' is too long: derived role name would be {} characters (IAM limit is {})",
            stream_name,
            role_name_len,
            IAM_ROLE_NAME_MAX
        );
    }

    Ok(())
}

fn validate_resources(config: &StackConfig) -> Result<()> {
    let resources = &config.resources;

    check_arn("resources.function_arn", &resources.function_arn, "lambda")?;
    check_arn(
        "resources.source_stream_arn",
        &resources.source_stream_arn,
        "kinesis",
    )?;
    check_arn("resources.bucket_arn", &resources.bucket_arn, "s3")?;

    Ok(())
}

fn check_arn(field: &str, value: &str, expected_service: &str) -> Result<()> {
    if value.is_empty() {
        bail!("{field} is required");
    }
    if !value.starts_with("arn:") {
        bail!("{field} must be an ARN, got '{value}'");
    }
    match value.split(':').nth(2) {
        Some(service) if service == expected_service => Ok(()),
        Some(service) => bail!(
            "{field} must be a {expected_service} ARN, got service '{service}' in '{value}'"
        ),
        None => bail!("{field} is not a well-formed ARN: '{value}'"),
    }
}
