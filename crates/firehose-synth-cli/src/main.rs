use anyhow::{Context, Result};
use clap::Parser;
use firehose_synth_config::StackConfig;
use firehose_synth_core::{BucketRef, FirehoseRoleStack, FunctionRef, StackEnv, StreamRef};
use std::path::PathBuf;
use tracing::info;

mod init;

use init::{init_tracing, LogFormat};

/// Synthesize the IAM service role template for a Firehose delivery stream
#[derive(Parser)]
#[command(name = "firehose-synth")]
#[command(version)]
#[command(
    about = "Synthesize the IAM service role template for a Firehose delivery stream",
    long_about = None
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the template to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Validate the configuration and print the resolved role name, emitting nothing
    #[arg(long)]
    check: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_name = "FORMAT", value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    let config = if let Some(config_path) = &cli.config {
        StackConfig::load_from_path(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        StackConfig::load().context("Failed to load configuration")?
    };

    let stack = build_stack(&config)?;

    if cli.check {
        info!(stack_name = %config.stack_name, "configuration is valid");
        println!("{}", stack.role_name());
        return Ok(());
    }

    let template = stack.synth().context("Template synthesis failed")?;
    let json = if cli.compact {
        template.to_json_compact()?
    } else {
        template.to_json()?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .with_context(|| format!("Failed to write template to {}", path.display()))?;
            info!(
                path = %path.display(),
                role_name = %stack.role_name(),
                "template written"
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Turn the validated config into the assembler's typed inputs
fn build_stack(config: &StackConfig) -> Result<FirehoseRoleStack> {
    let env = StackEnv::new(
        &config.environment.partition,
        &config.environment.region,
        &config.environment.account_id,
        &config.stack_name,
    )?;
    let function = FunctionRef::new(&config.resources.function_arn)?;
    let stream = StreamRef::new(&config.resources.source_stream_arn)?;
    let bucket = BucketRef::new(&config.resources.bucket_arn)?;

    Ok(FirehoseRoleStack::new(
        env,
        &config.firehose.stream_name,
        function,
        stream,
        bucket,
    )?)
}
