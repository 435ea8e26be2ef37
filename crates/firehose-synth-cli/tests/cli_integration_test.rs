use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn get_binary_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up to workspace root
    path.pop();
    path.push("target");
    path.push("debug");
    path.push("firehose-synth");
    path
}

fn write_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("firehose-synth.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"
        stack_name = "cli-test-stack"

        [environment]
        region = "us-east-1"
        account_id = "123456789012"

        [firehose]
        stream_name = "cli-events"

        [resources]
        function_arn = "arn:aws:lambda:us-east-1:123456789012:function:transform"
        source_stream_arn = "arn:aws:kinesis:us-east-1:123456789012:stream/cli-events-src"
        bucket_arn = "arn:aws:s3:::cli-delivery"
        "#
    )
    .unwrap();
    path
}

#[test]
fn test_cli_help() {
    let output = Command::new(get_binary_path())
        .arg("--help")
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Firehose delivery stream"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--check"));
    assert!(stdout.contains("--log-level"));
    assert!(stdout.contains("--log-format"));
}

#[test]
fn test_json_log_format() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(&dir);
    let template_path = dir.path().join("template.json");

    let output = Command::new(get_binary_path())
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&template_path)
        .arg("--log-format")
        .arg("json")
        .env("RUST_LOG", "info")
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Log lines go to stderr as JSON objects; the template is untouched
    let stderr = String::from_utf8_lossy(&output.stderr);
    let log_line = stderr
        .lines()
        .find(|l| l.contains("template written"))
        .expect("expected a log line for the written template");
    assert!(log_line.trim_start().starts_with('{'));

    let content = std::fs::read_to_string(&template_path)?;
    assert!(content.contains("AWS::IAM::Role"));
    Ok(())
}

#[test]
fn test_bad_log_format_rejected() {
    let output = Command::new(get_binary_path())
        .arg("--log-format")
        .arg("yaml")
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
}

#[test]
fn test_cli_version() {
    let output = Command::new(get_binary_path())
        .arg("--version")
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("firehose-synth"));
}

#[test]
fn test_synth_writes_template_file() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(&dir);
    let template_path = dir.path().join("template.json");

    let output = Command::new(get_binary_path())
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&template_path)
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = std::fs::read_to_string(&template_path)?;
    assert!(content.contains("AWS::IAM::Role"));
    assert!(content.contains("KinesisFirehoseServiceRole-cli-events-us-east-1"));
    assert!(content.contains("cli-test-stack-RoleArn"));
    Ok(())
}

#[test]
fn test_synth_to_stdout_is_deterministic() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(&dir);

    let run = || {
        Command::new(get_binary_path())
            .arg("--config")
            .arg(&config)
            .arg("--compact")
            .output()
    };
    let first = run()?;
    let second = run()?;

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[test]
fn test_check_prints_role_name_only() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(&dir);

    let output = Command::new(get_binary_path())
        .arg("--config")
        .arg(&config)
        .arg("--check")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "KinesisFirehoseServiceRole-cli-events-us-east-1"
    );
    assert!(!stdout.contains("AWS::IAM::Role"));
    Ok(())
}

#[test]
fn test_invalid_config_fails_with_diagnostic() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
        stack_name = "bad-stack"

        [environment]
        region = "us-east-1"
        account_id = "not-an-account"

        [firehose]
        stream_name = "events"

        [resources]
        function_arn = "arn:aws:lambda:us-east-1:123456789012:function:f"
        source_stream_arn = "arn:aws:kinesis:us-east-1:123456789012:stream/k"
        bucket_arn = "arn:aws:s3:::b"
        "#,
    )?;

    let output = Command::new(get_binary_path())
        .arg("--config")
        .arg(&path)
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("account_id"));
    Ok(())
}

#[test]
fn test_missing_config_file_fails() {
    let output = Command::new(get_binary_path())
        .arg("--config")
        .arg("/nonexistent/firehose-synth.toml")
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
}
