//! ARN composition and validation
//!
//! ARNs are composed left to right from their segments:
//! `arn:{partition}:{service}:{region}:{account}:{resource}{sep}{resource-name}`
//!
//! Resource names are always composed in full before an ARN is formatted.
//! Input ARNs supplied by the caller are only ever suffixed (`:*`, `/*`),
//! never sliced: slicing a provider-issued identifier is undefined behavior
//! once the identifier is a deferred placeholder.

use crate::error::SynthError;

/// How the resource name is joined to the resource type segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArnFormat {
    /// `arn:p:svc:r:a:resource` - no resource name
    NoResourceName,
    /// `arn:p:svc:r:a:resource/name`
    SlashResourceName,
    /// `arn:p:svc:r:a:resource:name`
    ColonResourceName,
}

/// Compose an ARN from its segments
///
/// `region` and `account` may be empty for global services (IAM, S3).
pub fn format_arn(
    partition: &str,
    service: &str,
    region: &str,
    account: &str,
    resource: &str,
    resource_name: Option<&str>,
    format: ArnFormat,
) -> String {
    let mut arn = format!("arn:{partition}:{service}:{region}:{account}:{resource}");
    if let Some(name) = resource_name {
        match format {
            ArnFormat::NoResourceName => {}
            ArnFormat::SlashResourceName => {
                arn.push('/');
                arn.push_str(name);
            }
            ArnFormat::ColonResourceName => {
                arn.push(':');
                arn.push_str(name);
            }
        }
    }
    arn
}

/// Validate the general shape of a caller-supplied ARN
///
/// Checks the `arn:` scheme and that partition, service and resource
/// segments are present and non-empty. Region and account are allowed to
/// be empty (S3 bucket ARNs carry neither).
pub fn validate(value: &str) -> Result<(), SynthError> {
    let invalid = |reason: &'static str| SynthError::InvalidArn {
        value: value.to_string(),
        reason,
    };

    let mut parts = value.splitn(6, ':');
    if parts.next() != Some("arn") {
        return Err(invalid("expected 'arn:' scheme"));
    }
    match parts.next() {
        Some(p) if !p.is_empty() => {}
        _ => return Err(invalid("missing partition segment")),
    }
    match parts.next() {
        Some(s) if !s.is_empty() => {}
        _ => return Err(invalid("missing service segment")),
    }
    // region and account
    if parts.next().is_none() || parts.next().is_none() {
        return Err(invalid("too few segments"));
    }
    match parts.next() {
        Some(r) if !r.is_empty() => {}
        _ => return Err(invalid("missing resource segment")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_arn_colon_resource_name() {
        let arn = format_arn(
            "aws",
            "logs",
            "us-east-1",
            "123456789012",
            "log-group",
            Some("/aws/kinesisfirehose/my-stream:log-stream:*"),
            ArnFormat::ColonResourceName,
        );
        assert_eq!(
            arn,
            "arn:aws:logs:us-east-1:123456789012:log-group:/aws/kinesisfirehose/my-stream:log-stream:*"
        );
    }

    #[test]
    fn test_format_arn_slash_resource_name() {
        let arn = format_arn(
            "aws",
            "iam",
            "",
            "123456789012",
            "role",
            Some("my-role"),
            ArnFormat::SlashResourceName,
        );
        assert_eq!(arn, "arn:aws:iam::123456789012:role/my-role");
    }

    #[test]
    fn test_format_arn_no_resource_name() {
        let arn = format_arn(
            "aws",
            "glue",
            "eu-west-1",
            "123456789012",
            "catalog",
            None,
            ArnFormat::NoResourceName,
        );
        assert_eq!(arn, "arn:aws:glue:eu-west-1:123456789012:catalog");
    }

    #[test]
    fn test_validate_accepts_common_shapes() {
        assert!(validate("arn:aws:kinesis:us-east-1:123456789012:stream/my-stream").is_ok());
        assert!(validate("arn:aws:s3:::my-bucket").is_ok());
        assert!(validate("arn:aws:lambda:us-east-1:123456789012:function:my-fn").is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert!(validate("not-an-arn").is_err());
        assert!(validate("arn:aws").is_err());
        assert!(validate("arn::s3:::bucket").is_err());
        assert!(validate("arn:aws:s3:::").is_err());
    }
}
