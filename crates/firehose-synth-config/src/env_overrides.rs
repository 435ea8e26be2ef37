use super::StackConfig;

pub const ENV_PREFIX: &str = "FIREHOSE_SYNTH_";

/// Abstraction over environment-variable lookups so tests can supply
/// their own source of overrides.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;

    /// Get an environment variable WITHOUT the FIREHOSE_SYNTH_ prefix.
    /// Used for AWS standard variables (AWS_REGION, etc.)
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides (highest priority) to the config.
///
/// Every override is a plain string assignment; validation happens after.
pub fn apply_env_overrides<E: EnvSource>(config: &mut StackConfig, env: &E) {
    if let Some(val) = env.get("STACK_NAME") {
        config.stack_name = val;
    }

    // Environment
    if let Some(val) = env.get("PARTITION") {
        config.environment.partition = val;
    }
    if let Some(val) = env.get("REGION") {
        config.environment.region = val;
    }
    if let Some(val) = env.get("ACCOUNT_ID") {
        config.environment.account_id = val;
    }

    // AWS standard region variables fill in only when nothing else did
    if config.environment.region.is_empty() {
        if let Some(val) = env
            .get_raw("AWS_REGION")
            .or_else(|| env.get_raw("AWS_DEFAULT_REGION"))
        {
            config.environment.region = val;
        }
    }

    // Firehose
    if let Some(val) = env.get("STREAM_NAME") {
        config.firehose.stream_name = val;
    }

    // Resource references
    if let Some(val) = env.get("FUNCTION_ARN") {
        config.resources.function_arn = val;
    }
    if let Some(val) = env.get("SOURCE_STREAM_ARN") {
        config.resources.source_stream_arn = val;
    }
    if let Some(val) = env.get("BUCKET_ARN") {
        config.resources.bucket_arn = val;
    }
}

/// EnvSource backed by std::env
pub(crate) struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(format!("{ENV_PREFIX}{key}")).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for FakeEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }

        fn get_raw(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_overrides_take_priority() {
        let mut config = StackConfig::default();
        config.firehose.stream_name = "from-file".to_string();

        let env = FakeEnv(HashMap::from([
            ("STREAM_NAME", "from-env"),
            ("REGION", "us-west-2"),
            ("ACCOUNT_ID", "123456789012"),
            ("BUCKET_ARN", "arn:aws:s3:::override-bucket"),
        ]));
        apply_env_overrides(&mut config, &env);

        assert_eq!(config.firehose.stream_name, "from-env");
        assert_eq!(config.environment.region, "us-west-2");
        assert_eq!(config.resources.bucket_arn, "arn:aws:s3:::override-bucket");
        // Untouched fields keep their values
        assert_eq!(config.environment.partition, "aws");
    }

    #[test]
    fn test_aws_region_fallback_only_fills_empty() {
        let mut config = StackConfig::default();
        let env = FakeEnv(HashMap::from([("AWS_REGION", "eu-central-1")]));
        apply_env_overrides(&mut config, &env);
        assert_eq!(config.environment.region, "eu-central-1");

        let mut config = StackConfig::default();
        config.environment.region = "us-east-1".to_string();
        apply_env_overrides(&mut config, &env);
        assert_eq!(config.environment.region, "us-east-1");
    }
}
