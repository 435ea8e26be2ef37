//! Firehose delivery role stack
//!
//! Assembles the six-statement least-privilege policy, the service role
//! that carries it inline, and the two cross-stack outputs.

use crate::arn::{self, ArnFormat};
use crate::error::SynthError;
use crate::policy::{PolicyDocument, PolicyStatement};
use crate::role::{RoleResource, TrustPolicy, FIREHOSE_SERVICE_PRINCIPAL};
use crate::template::{Output, Template};

/// Logical id of the role resource in the emitted template
pub const ROLE_LOGICAL_ID: &str = "KinesisFirehoseServiceRole";

/// Name of the single inline policy attached to the role
pub const INLINE_POLICY_NAME: &str = "firehose_role_policy";

/// Logical ids of the two stack outputs
pub const OUTPUT_ROLE: &str = "FirehoseRole";
pub const OUTPUT_ROLE_ARN: &str = "FirehoseRoleArn";

/// Log group prefix the delivery service writes error logs under
const LOG_GROUP_PREFIX: &str = "/aws/kinesisfirehose";

/// Deployment target: partition, region, account and owning stack name
#[derive(Debug, Clone)]
pub struct StackEnv {
    pub partition: String,
    pub region: String,
    pub account_id: String,
    pub stack_name: String,
}

impl StackEnv {
    pub fn new(
        partition: impl Into<String>,
        region: impl Into<String>,
        account_id: impl Into<String>,
        stack_name: impl Into<String>,
    ) -> Result<Self, SynthError> {
        let env = Self {
            partition: partition.into(),
            region: region.into(),
            account_id: account_id.into(),
            stack_name: stack_name.into(),
        };
        for (field, value) in [
            ("partition", &env.partition),
            ("region", &env.region),
            ("account_id", &env.account_id),
            ("stack_name", &env.stack_name),
        ] {
            if value.is_empty() {
                return Err(SynthError::EmptyEnvField { field });
            }
        }
        Ok(env)
    }

    /// Compose an ARN in this environment's partition/region/account
    pub fn format_arn(
        &self,
        service: &str,
        resource: &str,
        resource_name: Option<&str>,
        format: ArnFormat,
    ) -> String {
        arn::format_arn(
            &self.partition,
            service,
            &self.region,
            &self.account_id,
            resource,
            resource_name,
            format,
        )
    }
}

/// Borrowed reference to the record-transform Lambda function
#[derive(Debug, Clone)]
pub struct FunctionRef {
    arn: String,
}

impl FunctionRef {
    pub fn new(arn: impl Into<String>) -> Result<Self, SynthError> {
        let arn = arn.into();
        arn::validate(&arn)?;
        Ok(Self { arn })
    }

    pub fn arn(&self) -> &str {
        &self.arn
    }

    /// ARN covering every version and alias of the function
    pub fn qualified_arn(&self) -> String {
        format!("{}:*", self.arn)
    }
}

/// Borrowed reference to the source Kinesis data stream
#[derive(Debug, Clone)]
pub struct StreamRef {
    arn: String,
}

impl StreamRef {
    pub fn new(arn: impl Into<String>) -> Result<Self, SynthError> {
        let arn = arn.into();
        arn::validate(&arn)?;
        Ok(Self { arn })
    }

    pub fn arn(&self) -> &str {
        &self.arn
    }
}

/// Borrowed reference to the destination S3 bucket
#[derive(Debug, Clone)]
pub struct BucketRef {
    arn: String,
}

impl BucketRef {
    pub fn new(arn: impl Into<String>) -> Result<Self, SynthError> {
        let arn = arn.into();
        arn::validate(&arn)?;
        Ok(Self { arn })
    }

    pub fn arn(&self) -> &str {
        &self.arn
    }

    /// ARN covering the objects inside the bucket
    pub fn objects_arn(&self) -> String {
        format!("{}/*", self.arn)
    }
}

/// Role-policy assembler for one delivery stream
#[derive(Debug, Clone)]
pub struct FirehoseRoleStack {
    env: StackEnv,
    stream_name: String,
    function: FunctionRef,
    stream: StreamRef,
    bucket: BucketRef,
}

impl FirehoseRoleStack {
    pub fn new(
        env: StackEnv,
        stream_name: impl Into<String>,
        function: FunctionRef,
        stream: StreamRef,
        bucket: BucketRef,
    ) -> Result<Self, SynthError> {
        let stream_name = stream_name.into();
        if stream_name.is_empty() {
            return Err(SynthError::EmptyStreamName);
        }
        Ok(Self {
            env,
            stream_name,
            function,
            stream,
            bucket,
        })
    }

    pub fn env(&self) -> &StackEnv {
        &self.env
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// Deterministic role name, stable across redeployments
    pub fn role_name(&self) -> String {
        format!(
            "KinesisFirehoseServiceRole-{}-{}",
            self.stream_name, self.env.region
        )
    }

    /// Assemble the six permission statements
    ///
    /// Every statement names the narrowest resource pattern its action set
    /// allows; only the ENI statement is unscoped, the platform offers no
    /// resource-level restriction for those actions.
    pub fn build_policy(&self) -> Result<PolicyDocument, SynthError> {
        let mut doc = PolicyDocument::new();

        // 1. Read the source stream
        doc.add_statement(PolicyStatement::allow(
            [
                "kinesis:DescribeStream",
                "kinesis:GetShardIterator",
                "kinesis:GetRecords",
                "kinesis:ListShards",
            ],
            [self.stream.arn().to_string()],
        )?);

        // 2. Write batched output to the destination bucket
        doc.add_statement(PolicyStatement::allow(
            [
                "s3:AbortMultipartUpload",
                "s3:GetBucketLocation",
                "s3:GetObject",
                "s3:ListBucket",
                "s3:ListBucketMultipartUploads",
                "s3:PutObject",
                "s3:DeleteObject",
            ],
            [self.bucket.arn().to_string(), self.bucket.objects_arn()],
        )?);

        // 3. Register schema updates with the Glue catalog
        doc.add_statement(PolicyStatement::allow(
            ["glue:GetTable", "glue:GetDatabase", "glue:UpdateTable"],
            [
                self.env
                    .format_arn("glue", "catalog", None, ArnFormat::NoResourceName),
                self.env
                    .format_arn("glue", "database", Some("*"), ArnFormat::SlashResourceName),
                self.env
                    .format_arn("glue", "table", Some("*/*"), ArnFormat::SlashResourceName),
            ],
        )?);

        // 4. Manage ENIs for VPC delivery; no narrower scope exists
        doc.add_statement(PolicyStatement::allow(
            [
                "ec2:DescribeVpcs",
                "ec2:DescribeVpcAttribute",
                "ec2:DescribeSubnets",
                "ec2:DescribeSecurityGroups",
                "ec2:DescribeNetworkInterfaces",
                "ec2:CreateNetworkInterface",
                "ec2:CreateNetworkInterfacePermission",
                "ec2:DeleteNetworkInterface",
            ],
            ["*"],
        )?);

        // 5. Write delivery error logs. The resource name is composed in
        // full before the ARN is formatted; formatted identifiers are
        // never sliced afterwards.
        let log_group_name = format!("{}/{}", LOG_GROUP_PREFIX, self.stream_name);
        doc.add_statement(PolicyStatement::allow(
            ["logs:PutLogEvents"],
            [self.env.format_arn(
                "logs",
                "log-group",
                Some(&format!("{log_group_name}:log-stream:*")),
                ArnFormat::ColonResourceName,
            )],
        )?);

        // 6. Invoke the record-transform function, any version or alias
        doc.add_statement(PolicyStatement::allow(
            ["lambda:InvokeFunction", "lambda:GetFunctionConfiguration"],
            [self.function.qualified_arn()],
        )?);

        Ok(doc)
    }

    /// Create the role declaration with the policy attached inline
    pub fn materialize(&self) -> Result<RoleResource, SynthError> {
        let mut role = RoleResource::new(
            self.role_name(),
            TrustPolicy::for_service(FIREHOSE_SERVICE_PRINCIPAL),
        );
        role.add_inline_policy(INLINE_POLICY_NAME, self.build_policy()?);
        Ok(role)
    }

    /// Cross-stack outputs for the role name and ARN, keyed by stack name
    pub fn outputs(&self, role: &RoleResource) -> Vec<(&'static str, Output)> {
        vec![
            (
                OUTPUT_ROLE,
                Output::exported(
                    role.role_name(),
                    format!("{}-Role", self.env.stack_name),
                ),
            ),
            (
                OUTPUT_ROLE_ARN,
                Output::exported(
                    role.arn(&self.env),
                    format!("{}-RoleArn", self.env.stack_name),
                ),
            ),
        ]
    }

    /// Full template: the role resource plus both outputs
    pub fn synth(&self) -> Result<Template, SynthError> {
        let role = self.materialize()?;
        let mut template = Template::new(Some(format!(
            "IAM service role for Kinesis Data Firehose delivery stream '{}'",
            self.stream_name
        )));
        for (logical_id, output) in self.outputs(&role) {
            template.add_output(logical_id, output);
        }
        template.add_resource(ROLE_LOGICAL_ID, role);
        Ok(template)
    }
}
