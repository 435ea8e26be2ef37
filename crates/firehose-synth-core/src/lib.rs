// firehose-synth-core - Declaration model and role-policy assembler
//
// Synthesizes a CloudFormation-style template declaring one IAM service
// role for a Kinesis Data Firehose delivery stream:
// - an inline least-privilege policy covering the stream source, the
//   transform Lambda, the destination bucket, the Glue catalog, VPC
//   delivery ENIs and delivery error logging
// - two cross-stack outputs (role name, role ARN)
//
// Everything here is pure declaration assembly: no I/O, no AWS calls,
// deterministic output for identical inputs.

pub mod arn;
mod error;
pub mod policy;
pub mod role;
pub mod stack;
pub mod template;

pub use arn::ArnFormat;
pub use error::SynthError;
pub use policy::{Effect, PolicyDocument, PolicyStatement};
pub use role::{RoleResource, TrustPolicy, FIREHOSE_SERVICE_PRINCIPAL};
pub use stack::{BucketRef, FirehoseRoleStack, FunctionRef, StackEnv, StreamRef};
pub use template::{Output, Template};
