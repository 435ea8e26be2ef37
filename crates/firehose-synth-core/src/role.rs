//! IAM role resource and its trust policy
//!
//! The role carries its policy inline (`Policies`), never as a managed
//! policy attachment: managed-policy references are known to produce
//! spurious update conflicts in the provisioning engine.

use crate::arn::{self, ArnFormat};
use crate::policy::{Effect, PolicyDocument, POLICY_VERSION};
use crate::stack::StackEnv;
use serde::Serialize;

/// The only principal this stack ever trusts
pub const FIREHOSE_SERVICE_PRINCIPAL: &str = "firehose.amazonaws.com";

#[derive(Debug, Clone, Serialize)]
struct ServicePrincipal {
    #[serde(rename = "Service")]
    service: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TrustStatement {
    effect: Effect,
    principal: ServicePrincipal,
    action: Vec<&'static str>,
}

/// Assume-role policy trusting exactly one service principal
#[derive(Debug, Clone, Serialize)]
pub struct TrustPolicy {
    #[serde(rename = "Version")]
    version: &'static str,
    #[serde(rename = "Statement")]
    statement: Vec<TrustStatement>,
}

impl TrustPolicy {
    pub fn for_service(service: &str) -> Self {
        Self {
            version: POLICY_VERSION,
            statement: vec![TrustStatement {
                effect: Effect::Allow,
                principal: ServicePrincipal {
                    service: service.to_string(),
                },
                action: vec!["sts:AssumeRole"],
            }],
        }
    }

    pub fn trusted_service(&self) -> &str {
        &self.statement[0].principal.service
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct InlinePolicy {
    policy_name: String,
    policy_document: PolicyDocument,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RoleProperties {
    role_name: String,
    assume_role_policy_document: TrustPolicy,
    policies: Vec<InlinePolicy>,
}

/// `AWS::IAM::Role` resource declaration
#[derive(Debug, Clone, Serialize)]
pub struct RoleResource {
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Properties")]
    properties: RoleProperties,
}

impl RoleResource {
    pub fn new(role_name: impl Into<String>, trust: TrustPolicy) -> Self {
        Self {
            kind: "AWS::IAM::Role",
            properties: RoleProperties {
                role_name: role_name.into(),
                assume_role_policy_document: trust,
                policies: Vec::new(),
            },
        }
    }

    /// Attach a named inline policy; insertion order is preserved
    pub fn add_inline_policy(&mut self, name: impl Into<String>, document: PolicyDocument) {
        self.properties.policies.push(InlinePolicy {
            policy_name: name.into(),
            policy_document: document,
        });
    }

    pub fn role_name(&self) -> &str {
        &self.properties.role_name
    }

    pub fn trust_policy(&self) -> &TrustPolicy {
        &self.properties.assume_role_policy_document
    }

    pub fn inline_policy(&self, name: &str) -> Option<&PolicyDocument> {
        self.properties
            .policies
            .iter()
            .find(|p| p.policy_name == name)
            .map(|p| &p.policy_document)
    }

    /// Role ARN; IAM is global, so the region segment is empty
    pub fn arn(&self, env: &StackEnv) -> String {
        arn::format_arn(
            &env.partition,
            "iam",
            "",
            &env.account_id,
            "role",
            Some(self.role_name()),
            ArnFormat::SlashResourceName,
        )
    }
}
