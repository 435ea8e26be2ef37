//! IAM policy document model
//!
//! Serializes to the IAM policy grammar (version 2012-10-17). Statement
//! order is insertion order; the grant set is order-independent.

use crate::error::SynthError;
use serde::Serialize;

/// IAM policy language version
pub const POLICY_VERSION: &str = "2012-10-17";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// One permission statement: effect, actions, resources
///
/// Actions and resources are both non-empty by construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    effect: Effect,
    action: Vec<String>,
    resource: Vec<String>,
}

impl PolicyStatement {
    /// Build an ALLOW statement, rejecting empty action/resource sets
    pub fn allow<A, R, S, T>(actions: A, resources: R) -> Result<Self, SynthError>
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let action: Vec<String> = actions.into_iter().map(Into::into).collect();
        let resource: Vec<String> = resources.into_iter().map(Into::into).collect();

        if action.is_empty() {
            return Err(SynthError::EmptyActions { resources: resource });
        }
        if resource.is_empty() {
            return Err(SynthError::EmptyResources { actions: action });
        }

        Ok(Self {
            effect: Effect::Allow,
            action,
            resource,
        })
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn actions(&self) -> &[String] {
        &self.action
    }

    pub fn resources(&self) -> &[String] {
        &self.resource
    }
}

/// Ordered sequence of permission statements
#[derive(Debug, Clone, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    version: &'static str,
    #[serde(rename = "Statement")]
    statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    pub fn new() -> Self {
        Self {
            version: POLICY_VERSION,
            statement: Vec::new(),
        }
    }

    pub fn add_statement(&mut self, statement: PolicyStatement) {
        self.statement.push(statement);
    }

    pub fn statements(&self) -> &[PolicyStatement] {
        &self.statement
    }

    pub fn len(&self) -> usize {
        self.statement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statement.is_empty()
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::new()
    }
}
