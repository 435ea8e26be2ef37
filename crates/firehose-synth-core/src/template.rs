//! CloudFormation template assembly
//!
//! Resources and outputs live in ordered maps so two synth passes over
//! identical inputs serialize byte-identically.

use crate::role::RoleResource;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
struct Export {
    #[serde(rename = "Name")]
    name: String,
}

/// Named cross-stack output with an export name
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    value: String,
    export: Export,
}

impl Output {
    pub fn exported(value: impl Into<String>, export_name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            export: Export {
                name: export_name.into(),
            },
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn export_name(&self) -> &str {
        &self.export.name
    }
}

/// Top-level deployable template
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: &'static str,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "Resources")]
    resources: BTreeMap<String, RoleResource>,
    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, Output>,
}

impl Template {
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: "2010-09-09",
            description,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn add_resource(&mut self, logical_id: impl Into<String>, resource: RoleResource) {
        self.resources.insert(logical_id.into(), resource);
    }

    pub fn add_output(&mut self, logical_id: impl Into<String>, output: Output) {
        self.outputs.insert(logical_id.into(), output);
    }

    pub fn resource(&self, logical_id: &str) -> Option<&RoleResource> {
        self.resources.get(logical_id)
    }

    pub fn output(&self, logical_id: &str) -> Option<&Output> {
        self.outputs.get(logical_id)
    }

    /// Pretty-printed JSON, stable across runs
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Single-line JSON for machine consumption
    pub fn to_json_compact(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
