//! Reference and selector shapes stored under a resource's spec.

use std::collections::BTreeMap;

pub use k8s_openapi::api::core::v1::{LocalObjectReference, ObjectReference};
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use serde::{Deserialize, Serialize};

/// Points a composite resource at the claim that created it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReference {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SecretReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Where, and with what metadata, connection details are published.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishConnectionDetailsTo {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConnectionSecretMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_ref: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionSecretMetadata {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub name: String,
}

/// How a composite follows new composition revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdatePolicy {
    Automatic,
    Manual,
}

/// True when every field of the reference is unset or empty.
pub fn is_empty_reference(r: &ObjectReference) -> bool {
    [&r.api_version, &r.field_path, &r.kind, &r.name, &r.namespace, &r.resource_version, &r.uid]
        .iter()
        .all(|f| f.as_deref().map_or(true, str::is_empty))
}

/// The non-empty references of `refs`, in order.
pub fn non_empty_references(refs: &[ObjectReference]) -> Vec<ObjectReference> {
    refs.iter().filter(|r| !is_empty_reference(r)).cloned().collect()
}
