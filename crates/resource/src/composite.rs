use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xfn_core::{Document, Result};

use crate::convert::Object;
use crate::reference::{
    non_empty_references, ClaimReference, LabelSelector, LocalObjectReference, ObjectReference, UpdatePolicy,
};
use crate::unstructured::Unstructured;

/// A composite resource (XR).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeResource(Unstructured);

impl CompositeResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: Document) -> Self {
        Self(Unstructured::from_document(doc))
    }

    pub fn into_unstructured(self) -> Unstructured {
        self.0
    }

    pub fn composition_selector(&self) -> Option<LabelSelector> {
        self.get_value_into("spec.compositionSelector").ok()
    }

    pub fn set_composition_selector(&mut self, sel: &LabelSelector) -> Result<()> {
        self.set_value("spec.compositionSelector", sel)
    }

    pub fn composition_reference(&self) -> Option<ObjectReference> {
        self.get_value_into("spec.compositionRef").ok()
    }

    pub fn set_composition_reference(&mut self, r: &ObjectReference) -> Result<()> {
        self.set_value("spec.compositionRef", r)
    }

    pub fn composition_revision_reference(&self) -> Option<LocalObjectReference> {
        self.get_value_into("spec.compositionRevisionRef").ok()
    }

    pub fn set_composition_revision_reference(&mut self, r: &LocalObjectReference) -> Result<()> {
        self.set_value("spec.compositionRevisionRef", r)
    }

    pub fn composition_revision_selector(&self) -> Option<LabelSelector> {
        self.get_value_into("spec.compositionRevisionSelector").ok()
    }

    pub fn set_composition_revision_selector(&mut self, sel: &LabelSelector) -> Result<()> {
        self.set_value("spec.compositionRevisionSelector", sel)
    }

    pub fn composition_update_policy(&self) -> Option<UpdatePolicy> {
        self.get_value_into("spec.compositionUpdatePolicy").ok()
    }

    pub fn set_composition_update_policy(&mut self, policy: UpdatePolicy) -> Result<()> {
        self.set_value("spec.compositionUpdatePolicy", &policy)
    }

    pub fn claim_reference(&self) -> Option<ClaimReference> {
        self.get_value_into("spec.claimRef").ok()
    }

    pub fn set_claim_reference(&mut self, r: &ClaimReference) -> Result<()> {
        self.set_value("spec.claimRef", r)
    }

    pub fn resource_references(&self) -> Vec<ObjectReference> {
        self.get_value_into("spec.resourceRefs").unwrap_or_default()
    }

    /// Store references to composed resources, dropping empty ones.
    pub fn set_resource_references(&mut self, refs: &[ObjectReference]) -> Result<()> {
        self.set_value("spec.resourceRefs", &non_empty_references(refs))
    }

    pub fn environment_config_references(&self) -> Vec<ObjectReference> {
        self.get_value_into("spec.environmentConfigRefs").unwrap_or_default()
    }

    /// Store environment config references, dropping empty ones.
    pub fn set_environment_config_references(&mut self, refs: &[ObjectReference]) -> Result<()> {
        self.set_value("spec.environmentConfigRefs", &non_empty_references(refs))
    }

    pub fn connection_details_last_published_time(&self) -> Option<DateTime<Utc>> {
        self.get_value_into("status.connectionDetails.lastPublishedTime").ok()
    }

    pub fn set_connection_details_last_published_time(&mut self, t: DateTime<Utc>) -> Result<()> {
        self.set_value("status.connectionDetails.lastPublishedTime", &t)
    }
}

impl Deref for CompositeResource {
    type Target = Unstructured;

    fn deref(&self) -> &Unstructured {
        &self.0
    }
}

impl DerefMut for CompositeResource {
    fn deref_mut(&mut self) -> &mut Unstructured {
        &mut self.0
    }
}

impl From<Unstructured> for CompositeResource {
    fn from(u: Unstructured) -> Self {
        Self(u)
    }
}

impl Object for CompositeResource {
    fn content(&self) -> Option<&Document> {
        Some(self.0.document())
    }

    fn content_mut(&mut self) -> Option<&mut Document> {
        Some(self.0.document_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    #[test]
    fn reference_setters_drop_empty_entries() {
        let mut xr = CompositeResource::new();
        let db = ObjectReference {
            api_version: Some("example.org/v1".into()),
            kind: Some("Database".into()),
            name: Some("db".into()),
            ..ObjectReference::default()
        };
        xr.set_resource_references(&[ObjectReference::default(), db.clone()]).unwrap();
        assert_eq!(xr.resource_references(), vec![db.clone()]);
        assert_eq!(
            xr.get_value("spec.resourceRefs").unwrap(),
            &json!([{"apiVersion": "example.org/v1", "kind": "Database", "name": "db"}])
        );

        xr.set_environment_config_references(&[ObjectReference { name: Some(String::new()), ..Default::default() }])
            .unwrap();
        assert!(xr.environment_config_references().is_empty());
        assert_eq!(xr.get_value("spec.environmentConfigRefs").unwrap(), &json!([]));
    }

    #[test]
    fn composition_fields_use_fixed_paths() {
        let mut xr = CompositeResource::new();
        let sel = LabelSelector {
            match_labels: Some(BTreeMap::from([("provider".to_string(), "aws".to_string())])),
            ..LabelSelector::default()
        };
        xr.set_composition_selector(&sel).unwrap();
        xr.set_composition_update_policy(UpdatePolicy::Manual).unwrap();
        xr.set_composition_revision_reference(&LocalObjectReference { name: Some("rev-1".into()) }).unwrap();
        xr.set_claim_reference(&ClaimReference {
            api_version: "example.org/v1".into(),
            kind: "Bucket".into(),
            name: "b".into(),
            namespace: "demo".into(),
        })
        .unwrap();

        assert_eq!(xr.get_string("spec.compositionSelector.matchLabels.provider").unwrap(), "aws");
        assert_eq!(xr.get_string("spec.compositionUpdatePolicy").unwrap(), "Manual");
        assert_eq!(xr.get_string("spec.compositionRevisionRef.name").unwrap(), "rev-1");
        assert_eq!(xr.composition_selector(), Some(sel));
        assert_eq!(xr.composition_update_policy(), Some(UpdatePolicy::Manual));
        assert_eq!(xr.claim_reference().map(|c| c.namespace), Some("demo".to_string()));
        assert_eq!(xr.composition_reference(), None);
        assert_eq!(xr.composition_revision_selector(), None);
    }

    #[test]
    fn last_published_time_lives_under_status() {
        let mut xr = CompositeResource::new();
        let t = DateTime::parse_from_rfc3339("2024-05-06T07:08:09Z").unwrap().with_timezone(&Utc);
        xr.set_connection_details_last_published_time(t).unwrap();
        assert!(matches!(xr.get_value("status.connectionDetails.lastPublishedTime"), Ok(Value::String(_))));
        assert_eq!(xr.connection_details_last_published_time(), Some(t));
    }
}
