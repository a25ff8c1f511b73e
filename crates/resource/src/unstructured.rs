//! The generic document-backed resource.

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use xfn_core::{Document, Error, Paved, Result};

use crate::condition::Condition;
use crate::convert::Object;
use crate::reference::{PublishConnectionDetailsTo, SecretReference};

/// A Kubernetes-style resource of any kind, held as a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unstructured {
    paved: Paved,
}

impl Unstructured {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: Document) -> Self {
        Self { paved: Paved::new(doc) }
    }

    pub fn document(&self) -> &Document {
        self.paved.as_document()
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.paved.as_document_mut()
    }

    pub fn into_document(self) -> Document {
        self.paved.into_document()
    }

    pub fn paved(&self) -> &Paved {
        &self.paved
    }

    pub fn paved_mut(&mut self) -> &mut Paved {
        &mut self.paved
    }

    // Identity metadata. Missing or mistyped values read as empty.

    pub fn api_version(&self) -> String {
        self.string_or_empty("apiVersion")
    }

    pub fn set_api_version(&mut self, api_version: &str) {
        self.document_mut().insert("apiVersion".into(), Value::String(api_version.into()));
    }

    pub fn kind(&self) -> String {
        self.string_or_empty("kind")
    }

    pub fn set_kind(&mut self, kind: &str) {
        self.document_mut().insert("kind".into(), Value::String(kind.into()));
    }

    pub fn name(&self) -> String {
        self.string_or_empty("metadata.name")
    }

    pub fn set_name(&mut self, name: &str) {
        self.set_metadata("name", Value::String(name.into()));
    }

    pub fn generate_name(&self) -> String {
        self.string_or_empty("metadata.generateName")
    }

    pub fn set_generate_name(&mut self, prefix: &str) {
        self.set_metadata("generateName", Value::String(prefix.into()));
    }

    pub fn namespace(&self) -> String {
        self.string_or_empty("metadata.namespace")
    }

    pub fn set_namespace(&mut self, namespace: &str) {
        self.set_metadata("namespace", Value::String(namespace.into()));
    }

    pub fn uid(&self) -> String {
        self.string_or_empty("metadata.uid")
    }

    pub fn generation(&self) -> i64 {
        self.paved.get_integer("metadata.generation").unwrap_or_default()
    }

    pub fn labels(&self) -> BTreeMap<String, String> {
        self.paved.get_string_object("metadata.labels").unwrap_or_default()
    }

    /// Replace all labels. An empty map removes the field.
    pub fn set_labels(&mut self, labels: BTreeMap<String, String>) {
        self.set_string_map("labels", labels);
    }

    pub fn annotations(&self) -> BTreeMap<String, String> {
        self.paved.get_string_object("metadata.annotations").unwrap_or_default()
    }

    /// Replace all annotations. An empty map removes the field.
    pub fn set_annotations(&mut self, annotations: BTreeMap<String, String>) {
        self.set_string_map("annotations", annotations);
    }

    // Paved access.

    pub fn get_value(&self, path: &str) -> Result<&Value> {
        self.paved.get_value(path)
    }

    pub fn get_value_into<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.paved.get_value_into(path)
    }

    pub fn get_string(&self, path: &str) -> Result<String> {
        self.paved.get_string(path)
    }

    pub fn get_bool(&self, path: &str) -> Result<bool> {
        self.paved.get_bool(path)
    }

    pub fn get_number(&self, path: &str) -> Result<f64> {
        self.paved.get_number(path)
    }

    pub fn get_integer(&self, path: &str) -> Result<i64> {
        self.paved.get_integer(path)
    }

    pub fn get_string_array(&self, path: &str) -> Result<Vec<String>> {
        self.paved.get_string_array(path)
    }

    pub fn get_string_object(&self, path: &str) -> Result<BTreeMap<String, String>> {
        self.paved.get_string_object(path)
    }

    pub fn set_value<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> Result<()> {
        self.paved.set_value(path, value)
    }

    pub fn set_string(&mut self, path: &str, value: &str) -> Result<()> {
        self.paved.set_string(path, value)
    }

    pub fn set_bool(&mut self, path: &str, value: bool) -> Result<()> {
        self.paved.set_bool(path, value)
    }

    pub fn set_integer(&mut self, path: &str, value: i64) -> Result<()> {
        self.paved.set_integer(path, value)
    }

    pub fn delete_field(&mut self, path: &str) -> Result<()> {
        self.paved.delete_field(path)
    }

    // Status.

    /// The condition of `type`, or an `Unknown` one when there is none.
    pub fn get_condition(&self, r#type: &str) -> Condition {
        self.conditions()
            .into_iter()
            .find(|c| c.r#type == r#type)
            .unwrap_or_else(|| Condition::unknown(r#type))
    }

    /// Stored conditions. Entries that do not decode are skipped.
    pub fn conditions(&self) -> Vec<Condition> {
        match self.paved.get_value("status.conditions") {
            Ok(Value::Array(items)) => items.iter().filter_map(|v| Condition::deserialize(v).ok()).collect(),
            _ => Vec::new(),
        }
    }

    /// Upsert conditions by type.
    ///
    /// Only the entry of a matching type is replaced, and only when it
    /// differs in more than its transition time. Every other stored entry is
    /// kept as it is, including ones that do not decode.
    pub fn set_conditions(&mut self, conditions: impl IntoIterator<Item = Condition>) -> Result<()> {
        const PATH: &str = "status.conditions";
        let mut stored = match self.paved.get_value(PATH) {
            Ok(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        for c in conditions {
            let slot = stored.iter().position(|v| v.get("type").and_then(Value::as_str) == Some(c.r#type.as_str()));
            if let Some(i) = slot {
                if Condition::deserialize(&stored[i]).is_ok_and(|old| old.equal(&c)) {
                    continue;
                }
            }
            let v = serde_json::to_value(&c).map_err(|e| Error::encode(PATH, e))?;
            match slot {
                Some(i) => stored[i] = v,
                None => stored.push(v),
            }
        }
        self.paved.set_value(PATH, &stored)
    }

    pub fn observed_generation(&self) -> i64 {
        self.paved.get_integer("status.observedGeneration").unwrap_or_default()
    }

    pub fn set_observed_generation(&mut self, generation: i64) -> Result<()> {
        self.paved.set_integer("status.observedGeneration", generation)
    }

    pub fn write_connection_secret_to_reference(&self) -> Option<SecretReference> {
        self.paved.get_value_into("spec.writeConnectionSecretToRef").ok()
    }

    pub fn set_write_connection_secret_to_reference(&mut self, r: &SecretReference) -> Result<()> {
        self.paved.set_value("spec.writeConnectionSecretToRef", r)
    }

    pub fn publish_connection_details_to(&self) -> Option<PublishConnectionDetailsTo> {
        self.paved.get_value_into("spec.publishConnectionDetailsTo").ok()
    }

    pub fn set_publish_connection_details_to(&mut self, to: &PublishConnectionDetailsTo) -> Result<()> {
        self.paved.set_value("spec.publishConnectionDetailsTo", to)
    }

    fn string_or_empty(&self, path: &str) -> String {
        self.paved.get_string(path).unwrap_or_default()
    }

    // A non-object metadata member is replaced.
    fn set_metadata(&mut self, key: &str, value: Value) {
        let doc = self.document_mut();
        match doc.get_mut("metadata") {
            Some(Value::Object(m)) => {
                m.insert(key.into(), value);
            }
            _ => {
                let mut m = Document::new();
                m.insert(key.into(), value);
                doc.insert("metadata".into(), Value::Object(m));
            }
        }
    }

    fn set_string_map(&mut self, key: &str, map: BTreeMap<String, String>) {
        if map.is_empty() {
            if let Some(Value::Object(m)) = self.document_mut().get_mut("metadata") {
                m.remove(key);
            }
            return;
        }
        let m = map.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
        self.set_metadata(key, Value::Object(m));
    }
}

impl From<Document> for Unstructured {
    fn from(doc: Document) -> Self {
        Self::from_document(doc)
    }
}

impl Object for Unstructured {
    fn content(&self) -> Option<&Document> {
        Some(self.document())
    }

    fn content_mut(&mut self) -> Option<&mut Document> {
        Some(self.document_mut())
    }
}
