use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use xfn_core::{Document, Error, Result};

use crate::convert::Object;
use crate::unstructured::Unstructured;

/// A resource the composite is composed of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComposedResource(Unstructured);

impl ComposedResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: Document) -> Self {
        Self(Unstructured::from_document(doc))
    }

    /// Build a composed resource from a typed Kubernetes object.
    ///
    /// apiVersion and kind come from the type. The server-owned
    /// `metadata.generation` is dropped, and so is a metadata block left
    /// empty, so the result carries no zero-valued metadata.
    ///
    /// Content that is already a document (an [`Unstructured`] or a
    /// [`Document`]) converts with `From` instead, which keeps it as is.
    pub fn from_resource<K>(obj: &K) -> Result<Self>
    where
        K: k8s_openapi::Resource + Serialize,
    {
        let target = K::KIND;
        let mut doc = match serde_json::to_value(obj).map_err(|e| Error::encode(target, e))? {
            Value::Object(m) => m,
            _ => return Err(Error::encode(target, "expected a JSON object")),
        };
        doc.insert("apiVersion".into(), Value::String(K::API_VERSION.into()));
        doc.insert("kind".into(), Value::String(K::KIND.into()));
        strip_metadata(&mut doc);
        Ok(Self::from_document(doc))
    }

    pub fn into_unstructured(self) -> Unstructured {
        self.0
    }
}

fn strip_metadata(doc: &mut Document) {
    let empty = match doc.get_mut("metadata") {
        Some(Value::Object(meta)) => {
            meta.remove("generation");
            meta.retain(|_, v| !is_zero(v));
            meta.is_empty()
        }
        Some(Value::Null) => true,
        _ => false,
    };
    if empty {
        doc.remove("metadata");
    }
}

fn is_zero(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(m) => m.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

impl Deref for ComposedResource {
    type Target = Unstructured;

    fn deref(&self) -> &Unstructured {
        &self.0
    }
}

impl DerefMut for ComposedResource {
    fn deref_mut(&mut self) -> &mut Unstructured {
        &mut self.0
    }
}

impl From<Document> for ComposedResource {
    fn from(doc: Document) -> Self {
        Self::from_document(doc)
    }
}

impl From<Unstructured> for ComposedResource {
    fn from(u: Unstructured) -> Self {
        Self(u)
    }
}

impl Object for ComposedResource {
    fn content(&self) -> Option<&Document> {
        Some(self.0.document())
    }

    fn content_mut(&mut self) -> Option<&mut Document> {
        Some(self.0.document_mut())
    }
}
