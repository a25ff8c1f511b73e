//! Resource model for composition functions.
//!
//! Every resource is a schemaless document with paved access. The envelopes
//! here pair a resource with what the pipeline tracks alongside it:
//! connection details and readiness.

#![forbid(unsafe_code)]

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use xfn_proto::v1;

pub mod composed;
pub mod composite;
pub mod condition;
pub mod convert;
pub mod reference;
pub mod unstructured;

pub use composed::ComposedResource;
pub use composite::CompositeResource;
pub use condition::{Condition, ConditionStatus};
pub use convert::Object;
pub use unstructured::Unstructured;

/// Sensitive key/value pairs a resource publishes.
pub type ConnectionDetails = HashMap<String, Vec<u8>>;

/// Identifies a composed resource within the pipeline. This is not the
/// resource's `metadata.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name(pub String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Whether a desired resource is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ready {
    #[default]
    Unspecified,
    True,
    False,
}

impl From<v1::Ready> for Ready {
    fn from(r: v1::Ready) -> Self {
        match r {
            v1::Ready::Unspecified => Ready::Unspecified,
            v1::Ready::True => Ready::True,
            v1::Ready::False => Ready::False,
        }
    }
}

impl From<Ready> for v1::Ready {
    fn from(r: Ready) -> Self {
        match r {
            Ready::Unspecified => v1::Ready::Unspecified,
            Ready::True => v1::Ready::True,
            Ready::False => v1::Ready::False,
        }
    }
}

/// The composite resource with its connection details and readiness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composite {
    pub resource: CompositeResource,
    pub connection_details: ConnectionDetails,
    pub ready: Ready,
}

/// A composed resource the function wants to exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesiredComposed {
    pub resource: ComposedResource,
    pub ready: Ready,
}

impl DesiredComposed {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A composed resource as it currently exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedComposed {
    pub resource: ComposedResource,
    pub connection_details: ConnectionDetails,
}

/// A resource fetched by the orchestrator because a function required it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Required {
    pub resource: Unstructured,
}

#[deprecated(note = "use Required")]
pub type Extra = Required;

/// Credentials supplied to a function.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Credentials {
    Data(HashMap<String, Vec<u8>>),
}

impl Credentials {
    pub fn data(&self) -> &HashMap<String, Vec<u8>> {
        match self {
            Credentials::Data(d) => d,
        }
    }
}
