//! Protobuf messages exchanged between the orchestrator and a composition
//! function.
//!
//! Two schema packages are served side by side: [`v1`] is canonical and
//! [`v1beta1`] exists for orchestrators that predate it. The two must stay
//! field-for-field identical, since the SDK bridges them by re-decoding wire
//! bytes rather than mapping types.

#![forbid(unsafe_code)]

#[allow(clippy::derive_partial_eq_without_eq, clippy::doc_markdown, missing_docs)]
pub mod v1;

#[allow(clippy::derive_partial_eq_without_eq, clippy::doc_markdown, missing_docs)]
pub mod v1beta1;

mod selector;

pub use prost::Message;
pub use prost_types::{value::Kind, Duration, ListValue, NullValue, Struct, Value};
