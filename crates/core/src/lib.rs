//! xfn core: error taxonomy and paved access to schemaless documents.

#![forbid(unsafe_code)]

mod error;
pub mod fieldpath;

pub use error::{DecodeReason, Error, Result};
pub use fieldpath::{Document, Paved, Segment};

pub mod prelude {
    pub use super::{Document, Error, Paved, Result};
}
