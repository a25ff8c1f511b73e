//! Error taxonomy shared by every SDK crate.

use std::fmt;

/// Errors returned while reading, writing or converting resource documents.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A field path did not resolve to a value.
    #[error("{0}: no such field")]
    FieldNotFound(String),

    /// A named entity (for example a credential) is absent.
    #[error("{kind} {name:?} not found")]
    NotFound { kind: &'static str, name: String },

    /// A value exists but has the wrong kind.
    #[error("{path}: not {expected}")]
    TypeMismatch { path: String, expected: &'static str },

    #[error("invalid field path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// Wire or document content could not be turned into the target shape.
    #[error("cannot decode {target}: {reason}")]
    Decode { target: String, reason: DecodeReason },

    /// An in-memory value could not be turned into its wire shape.
    #[error("cannot encode {target}: {message}")]
    Encode { target: String, message: String },

    /// A tagged-union variant this SDK does not understand.
    #[error("credentials {name:?} use an unsupported source")]
    UnsupportedSource { name: String },
}

/// Why a decode failed.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeReason {
    /// Strict decoding found members the target type does not declare.
    UnknownFields(Vec<String>),
    Malformed(String),
    /// NaN or infinity, which JSON documents cannot hold.
    NonFinite,
}

impl fmt::Display for DecodeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeReason::UnknownFields(fields) => write!(f, "unknown fields [{}]", fields.join(", ")),
            DecodeReason::Malformed(msg) => f.write_str(msg),
            DecodeReason::NonFinite => f.write_str("non-finite number"),
        }
    }
}

impl Error {
    pub fn decode(target: impl Into<String>, reason: DecodeReason) -> Self {
        Self::Decode { target: target.into(), reason }
    }

    pub fn encode(target: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Encode { target: target.into(), message: message.to_string() }
    }

    /// True for both a missing field and a missing named entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FieldNotFound(_) | Error::NotFound { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// True when strict decoding rejected unknown members.
    pub fn is_unknown_fields(&self) -> bool {
        matches!(self, Error::Decode { reason: DecodeReason::UnknownFields(_), .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_path() {
        let e = Error::TypeMismatch { path: "spec.widgets".into(), expected: "an integer" };
        assert_eq!(e.to_string(), "spec.widgets: not an integer");
        assert!(e.is_type_mismatch());

        let e = Error::FieldNotFound("spec.list[2]".into());
        assert_eq!(e.to_string(), "spec.list[2]: no such field");
        assert!(e.is_not_found());
    }

    #[test]
    fn decode_reason_lists_unknown_fields() {
        let e = Error::decode("Input", DecodeReason::UnknownFields(vec!["spec.extra".into(), "bogus".into()]));
        assert_eq!(e.to_string(), "cannot decode Input: unknown fields [spec.extra, bogus]");
        assert!(e.is_unknown_fields());
        assert!(!Error::decode("Input", DecodeReason::NonFinite).is_unknown_fields());
    }

    #[test]
    fn named_not_found_quotes_the_name() {
        let e = Error::NotFound { kind: "credentials", name: "db".into() };
        assert_eq!(e.to_string(), "credentials \"db\" not found");
        assert!(e.is_not_found());
    }
}
