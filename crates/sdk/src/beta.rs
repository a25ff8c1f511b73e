//! Serving `v1beta1` callers with a `v1` function.
//!
//! The two schema packages are wire-identical, so a message of one decodes
//! as the other. The shim relies on exactly that: encode, decode, call,
//! encode, decode.

use std::fmt;

use prost::Message;
use xfn_proto::{v1, v1beta1};

use crate::FunctionRunner;

/// A composition function written against the legacy schema.
#[async_trait::async_trait]
pub trait BetaFunctionRunner: Send + Sync {
    async fn run_function(
        &self,
        req: v1beta1::RunFunctionRequest,
    ) -> anyhow::Result<v1beta1::RunFunctionResponse>;
}

/// Which message was being transcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The legacy request on its way to the function.
    Request,
    /// The function's response on its way back to the legacy caller.
    Response,
}

impl Direction {
    pub fn from_schema(self) -> &'static str {
        match self {
            Direction::Request => "v1beta1 RunFunctionRequest",
            Direction::Response => "v1 RunFunctionResponse",
        }
    }

    pub fn into_schema(self) -> &'static str {
        match self {
            Direction::Request => "v1 RunFunctionRequest",
            Direction::Response => "v1beta1 RunFunctionResponse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Request => "request",
            Direction::Response => "response",
        })
    }
}

/// A failure of the shim itself, never of the wrapped function.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("cannot marshal {} to protobuf bytes", .0.from_schema())]
    Marshal(Direction, #[source] prost::EncodeError),
    #[error("cannot unmarshal {} protobuf bytes into {}", .0.from_schema(), .0.into_schema())]
    Unmarshal(Direction, #[source] prost::DecodeError),
}

impl TranscodeError {
    pub fn direction(&self) -> Direction {
        match self {
            TranscodeError::Marshal(d, _) | TranscodeError::Unmarshal(d, _) => *d,
        }
    }
}

/// Re-decode `from` as `T` by way of its wire encoding.
pub fn transcode<S, T>(from: &S, direction: Direction) -> Result<T, TranscodeError>
where
    S: Message,
    T: Message + Default,
{
    let mut buf = Vec::with_capacity(from.encoded_len());
    from.encode(&mut buf).map_err(|e| TranscodeError::Marshal(direction, e))?;
    T::decode(buf.as_slice()).map_err(|e| TranscodeError::Unmarshal(direction, e))
}

/// Wraps a `v1` function so it can serve `v1beta1` requests.
#[derive(Debug, Clone)]
pub struct BetaServer<F> {
    inner: F,
}

impl<F: FunctionRunner> BetaServer<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

pub fn serve_beta<F: FunctionRunner>(inner: F) -> BetaServer<F> {
    BetaServer::new(inner)
}

#[async_trait::async_trait]
impl<F: FunctionRunner> BetaFunctionRunner for BetaServer<F> {
    /// Errors from the wrapped function come back as they were returned.
    async fn run_function(
        &self,
        req: v1beta1::RunFunctionRequest,
    ) -> anyhow::Result<v1beta1::RunFunctionResponse> {
        let req: v1::RunFunctionRequest = transcode(&req, Direction::Request)?;
        let rsp = self.inner.run_function(req).await?;
        Ok(transcode(&rsp, Direction::Response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_both_schemas() {
        let cause = v1::RequestMeta::decode(&[0x0a][..]).unwrap_err();
        let e = TranscodeError::Unmarshal(Direction::Request, cause);
        assert_eq!(e.to_string(), "cannot unmarshal v1beta1 RunFunctionRequest protobuf bytes into v1 RunFunctionRequest");
        assert_eq!(e.direction(), Direction::Request);
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn garbage_bytes_fail_as_unmarshal() {
        // A lone field key with no value.
        let junk: Vec<u8> = vec![0x0a]; // google.protobuf.BytesValue in prost 0.12
        let out: Result<v1::RunFunctionRequest, _> = transcode(&junk, Direction::Request);
        assert!(matches!(out, Err(TranscodeError::Unmarshal(Direction::Request, _))));
    }

    #[test]
    fn messages_decode_across_schema_versions() {
        let req = v1beta1::RunFunctionRequest {
            meta: Some(v1beta1::RequestMeta { tag: "t".into() }),
            ..Default::default()
        };
        let out: v1::RunFunctionRequest = transcode(&req, Direction::Request).unwrap();
        assert_eq!(out.meta.map(|m| m.tag), Some("t".to_string()));
    }
}
