//! SDK for writing composition functions.
//!
//! A function implements [`FunctionRunner`]: it receives the observed and
//! desired state of a composite resource, and returns the desired state it
//! wants along with results and conditions. [`request`] reads typed views out
//! of a request; [`response`], [`result`] and [`condition`] build the reply.
//! [`beta::serve_beta`] lets the same function answer orchestrators that still
//! speak the `v1beta1` schema.

#![forbid(unsafe_code)]

use std::sync::Arc;

pub mod beta;
pub mod condition;
pub mod config;
pub mod context;
pub mod logging;
pub mod request;
pub mod response;
pub mod result;

pub use xfn_core::{Document, Error, Paved};
pub use xfn_proto as proto;
pub use xfn_proto::v1;
pub use xfn_resource as resource;

/// Functions log through `tracing`; [`logging::init`] installs the subscriber.
pub use tracing;

/// A composition function.
#[async_trait::async_trait]
pub trait FunctionRunner: Send + Sync {
    async fn run_function(&self, req: v1::RunFunctionRequest) -> anyhow::Result<v1::RunFunctionResponse>;
}

#[async_trait::async_trait]
impl<F: FunctionRunner + ?Sized> FunctionRunner for Arc<F> {
    async fn run_function(&self, req: v1::RunFunctionRequest) -> anyhow::Result<v1::RunFunctionResponse> {
        (**self).run_function(req).await
    }
}
