//! Well-known pipeline context keys.

/// Context key under which the orchestrator passes the environment.
pub const KEY_ENVIRONMENT: &str = "apiextensions.crossplane.io/environment";
