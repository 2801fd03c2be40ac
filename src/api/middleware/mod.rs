//! HTTP middleware for request processing and protection.
//!
//! - [`tracing`] - Structured request/response logging
//! - [`limits`] - Request timeout and in-flight request cap

pub mod limits;
pub mod tracing;
