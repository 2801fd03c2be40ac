//! HTTP layer translating requests into shortener operations.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for JSON requests and responses
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing, timeout and concurrency limiting layers
//! - [`routes`] - JSON API route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
