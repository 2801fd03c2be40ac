//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory mapping stores
//! - [`telemetry`] - Tracing subscriber setup

pub mod persistence;
pub mod telemetry;
