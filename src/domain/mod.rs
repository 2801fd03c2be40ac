//! Domain layer containing business entities and storage contracts.
//!
//! This module defines the data model of the shortener, the uniqueness store
//! interface, and the error taxonomy shared by every layer above it. It has no
//! dependencies on infrastructure or presentation code.
//!
//! # Architecture
//!
//! - [`entities`] - The persisted [`entities::Mapping`] and its creation input
//! - [`repositories`] - Uniqueness store trait implemented by infrastructure
//! - [`errors`] - Store and shortening failures
//!
//! # Shortening Flow
//!
//! 1. [`crate::application::services::ShortenerService`] validates the long URL
//! 2. An existing mapping is looked up by long URL and returned as-is
//! 3. Otherwise random tokens are inserted until the store accepts one
//! 4. Store uniqueness violations drive the bounded retry and never escape it

pub mod entities;
pub mod errors;
pub mod repositories;
