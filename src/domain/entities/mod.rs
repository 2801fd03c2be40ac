//! Core domain entities.
//!
//! - [`Mapping`] - A persisted long URL to short token pairing
//! - [`NewMapping`] - Input for inserting a mapping

pub mod mapping;

pub use mapping::{Mapping, NewMapping};
