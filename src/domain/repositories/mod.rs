//! Repository trait definitions for the domain layer.
//!
//! # Available Repositories
//!
//! - [`MappingRepository`] - The uniqueness store for long URL / token mappings
//!
//! Implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are auto-generated via `mockall` for unit tests.

pub mod mapping_repository;

pub use mapping_repository::MappingRepository;

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
