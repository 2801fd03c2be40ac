//! Utility functions for token generation and URL validation.
//!
//! - [`token_generator`] - Random short token generation
//! - [`url_validator`] - Long URL syntax checks

pub mod token_generator;
pub mod url_validator;
