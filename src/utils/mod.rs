//! Helpers shared across layers:
//!
//! - [`codec`] - Base58 key encoding and wish validation
//! - [`url_validator`] - Long URL validation
//! - [`db_error`] - PostgreSQL error classification

pub mod codec;
pub mod db_error;
pub mod url_validator;
