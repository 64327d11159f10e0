//! Domain layer containing business entities and the store contract.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store capability as repository traits
//!
//! The domain layer has no dependency on infrastructure or presentation.
//! Business rules live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
