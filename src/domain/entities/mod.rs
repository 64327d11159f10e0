//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Link`] - A key to URL mapping
//! - [`AccessEvent`] - One resolution of a link
//! - [`ApiKey`] - A caller credential with its [`Quota`]
//!
//! Creation input for links lives in [`NewLink`].

pub mod access_event;
pub mod api_key;
pub mod link;

pub use access_event::AccessEvent;
pub use api_key::{API_KEY_LENGTH, ApiKey, Quota};
pub use link::{Link, NewLink};
