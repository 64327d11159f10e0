//! Browser-facing pages rendered with Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers

pub mod handlers;
