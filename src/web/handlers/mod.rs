//! HTML template rendering handlers.

mod link_info;

pub use link_info::{LinkInfoTemplate, link_info_handler};
