//! URL handling module for csfd-export
//!
//! This module builds the listing endpoints for each export mode and resolves
//! links found on listing pages against the site origin.

mod endpoints;

pub use endpoints::{login_url, resolve_link, Listing};
