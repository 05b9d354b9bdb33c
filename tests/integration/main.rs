//! Integration tests for csfd-export
//!
//! These tests use wiremock to stand in for the site and run the export
//! pipeline end-to-end against it.

mod export_tests;
mod fetch_tests;
mod support;
