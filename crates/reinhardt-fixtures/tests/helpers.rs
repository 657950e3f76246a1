//! Test helpers for reinhardt-fixtures integration tests.
//!
//! This module provides a populated blog store and temporary project
//! directories laid out the way the fixture commands expect.

#[path = "helpers/blog_store.rs"]
pub mod blog_store;
