//! Common utilities for the Scour sanitizer.
//!
//! This crate provides shared infrastructure used by the sanitizer and its host binary:
//! - **Warning System** - colored, deduplicated terminal output for sanitizer issues

pub mod warning;
