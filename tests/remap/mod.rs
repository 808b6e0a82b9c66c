//! End-to-end remapping tests
//!
//! - Resolution properties over a realistic mapping slice
//! - Startup through the on-disk mapping cache
//! - Registration and in-place rewriting of mod classes

#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod tests_properties;
pub mod tests_startup;
