//! Foundation types for the intermap toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Name`], [`Interner`] - Interned symbol names
//! - [`remap_descriptor`] - Field/method descriptor walking
//! - Domain constants (namespaces, detection limits, cache layout)
//!
//! This module has NO dependencies on other intermap modules.

pub mod constants;
mod descriptor;
mod intern;

pub use descriptor::{DescriptorError, descriptor_classes, remap_descriptor, validate_descriptor};
pub use intern::{Interner, Name};
