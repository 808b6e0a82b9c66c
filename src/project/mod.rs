//! Startup and host integration.
//!
//! [`RemapConfig`] is decided first; [`RemapSession::initialize`] then
//! obtains the mapping table through a [`MappingSource`], builds the tree
//! and a [`RewriteDriver`](crate::rewrite::RewriteDriver), and
//! [`RemapSession::register_mods`] hands one transformation per class to
//! the host's [`TransformRegistry`].

mod config;
mod error;
pub mod mods;
mod session;
mod source;
mod transform;

#[cfg(test)]
mod tests;

pub use config::{
    ENV_CACHE_DIR, ENV_DEV, ENV_HIERARCHY_KEY, ENV_REMOTE_URL, ENV_RUNTIME_NAMESPACE, RemapConfig,
};
pub use error::{InitError, SourceError};
pub use mods::{
    ModDescriptor, ModEnumerator, RemapSettings, class_name_from_path, collect_class_entries,
    internal_name,
};
pub use session::{RegistrationReport, RemapSession};
pub use source::{CachedMappingSource, MappingFetcher, MappingSource};
#[cfg(feature = "remote")]
pub use source::HttpFetcher;
pub use transform::{TransformRegistry, TransformTable, Transformation};
