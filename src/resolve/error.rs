//! Error types for resolver construction.

use thiserror::Error;

use crate::mapping::MappingError;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The cache was created for a different mapping tree.
    #[error("Resolution cache belongs to tree {cache}, not tree {tree}")]
    CacheTreeMismatch { cache: u64, tree: u64 },

    /// A namespace name did not resolve against the tree.
    #[error(transparent)]
    Mapping(#[from] MappingError),
}
