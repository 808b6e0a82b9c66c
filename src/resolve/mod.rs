//! Symbol resolution: mapping names found in a module to the target namespace.
//!
//! ## Key Types
//!
//! - [`AliasMap`] - Per-module type name substitution, applied before lookup
//! - [`ResolutionCache`] - Shared memo of class lookups, misses included
//! - [`SymbolResolver`] - Type/method/field resolution with hierarchy walk
//!
//! ```text
//! reference (owner, name, desc)
//!     │
//!     ▼
//! AliasMap::resolve(owner)
//!     │
//!     ▼
//! ResolutionCache ──miss──► MappingTree::class_by_name (src, then dst)
//!     │
//!     ▼
//! member declared? ──no──► HierarchyIndex::supertypes → enqueue
//!     │
//!     ▼
//! target-namespace name (or the original name)
//! ```

mod alias;
mod cache;
mod error;
mod resolver;

pub use alias::AliasMap;
pub use cache::ResolutionCache;
pub use error::ResolveError;
pub use resolver::{HierarchyKey, SymbolResolver};

#[cfg(test)]
mod tests;
