//! # intermap
//!
//! Remaps the symbolic names inside compiled class modules from one naming
//! namespace to another, driven by a tiny mapping table.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Config, mapping source + disk cache, mod enumeration, session
//!   ↓
//! rewrite   → Remapper trait, descriptors, ClassModule, RewriteDriver
//!   ↓
//! resolve   → AliasMap, ResolutionCache, SymbolResolver
//!   ↓
//! hierarchy → Superclass/interface index (lazy, external)
//!   ↓
//! mapping   → Tiny v1/v2 readers, format detection, MappingTree
//!   ↓
//! base      → Primitives (Name interning, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → mapping → hierarchy → resolve → rewrite → project)
// ============================================================================

/// Foundation types: Name interning, constants
pub mod base;

/// Mapping tables: format detection, tiny readers, the mapping tree
pub mod mapping;

/// Type hierarchy facts used for inherited member lookup
pub mod hierarchy;

/// Symbol resolution across namespaces
pub mod resolve;

/// Class module model and the rewrite pass
pub mod rewrite;

/// Startup: configuration, mapping acquisition, mod registration
pub mod project;

// Re-export foundation types
pub use base::{Interner, Name};

pub use hierarchy::{HierarchyEntry, HierarchyIndex, LazyHierarchyIndex, StaticHierarchy};
pub use mapping::{MappingError, MappingFormat, MappingReader, MappingTree, NamespaceId};
pub use project::{InitError, RemapConfig, RemapSession};
pub use resolve::{AliasMap, ResolutionCache, SymbolResolver};
pub use rewrite::{ClassModule, Remapper, RewriteDriver, RewriteError};
