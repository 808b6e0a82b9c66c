//! Mapping tables: parsing tiny files into a [`MappingTree`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │   Tiny v1    │     │   Tiny v2    │
//! └──────┬───────┘     └──────┬───────┘
//!        │                    │
//!        ▼                    ▼
//! ┌──────────────────────────────────────────┐
//! │  MappingReader (detect_format, ≤4096 B)  │
//! └──────────────────────────────────────────┘
//!        │
//!        ▼
//! ┌──────────────────────────────────────────┐
//! │  MappingTreeBuilder → MappingTree        │
//! │  - one name per namespace                │
//! │  - per-namespace class/member indices    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! A load is all-or-nothing: any error aborts it and no partial tree is
//! returned.

mod error;
mod format;
mod tiny_v1;
mod tiny_v2;
mod tree;

pub use error::MappingError;
pub use format::{MappingFormat, MappingReader, detect_format};
pub use tree::{
    ClassId, ClassRef, MappingTree, MappingTreeBuilder, MemberEntry, MemberKind, NamespaceId,
    QualifiedMember,
};

#[cfg(test)]
mod tests;
