//! Class module rewriting.
//!
//! ```text
//! ClassModule ──remap_module──▶ ClassModule'
//!                   │
//!                   ▼
//!              dyn Remapper  (SymbolResolver: tree + hierarchy + cache + aliases)
//! ```
//!
//! [`RewriteDriver`] ties a resolver to one mapping load and exposes the
//! pure [`rewrite`](RewriteDriver::rewrite) and the in-place variant used by
//! registered transforms.

mod driver;
mod error;
pub mod module;
mod remap;
mod remapper;

#[cfg(test)]
mod tests;

pub use driver::RewriteDriver;
pub use error::RewriteError;
pub use module::{
    Annotation, AnnotationValue, ClassModule, FieldNode, FieldOp, InnerClass, Instruction,
    InvokeOp, MethodNode, RawAttribute, TypeOp,
};
pub use remap::remap_module;
pub use remapper::Remapper;
