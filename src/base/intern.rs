//! Name interner for mapping tables.
//!
//! Uses [`SmolStr`] for cheap cloning: short names are stored inline and long
//! names share one reference-counted allocation. The interner deduplicates
//! names so the thousands of repeated owner and descriptor strings in a
//! mapping table share the same allocation.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// An interned name - cheap to clone, `Send + Sync`.
pub type Name = SmolStr;

/// Name interner that deduplicates strings.
///
/// Interning a string returns a [`Name`] that can be cheaply cloned.
/// If the same string is interned multiple times, clones of the same
/// allocation are returned.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    names: FxHashSet<Name>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning a cheap-to-clone name.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(existing) = self.names.get(s) {
            existing.clone()
        } else {
            let name = Name::new(s);
            self.names.insert(name.clone());
            name
        }
    }

    /// Intern an owned string, reusing the existing name when present.
    pub fn intern_string(&mut self, s: String) -> Name {
        if let Some(existing) = self.names.get(s.as_str()) {
            existing.clone()
        } else {
            let name = Name::from(s);
            self.names.insert(name.clone());
            name
        }
    }

    /// Number of unique names interned.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no names have been interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
