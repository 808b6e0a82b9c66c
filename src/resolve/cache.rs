//! Memoized class lookups for one mapping tree.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::Name;
use crate::mapping::{ClassId, MappingTree};

/// Caches alias-resolved class name → class lookup result, including
/// misses, for the lifetime of one [`MappingTree`].
///
/// Safe to share between threads rewriting different modules in parallel.
#[derive(Debug)]
pub struct ResolutionCache {
    tree_id: u64,
    entries: RwLock<FxHashMap<Name, Option<ClassId>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ResolutionCache {
    /// Create an empty cache bound to `tree`.
    pub fn new(tree: &MappingTree) -> Self {
        Self {
            tree_id: tree.id(),
            entries: RwLock::new(FxHashMap::default()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Id of the tree this cache belongs to.
    pub fn tree_id(&self) -> u64 {
        self.tree_id
    }

    /// Return the cached result for `name`, computing and storing it first
    /// if absent.
    pub fn get_or_compute(
        &self,
        name: &str,
        compute: impl FnOnce() -> Option<ClassId>,
    ) -> Option<ClassId> {
        if let Some(&cached) = self.entries.read().get(name) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return cached;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let computed = compute();
        *self
            .entries
            .write()
            .entry(Name::new(name))
            .or_insert(computed)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
