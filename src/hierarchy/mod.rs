//! Type hierarchy facts: superclass and interfaces per class.
//!
//! The resolver walks this index upward when a member is not declared on
//! the owner recorded at a reference site. The index is not owned by the
//! resolver and may be incomplete: an unknown class simply has no further
//! hierarchy to walk.
//!
//! ## Implementations
//!
//! - [`LazyHierarchyIndex`] - populated on demand from a [`HierarchyLoader`],
//!   each fact computed and cached once, safe to query from many threads
//! - [`StaticHierarchy`] - an eagerly built map, convenient for tests and
//!   for hosts that already know the whole hierarchy

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::base::Name;

/// Declared supertypes of one class, in the same namespace as its name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyEntry {
    pub super_name: Option<Name>,
    pub interfaces: Vec<Name>,
    /// The class is a rewrite definition (e.g. a mixin) rather than ordinary
    /// code and must not be remapped.
    pub excluded: bool,
}

impl HierarchyEntry {
    pub fn new<S: AsRef<str>>(super_name: Option<&str>, interfaces: impl IntoIterator<Item = S>) -> Self {
        Self {
            super_name: super_name.map(Name::new),
            interfaces: interfaces.into_iter().map(|i| Name::new(i.as_ref())).collect(),
            excluded: false,
        }
    }

    /// Mark this class as excluded from remapping.
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &Name> {
        self.super_name.iter().chain(self.interfaces.iter())
    }
}

/// Query interface over superclass/interface facts.
pub trait HierarchyIndex: Send + Sync {
    /// Supertypes of `name`, or `None` when nothing is known about it.
    fn supertypes(&self, name: &str) -> Option<Arc<HierarchyEntry>>;

    /// Whether `name` is a rewrite definition that must not be remapped.
    fn is_excluded_from_remap(&self, name: &str) -> bool {
        self.supertypes(name).is_some_and(|entry| entry.excluded)
    }
}

impl<T: HierarchyIndex + ?Sized> HierarchyIndex for Arc<T> {
    fn supertypes(&self, name: &str) -> Option<Arc<HierarchyEntry>> {
        (**self).supertypes(name)
    }

    fn is_excluded_from_remap(&self, name: &str) -> bool {
        (**self).is_excluded_from_remap(name)
    }
}

/// Produces hierarchy facts on demand, e.g. by reading a class from disk.
pub trait HierarchyLoader: Send + Sync {
    fn load(&self, name: &str) -> Option<HierarchyEntry>;
}

impl<F> HierarchyLoader for F
where
    F: Fn(&str) -> Option<HierarchyEntry> + Send + Sync,
{
    fn load(&self, name: &str) -> Option<HierarchyEntry> {
        self(name)
    }
}

/// Hierarchy index that loads each class at most once per name and caches
/// the result, including "unknown".
///
/// Loading happens outside the lock. Two threads racing on the same name
/// may both load it; the first insert wins and both see the same entry.
pub struct LazyHierarchyIndex<L> {
    loader: L,
    entries: RwLock<FxHashMap<Name, Option<Arc<HierarchyEntry>>>>,
}

impl<L: HierarchyLoader> LazyHierarchyIndex<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Number of names looked up so far (known or not).
    pub fn cached_len(&self) -> usize {
        self.entries.read().len()
    }
}

impl<L: HierarchyLoader> HierarchyIndex for LazyHierarchyIndex<L> {
    fn supertypes(&self, name: &str) -> Option<Arc<HierarchyEntry>> {
        if let Some(cached) = self.entries.read().get(name) {
            return cached.clone();
        }

        let loaded = self.loader.load(name).map(Arc::new);
        trace!("[HIERARCHY] loaded '{}': {:?}", name, loaded);
        self.entries
            .write()
            .entry(Name::new(name))
            .or_insert(loaded)
            .clone()
    }
}

/// Eagerly built hierarchy index.
#[derive(Debug, Clone, Default)]
pub struct StaticHierarchy {
    entries: FxHashMap<Name, Arc<HierarchyEntry>>,
}

impl StaticHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, entry: HierarchyEntry) {
        self.entries.insert(Name::new(name), Arc::new(entry));
    }

    /// Builder-style [`insert`](Self::insert) for a plain class.
    pub fn with_class<S: AsRef<str>>(
        mut self,
        name: &str,
        super_name: Option<&str>,
        interfaces: impl IntoIterator<Item = S>,
    ) -> Self {
        self.insert(name, HierarchyEntry::new(super_name, interfaces));
        self
    }

    /// Builder-style insert of a class excluded from remapping.
    pub fn with_excluded(mut self, name: &str) -> Self {
        let entry = match self.entries.get(name) {
            Some(existing) => HierarchyEntry::clone(existing).excluded(),
            None => HierarchyEntry::default().excluded(),
        };
        self.insert(name, entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HierarchyIndex for StaticHierarchy {
    fn supertypes(&self, name: &str) -> Option<Arc<HierarchyEntry>> {
        self.entries.get(name).cloned()
    }
}
