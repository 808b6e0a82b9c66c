//! Inheritance-aware symbol resolution.
//!
//! A compiled reference records the *static* owner of a member, which may be
//! a subclass of the class that actually declares it. The mapping tree only
//! knows declaring classes, so a miss on the owner walks up the hierarchy
//! breadth-first:
//!
//! ```text
//! queue: [FooSubclass]
//!   FooSubclass  not in tree        → enqueue super/interfaces → [Foo, Runnable]
//!   Foo          declares doWork()V → "m1"
//! ```
//!
//! The most-derived candidate is always checked before its ancestors, so the
//! first hit is the override that wins. A visited set stops cycles and
//! interfaces reached along several paths.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::{AliasMap, ResolutionCache, ResolveError};
use crate::base::Name;
use crate::hierarchy::HierarchyIndex;
use crate::mapping::{ClassRef, MappingTree, MemberEntry, MemberKind, NamespaceId};

/// Which name of a resolved class is used to query the hierarchy index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HierarchyKey {
    /// The alias-resolved name that found the class in the tree.
    #[default]
    Resolved,
    /// The class's name in the destination namespace, when it has one.
    Target,
}

impl HierarchyKey {
    /// Parse `resolved` / `target` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "resolved" => Some(Self::Resolved),
            "target" => Some(Self::Target),
            _ => None,
        }
    }
}

/// Resolves type and member names from a source to a destination namespace.
///
/// Borrows everything it needs; cheap to create per module.
#[derive(Clone, Copy)]
pub struct SymbolResolver<'a> {
    tree: &'a MappingTree,
    hierarchy: &'a dyn HierarchyIndex,
    cache: &'a ResolutionCache,
    aliases: &'a AliasMap,
    src: NamespaceId,
    dst: NamespaceId,
    hierarchy_key: HierarchyKey,
}

impl<'a> SymbolResolver<'a> {
    /// Create a resolver from `src` to `dst`.
    ///
    /// Fails when `cache` was created for another tree.
    pub fn new(
        tree: &'a MappingTree,
        hierarchy: &'a dyn HierarchyIndex,
        cache: &'a ResolutionCache,
        aliases: &'a AliasMap,
        src: NamespaceId,
        dst: NamespaceId,
    ) -> Result<Self, ResolveError> {
        if cache.tree_id() != tree.id() {
            return Err(ResolveError::CacheTreeMismatch {
                cache: cache.tree_id(),
                tree: tree.id(),
            });
        }
        Ok(Self {
            tree,
            hierarchy,
            cache,
            aliases,
            src,
            dst,
            hierarchy_key: HierarchyKey::default(),
        })
    }

    /// Create a resolver between two namespaces given by name.
    pub fn for_namespaces(
        tree: &'a MappingTree,
        hierarchy: &'a dyn HierarchyIndex,
        cache: &'a ResolutionCache,
        aliases: &'a AliasMap,
        src: &str,
        dst: &str,
    ) -> Result<Self, ResolveError> {
        let src = tree.namespace_index(src)?;
        let dst = tree.namespace_index(dst)?;
        Self::new(tree, hierarchy, cache, aliases, src, dst)
    }

    pub fn with_hierarchy_key(mut self, key: HierarchyKey) -> Self {
        self.hierarchy_key = key;
        self
    }

    pub fn source_namespace(&self) -> NamespaceId {
        self.src
    }

    pub fn target_namespace(&self) -> NamespaceId {
        self.dst
    }

    /// Find a class by its (already aliased) name, trying `src` then `dst`.
    fn lookup_class(&self, name: &str) -> Option<ClassRef<'a>> {
        let tree = self.tree;
        let id = self.cache.get_or_compute(name, || {
            tree.class_by_name(name, self.src)
                .or_else(|| tree.class_by_name(name, self.dst))
                .map(|class| class.id())
        })?;
        Some(tree.class(id))
    }

    /// Destination name of a class, after alias substitution.
    ///
    /// `None` when the class is unmapped.
    pub fn resolve_type(&self, name: &str) -> Option<&'a str> {
        let aliased = self.aliases.resolve(name);
        self.lookup_class(aliased)?.name(self.dst)
    }

    /// Destination name of a method referenced through `owner`, or `name`
    /// unchanged when neither the owner nor any ancestor maps it.
    pub fn resolve_method<'n>(&self, owner: &str, name: &'n str, descriptor: &str) -> &'n str
    where
        'a: 'n,
    {
        self.find_member(MemberKind::Method, owner, name, descriptor)
            .unwrap_or(name)
    }

    /// Destination name of a field referenced through `owner`, or `name`
    /// unchanged when neither the owner nor any ancestor maps it.
    pub fn resolve_field<'n>(&self, owner: &str, name: &'n str, descriptor: &str) -> &'n str
    where
        'a: 'n,
    {
        self.find_member(MemberKind::Field, owner, name, descriptor)
            .unwrap_or(name)
    }

    /// Breadth-first search from `owner` up through its supertypes.
    pub fn find_member(
        &self,
        kind: MemberKind,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> Option<&'a str> {
        let mut queue: VecDeque<Name> = VecDeque::new();
        let mut visited: FxHashSet<Name> = FxHashSet::default();
        let start = Name::new(owner);
        visited.insert(start.clone());
        queue.push_back(start);

        while let Some(candidate) = queue.pop_front() {
            let aliased = self.aliases.resolve(&candidate);

            let hierarchy_name = match self.lookup_class(aliased) {
                Some(class) => {
                    let member = self.declared_member(class, kind, name, descriptor);
                    if let Some(mapped) = member.and_then(|m| m.name(self.dst)) {
                        trace!(
                            "[RESOLVE] {:?} '{}{}' declared on '{}' -> {}",
                            kind, name, descriptor, aliased, mapped
                        );
                        return Some(mapped);
                    }
                    match self.hierarchy_key {
                        HierarchyKey::Resolved => aliased,
                        HierarchyKey::Target => class.name(self.dst).unwrap_or(aliased),
                    }
                }
                None => candidate.as_str(),
            };

            if let Some(entry) = self.hierarchy.supertypes(hierarchy_name) {
                for parent in entry.supertypes() {
                    if visited.insert(parent.clone()) {
                        trace!("[RESOLVE] '{}' -> enqueue '{}'", hierarchy_name, parent);
                        queue.push_back(parent.clone());
                    }
                }
            }
        }

        debug!(
            "[RESOLVE] {:?} '{}{}' not mapped from '{}' ({} classes visited)",
            kind,
            name,
            descriptor,
            owner,
            visited.len()
        );
        None
    }

    fn declared_member(
        &self,
        class: ClassRef<'a>,
        kind: MemberKind,
        name: &str,
        descriptor: &str,
    ) -> Option<&'a MemberEntry> {
        match kind {
            MemberKind::Field => class.field(name, descriptor, self.src),
            MemberKind::Method => class.method(name, descriptor, self.src),
        }
    }
}
