//! Per-module rewrite entry point.

use std::sync::Arc;

use tracing::debug;

use super::module::ClassModule;
use super::remap::remap_module;
use super::RewriteError;
use crate::hierarchy::HierarchyIndex;
use crate::mapping::{MappingTree, NamespaceId};
use crate::resolve::{AliasMap, HierarchyKey, ResolutionCache, SymbolResolver};

/// Rewrites class modules from one namespace into another.
///
/// Holds the shared, read-only state of one mapping load. Clones are cheap
/// and may be handed to worker threads.
#[derive(Clone)]
pub struct RewriteDriver {
    tree: Arc<MappingTree>,
    hierarchy: Arc<dyn HierarchyIndex>,
    cache: Arc<ResolutionCache>,
    src: NamespaceId,
    dst: NamespaceId,
    hierarchy_key: HierarchyKey,
}

impl RewriteDriver {
    /// Create a driver from `src` to `dst` with a fresh resolution cache.
    pub fn new(
        tree: Arc<MappingTree>,
        hierarchy: Arc<dyn HierarchyIndex>,
        src: &str,
        dst: &str,
    ) -> Result<Self, RewriteError> {
        let cache = Arc::new(ResolutionCache::new(&tree));
        Self::with_cache(tree, hierarchy, cache, src, dst)
    }

    /// Create a driver that shares an existing cache. The cache must belong
    /// to `tree`.
    pub fn with_cache(
        tree: Arc<MappingTree>,
        hierarchy: Arc<dyn HierarchyIndex>,
        cache: Arc<ResolutionCache>,
        src: &str,
        dst: &str,
    ) -> Result<Self, RewriteError> {
        let empty = AliasMap::new();
        let resolver = SymbolResolver::for_namespaces(&tree, &*hierarchy, &cache, &empty, src, dst)?;
        let (src, dst) = (resolver.source_namespace(), resolver.target_namespace());
        Ok(Self {
            tree,
            hierarchy,
            cache,
            src,
            dst,
            hierarchy_key: HierarchyKey::default(),
        })
    }

    pub fn with_hierarchy_key(mut self, key: HierarchyKey) -> Self {
        self.hierarchy_key = key;
        self
    }

    pub fn tree(&self) -> &Arc<MappingTree> {
        &self.tree
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    pub fn hierarchy(&self) -> &Arc<dyn HierarchyIndex> {
        &self.hierarchy
    }

    /// Resolver for one module's aliases.
    pub fn resolver<'a>(&'a self, aliases: &'a AliasMap) -> Result<SymbolResolver<'a>, RewriteError> {
        let resolver = SymbolResolver::new(
            &self.tree,
            &*self.hierarchy,
            &self.cache,
            aliases,
            self.src,
            self.dst,
        )?;
        Ok(resolver.with_hierarchy_key(self.hierarchy_key))
    }

    /// Return a remapped copy of `module`.
    pub fn rewrite(&self, module: &ClassModule, aliases: &AliasMap) -> Result<ClassModule, RewriteError> {
        let resolver = self.resolver(aliases)?;
        let rewritten = remap_module(module, &resolver)?;
        debug!(
            "[REWRITE] '{}' -> '{}' ({} fields, {} methods)",
            module.name,
            rewritten.name,
            rewritten.fields.len(),
            rewritten.methods.len()
        );
        Ok(rewritten)
    }

    /// Rewrite `module` in place.
    ///
    /// Members and reflective metadata are cleared before the rewritten
    /// module is absorbed, so nothing that named the old symbols survives.
    /// On error `module` is not modified.
    pub fn rewrite_in_place(&self, module: &mut ClassModule, aliases: &AliasMap) -> Result<(), RewriteError> {
        let rewritten = self.rewrite(module, aliases)?;
        module.clear_members();
        module.clear_reflective_metadata();
        module.absorb(rewritten);
        Ok(())
    }
}
