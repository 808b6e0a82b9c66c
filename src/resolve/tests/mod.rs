#![allow(clippy::unwrap_used, clippy::expect_used)]


use super::*;
use crate::hierarchy::StaticHierarchy;
use crate::mapping::{MappingReader, MappingTree};

pub(super) const MAPPINGS: &str = "v1\tnamed\ttarget
CLASS\tFoo\tC1
CLASS\tBase\tC0
CLASS\tIface\tI1
METHOD\tFoo\t()V\tdoWork\tm1
METHOD\tFoo\t()V\tunnamed\t
METHOD\tFoo\t()V\trender\tm_render_foo
METHOD\tBase\t()V\ttick\tm_tick
METHOD\tBase\t(I)V\ttick\tm_tick_i
METHOD\tBase\t()V\tunnamed\tm_unnamed
METHOD\tBase\t()V\trender\tm_render_base
FIELD\tBase\tI\tcount\tf_count
METHOD\tIface\t()Ljava/lang/String;\tdescribe\tm_describe
";

pub(super) struct Fixture {
    pub tree: MappingTree,
    pub hierarchy: StaticHierarchy,
    pub cache: ResolutionCache,
    pub aliases: AliasMap,
}

impl Fixture {
    pub fn new() -> Self {
        let tree = MappingReader::read_str(MAPPINGS).unwrap();
        let cache = ResolutionCache::new(&tree);
        let hierarchy = StaticHierarchy::new()
            .with_class("FooSubclass", Some("Foo"), Vec::<&str>::new())
            .with_class("Foo", Some("Base"), ["Iface"])
            .with_class("Base", Some("java/lang/Object"), Vec::<&str>::new());
        Self {
            tree,
            hierarchy,
            cache,
            aliases: AliasMap::new(),
        }
    }

    pub fn with_hierarchy(mut self, hierarchy: StaticHierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn with_aliases(mut self, aliases: AliasMap) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn resolver(&self) -> SymbolResolver<'_> {
        SymbolResolver::for_namespaces(
            &self.tree,
            &self.hierarchy,
            &self.cache,
            &self.aliases,
            "named",
            "target",
        )
        .unwrap()
    }
}
