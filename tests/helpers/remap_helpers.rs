//! Builders for resolvers and hierarchies over the shared fixtures.

use intermap::hierarchy::{HierarchyEntry, LazyHierarchyIndex, StaticHierarchy};
use intermap::rewrite::ClassModule;
use rustc_hash::FxHashMap;

/// Hierarchy of the game fixture plus mod classes extending it:
///
/// ```text
/// LivingEntity ─▶ Entity ─▶ java/lang/Object
///      │            └─▶ Tickable
/// mod/Zombie ─▶ LivingEntity
/// mod/Boss   ─▶ mod/Zombie
/// ```
pub fn game_hierarchy() -> StaticHierarchy {
    StaticHierarchy::new()
        .with_class(
            "com/example/Entity",
            Some("java/lang/Object"),
            ["com/example/Tickable"],
        )
        .with_class(
            "com/example/LivingEntity",
            Some("com/example/Entity"),
            Vec::<&str>::new(),
        )
        .with_class("mod/Zombie", Some("com/example/LivingEntity"), Vec::<&str>::new())
        .with_class("mod/Boss", Some("mod/Zombie"), Vec::<&str>::new())
}

/// A lazy index whose loader reads supertypes from in-memory modules, the
/// way a host would read them from class files.
pub fn lazy_hierarchy_from(
    modules: &[ClassModule],
) -> LazyHierarchyIndex<impl Fn(&str) -> Option<HierarchyEntry> + Send + Sync + use<>> {
    let entries: FxHashMap<String, HierarchyEntry> = modules
        .iter()
        .map(|module| (module.name.clone(), HierarchyEntry::from(module)))
        .collect();
    LazyHierarchyIndex::new(move |name: &str| entries.get(name).cloned())
}
