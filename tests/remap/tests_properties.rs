//! Resolution properties that must hold for any mapping table.

use crate::helpers::fixtures::{GAME_TREE, GAME_V1, GAME_V2};
use crate::helpers::remap_helpers::game_hierarchy;
use intermap::hierarchy::StaticHierarchy;
use intermap::{AliasMap, MappingReader, ResolutionCache, SymbolResolver};

fn resolver<'a>(
    hierarchy: &'a StaticHierarchy,
    cache: &'a ResolutionCache,
    aliases: &'a AliasMap,
) -> SymbolResolver<'a> {
    SymbolResolver::for_namespaces(&GAME_TREE, hierarchy, cache, aliases, "named", "intermediary")
        .unwrap()
}

#[test]
fn test_every_declared_member_resolves_on_its_owner() {
    let hierarchy = game_hierarchy();
    let cache = ResolutionCache::new(&GAME_TREE);
    let aliases = AliasMap::new();
    let resolver = resolver(&hierarchy, &cache, &aliases);
    let target = resolver.target_namespace();

    for class in GAME_TREE.classes() {
        let owner = class.source_name();
        for method in class.methods() {
            assert_eq!(
                resolver.resolve_method(owner, method.source_name(), method.descriptor()),
                method.name(target).unwrap()
            );
        }
        for field in class.fields() {
            assert_eq!(
                resolver.resolve_field(owner, field.source_name(), field.descriptor()),
                field.name(target).unwrap()
            );
        }
    }
}

#[test]
fn test_inherited_members_resolve_through_hierarchy() {
    let hierarchy = game_hierarchy();
    let cache = ResolutionCache::new(&GAME_TREE);
    let aliases = AliasMap::new();
    let resolver = resolver(&hierarchy, &cache, &aliases);

    // Two levels above a class the tree has never heard of.
    assert_eq!(resolver.resolve_method("mod/Boss", "tick", "()V"), "method_5773");
    assert_eq!(resolver.resolve_method("mod/Boss", "getHealth", "()F"), "method_6032");
    assert_eq!(resolver.resolve_field("mod/Zombie", "world", "Lcom/example/World;"), "field_6002");
    // Declared on an interface of an ancestor.
    assert_eq!(resolver.resolve_method("mod/Boss", "shouldTick", "()Z"), "method_3001");
}

#[test]
fn test_unmapped_members_keep_their_names() {
    let hierarchy = game_hierarchy();
    let cache = ResolutionCache::new(&GAME_TREE);
    let aliases = AliasMap::new();
    let resolver = resolver(&hierarchy, &cache, &aliases);

    for _ in 0..2 {
        assert_eq!(resolver.resolve_method("mod/Boss", "roar", "()V"), "roar");
        assert_eq!(resolver.resolve_method("mod/Boss", "tick", "(I)V"), "tick");
        assert_eq!(resolver.resolve_field("java/lang/System", "out", "Ljava/io/PrintStream;"), "out");
    }
}

#[test]
fn test_type_names_round_trip() {
    let named = GAME_TREE.namespace_index("named").unwrap();
    let intermediary = GAME_TREE.namespace_index("intermediary").unwrap();

    for class in GAME_TREE.classes() {
        let source = class.source_name();
        let mapped = GAME_TREE.map_type_name(source, named, intermediary).unwrap();
        assert_eq!(GAME_TREE.map_type_name(mapped, intermediary, named), Some(source));
    }
    assert_eq!(
        GAME_TREE.map_type_name("java/lang/Object", named, intermediary),
        None
    );
}

#[test]
fn test_alias_substituted_before_lookup() {
    let hierarchy = StaticHierarchy::new();
    let cache = ResolutionCache::new(&GAME_TREE);
    let aliases: AliasMap = [("shadow/Entity", "com/example/Entity")]
        .into_iter()
        .collect();
    let resolver = resolver(&hierarchy, &cache, &aliases);

    assert_eq!(resolver.resolve_type("shadow/Entity"), Some("net/minecraft/class_1297"));
    assert_eq!(resolver.resolve_method("shadow/Entity", "tick", "()V"), "method_5773");
}

#[test]
fn test_cyclic_hierarchy_terminates() {
    let hierarchy = game_hierarchy()
        .with_class("cycle/A", Some("cycle/B"), Vec::<&str>::new())
        .with_class("cycle/B", Some("com/example/Entity"), ["cycle/A"]);
    let cache = ResolutionCache::new(&GAME_TREE);
    let aliases = AliasMap::new();
    let resolver = resolver(&hierarchy, &cache, &aliases);

    assert_eq!(resolver.resolve_method("cycle/A", "tick", "()V"), "method_5773");
    assert_eq!(resolver.resolve_method("cycle/A", "missing", "()V"), "missing");
}

#[test]
fn test_tiny_v1_and_v2_describe_the_same_tree() {
    let v1 = MappingReader::read(GAME_V1.as_bytes()).unwrap();
    let v2 = MappingReader::read(GAME_V2.as_bytes()).unwrap();
    assert!(v1.same_entities(&v2));
    assert_eq!(v2.class_count(), 5);
}
