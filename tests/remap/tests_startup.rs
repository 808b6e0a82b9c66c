//! Startup through the disk cache, then per-class registration.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::helpers::fixtures::GAME_V2;
use crate::helpers::remap_helpers::lazy_hierarchy_from;
use intermap::hierarchy::HierarchyIndex;
use intermap::project::{
    CachedMappingSource, ModDescriptor, RemapSettings, SourceError, TransformTable,
};
use intermap::rewrite::{ClassModule, FieldOp, Instruction, InvokeOp, MethodNode};
use intermap::{RemapConfig, RemapSession};
use tempfile::TempDir;

fn entity_modules() -> Vec<ClassModule> {
    let mut entity = ClassModule::new("com/example/Entity");
    entity.super_name = Some("java/lang/Object".to_string());
    entity.interfaces.push("com/example/Tickable".to_string());
    let mut living = ClassModule::new("com/example/LivingEntity");
    living.super_name = Some("com/example/Entity".to_string());
    vec![entity, living]
}

fn zombie() -> ClassModule {
    let mut module = ClassModule::new("mod/Zombie");
    module.super_name = Some("com/example/LivingEntity".to_string());
    module.methods.push(MethodNode {
        name: "getHealth".to_string(),
        descriptor: "()F".to_string(),
        instructions: vec![
            Instruction::Field {
                op: FieldOp::GetField,
                owner: "mod/Zombie".to_string(),
                name: "health".to_string(),
                descriptor: "F".to_string(),
            },
            Instruction::Method {
                op: InvokeOp::Interface,
                owner: "com/example/Tickable".to_string(),
                name: "shouldTick".to_string(),
                descriptor: "()Z".to_string(),
                interface: true,
            },
        ],
        ..MethodNode::default()
    });
    module
}

#[test]
fn test_startup_fetches_once_and_rewrites_mod_classes() {
    let dir = TempDir::new().unwrap();
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fetches);
    let fetcher = move |url: &str| -> Result<Option<Vec<u8>>, SourceError> {
        counter.fetch_add(1, Ordering::SeqCst);
        assert!(url.ends_with("/1.20.1.tiny"));
        Ok(Some(GAME_V2.as_bytes().to_vec()))
    };
    let config = RemapConfig::new("1.20.1").with_cache_dir(dir.path().join("intermap_mappings"));
    let source = CachedMappingSource::from_config(&config, fetcher);

    let mut game = entity_modules();
    game.push(zombie());
    let hierarchy: Arc<dyn HierarchyIndex> = Arc::new(lazy_hierarchy_from(&game));

    let session = RemapSession::initialize(config.clone(), &source, Arc::clone(&hierarchy)).unwrap();
    // A second startup is served from the cache.
    RemapSession::initialize(config.clone(), &source, Arc::clone(&hierarchy)).unwrap();
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert!(config.cache_file().is_file());

    let mods = vec![ModDescriptor::new(
        "zombies",
        Some(RemapSettings::from_pairs(true, Vec::<(String, String)>::new())),
        vec!["mod.Zombie".to_string()],
    )];
    let registry = TransformTable::new();
    let report = session.register_mods(&mods, &registry);
    assert_eq!(report.classes_registered, 1);

    let mut module = zombie();
    registry.apply("mod.Zombie", &mut module);

    assert_eq!(module.name, "mod/Zombie");
    assert_eq!(module.super_name.as_deref(), Some("net/minecraft/class_1309"));
    let method = &module.methods[0];
    assert_eq!(method.name, "method_6032");
    assert_eq!(
        method.instructions,
        vec![
            Instruction::Field {
                op: FieldOp::GetField,
                owner: "mod/Zombie".to_string(),
                name: "field_6012".to_string(),
                descriptor: "F".to_string(),
            },
            Instruction::Method {
                op: InvokeOp::Interface,
                owner: "net/minecraft/class_3000".to_string(),
                name: "method_3001".to_string(),
                descriptor: "()Z".to_string(),
                interface: true,
            },
        ]
    );
}

#[test]
fn test_development_startup_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let fetcher = |_: &str| -> Result<Option<Vec<u8>>, SourceError> {
        panic!("development startup must not fetch")
    };
    let config = RemapConfig::new("1.20.1")
        .with_cache_dir(dir.path().join("cache"))
        .with_development(true);
    let source = CachedMappingSource::from_config(&config, fetcher);
    let hierarchy: Arc<dyn HierarchyIndex> = Arc::new(lazy_hierarchy_from(&entity_modules()));

    let session = RemapSession::initialize(config, &source, hierarchy).unwrap();

    assert!(!session.is_active());
    assert!(!dir.path().join("cache").exists());
}
