//! Two-phase startup: build the mapping tree once, then register per-class
//! rewrites for every mod that asks for them.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::mods::{ModEnumerator, internal_name};
use super::transform::TransformRegistry;
use super::{InitError, MappingSource, RemapConfig};
use crate::hierarchy::HierarchyIndex;
use crate::mapping::{MappingReader, MappingTree};
use crate::resolve::AliasMap;
use crate::rewrite::{ClassModule, RewriteDriver, RewriteError};

/// Process-wide remapping state, created once at startup.
pub struct RemapSession {
    config: RemapConfig,
    driver: Option<RewriteDriver>,
}

/// Outcome of [`RemapSession::register_mods`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    pub mods_seen: usize,
    pub mods_remapped: Vec<String>,
    pub classes_registered: usize,
    pub classes_excluded: usize,
}

impl RemapSession {
    /// Build the mapping tree for `config.version` from `source`.
    ///
    /// In a development environment nothing is loaded and the session is
    /// inactive.
    pub fn initialize(
        config: RemapConfig,
        source: &dyn MappingSource,
        hierarchy: Arc<dyn HierarchyIndex>,
    ) -> Result<Self, InitError> {
        if config.development {
            info!("[INTERMAP] Development environment, remapping disabled");
            return Ok(Self::disabled(config));
        }

        let reader = source.open(&config.version).map_err(|source| InitError::Fetch {
            version: config.version.clone(),
            source,
        })?;
        let tree = MappingReader::read(reader)?;
        info!(
            "[INTERMAP] Loaded {} classes for {} ({})",
            tree.class_count(),
            config.version,
            tree.namespaces().join(", ")
        );

        Self::with_tree(config, Arc::new(tree), hierarchy)
    }

    /// Start a session over an already built tree.
    pub fn with_tree(
        config: RemapConfig,
        tree: Arc<MappingTree>,
        hierarchy: Arc<dyn HierarchyIndex>,
    ) -> Result<Self, InitError> {
        for namespace in [&config.source_namespace, &config.runtime_namespace] {
            tree.namespace_index(namespace)?;
        }
        let driver = RewriteDriver::new(
            tree,
            hierarchy,
            &config.source_namespace,
            &config.runtime_namespace,
        )?
        .with_hierarchy_key(config.hierarchy_key);

        debug!(
            "[INTERMAP] Remapping {} -> {}",
            config.source_namespace, config.runtime_namespace
        );
        Ok(Self {
            config,
            driver: Some(driver),
        })
    }

    /// A session that never remaps anything.
    pub fn disabled(config: RemapConfig) -> Self {
        Self {
            config,
            driver: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.driver.is_some()
    }

    pub fn config(&self) -> &RemapConfig {
        &self.config
    }

    pub fn tree(&self) -> Option<&Arc<MappingTree>> {
        self.driver.as_ref().map(RewriteDriver::tree)
    }

    pub fn driver(&self) -> Option<&RewriteDriver> {
        self.driver.as_ref()
    }

    // ------------------------------------------------------------------
    // Host lifecycle hooks. The host calls these; remapping needs none.
    // ------------------------------------------------------------------

    pub fn on_load(&self, _package: &str) {}

    pub fn refmap_config(&self) -> Option<&str> {
        None
    }

    pub fn should_apply(&self, _target_class: &str, _definition_class: &str) -> bool {
        true
    }

    pub fn mixins(&self) -> Vec<String> {
        Vec::new()
    }

    pub fn pre_apply(&self, _target_class: &str, _module: &mut ClassModule, _definition_class: &str) {}

    pub fn post_apply(&self, _target_class: &str, _module: &mut ClassModule, _definition_class: &str) {}

    /// Register an in-place rewrite for every class of every mod with
    /// remapping enabled, skipping classes the hierarchy marks as excluded.
    pub fn register_mods(
        &self,
        enumerator: &dyn ModEnumerator,
        registry: &dyn TransformRegistry,
    ) -> RegistrationReport {
        let mut report = RegistrationReport::default();
        let Some(driver) = &self.driver else {
            return report;
        };

        for descriptor in enumerator.mods() {
            report.mods_seen += 1;
            let Some(settings) = descriptor.settings.as_ref().filter(|s| s.enabled) else {
                continue;
            };
            info!("[INTERMAP] Remapping mod {}", descriptor.id);

            let hierarchy = driver.hierarchy();
            let eligible: Vec<&String> = descriptor
                .entries
                .par_iter()
                .filter(|entry| !hierarchy.is_excluded_from_remap(&internal_name(entry)))
                .collect();
            report.classes_excluded += descriptor.entries.len() - eligible.len();

            let rewriter = Arc::new(ModuleRewriter {
                driver: driver.clone(),
                aliases: settings.alias_map(),
            });
            let registered = eligible.len();
            for entry in eligible {
                let rewriter = Arc::clone(&rewriter);
                registry.register(
                    entry,
                    Box::new(move |module: &mut ClassModule| {
                        rewriter.apply(module);
                    }),
                );
            }
            report.classes_registered += registered;
            debug!(
                "[INTERMAP] Registered {} classes for {}",
                registered, descriptor.id
            );
            report.mods_remapped.push(descriptor.id);
        }
        report
    }

    /// Rewrite a batch of modules in parallel.
    ///
    /// Returns the failures; each failed module is left as it was and the
    /// others are still rewritten.
    pub fn rewrite_all(&self, modules: &mut [ClassModule], aliases: &AliasMap) -> Vec<(String, RewriteError)> {
        let Some(driver) = &self.driver else {
            return Vec::new();
        };
        modules
            .par_iter_mut()
            .filter_map(|module| {
                driver
                    .rewrite_in_place(module, aliases)
                    .err()
                    .map(|error| {
                        warn!("[INTERMAP] Leaving '{}' unmapped: {}", module.name, error);
                        (module.name.clone(), error)
                    })
            })
            .collect()
    }
}

/// What a registered transformation closes over: the shared driver and one
/// mod's aliases.
struct ModuleRewriter {
    driver: RewriteDriver,
    aliases: AliasMap,
}

impl ModuleRewriter {
    fn apply(&self, module: &mut ClassModule) -> bool {
        match self.driver.rewrite_in_place(module, &self.aliases) {
            Ok(()) => true,
            Err(error) => {
                warn!("[INTERMAP] Leaving '{}' unmapped: {}", module.name, error);
                false
            }
        }
    }
}
