//! Startup configuration, decided once before any component runs.

use std::path::PathBuf;

use tracing::warn;

use crate::base::constants::{
    CACHE_DIR, DEFAULT_RUNTIME_NAMESPACE, MAPPING_EXTENSION, NAMED_NAMESPACE, REMOTE_BASE_URL,
};
use crate::resolve::HierarchyKey;

pub const ENV_DEV: &str = "INTERMAP_DEV";
pub const ENV_RUNTIME_NAMESPACE: &str = "INTERMAP_RUNTIME_NAMESPACE";
pub const ENV_CACHE_DIR: &str = "INTERMAP_CACHE_DIR";
pub const ENV_REMOTE_URL: &str = "INTERMAP_REMOTE_URL";
pub const ENV_HIERARCHY_KEY: &str = "INTERMAP_HIERARCHY_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapConfig {
    /// Running against named classes already; no mapping tree is built.
    pub development: bool,
    /// Game version whose mapping table is loaded.
    pub version: String,
    pub source_namespace: String,
    pub runtime_namespace: String,
    pub cache_dir: PathBuf,
    pub remote_base_url: String,
    pub hierarchy_key: HierarchyKey,
}

impl RemapConfig {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            development: false,
            version: version.into(),
            source_namespace: NAMED_NAMESPACE.to_string(),
            runtime_namespace: DEFAULT_RUNTIME_NAMESPACE.to_string(),
            cache_dir: PathBuf::from(CACHE_DIR),
            remote_base_url: REMOTE_BASE_URL.to_string(),
            hierarchy_key: HierarchyKey::default(),
        }
    }

    /// Defaults overridden from the process environment.
    pub fn from_env(version: impl Into<String>) -> Self {
        Self::new(version).apply_env(|key| std::env::var(key).ok())
    }

    /// Apply `INTERMAP_*` overrides read through `lookup`.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_DEV) {
            self.development = matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
        if let Some(value) = lookup(ENV_RUNTIME_NAMESPACE).filter(|v| !v.is_empty()) {
            self.runtime_namespace = value;
        }
        if let Some(value) = lookup(ENV_CACHE_DIR).filter(|v| !v.is_empty()) {
            self.cache_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_REMOTE_URL).filter(|v| !v.is_empty()) {
            self.remote_base_url = value;
        }
        if let Some(value) = lookup(ENV_HIERARCHY_KEY) {
            match HierarchyKey::parse(&value) {
                Some(key) => self.hierarchy_key = key,
                None => warn!("[INTERMAP] Ignoring {}={}", ENV_HIERARCHY_KEY, value),
            }
        }
        self
    }

    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_runtime_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.runtime_namespace = namespace.into();
        self
    }

    /// `<cache_dir>/<version>.tiny`
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir
            .join(format!("{}.{}", self.version, MAPPING_EXTENSION))
    }
}
