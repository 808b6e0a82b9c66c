//! Installed mods and their remap settings.

use std::collections::BTreeMap;
use std::path::Path;

use walkdir::WalkDir;

use crate::base::constants::CLASS_EXTENSION;
use crate::resolve::AliasMap;

/// The `intermap` custom value a mod declares in its metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "metadata", derive(serde::Serialize, serde::Deserialize))]
pub struct RemapSettings {
    #[cfg_attr(feature = "metadata", serde(default))]
    pub enabled: bool,
    #[cfg_attr(feature = "metadata", serde(default))]
    pub aliases: BTreeMap<String, String>,
}

impl RemapSettings {
    pub fn from_pairs<K, V>(enabled: bool, aliases: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            enabled,
            aliases: aliases
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    pub fn alias_map(&self) -> AliasMap {
        self.aliases.iter().collect()
    }

    /// Read settings from a mod's custom values object, which holds them
    /// under the `intermap` key. `Ok(None)` when the key is absent.
    #[cfg(feature = "metadata")]
    pub fn from_custom_values(values: &serde_json::Value) -> Result<Option<Self>, serde_json::Error> {
        use crate::base::constants::MOD_SETTINGS_KEY;

        match values.get(MOD_SETTINGS_KEY) {
            Some(settings) => serde_json::from_value(settings.clone()).map(Some),
            None => Ok(None),
        }
    }
}

/// One installed mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDescriptor {
    pub id: String,
    /// `None` when the mod declares no remap settings at all.
    pub settings: Option<RemapSettings>,
    /// Binary class names (`a.b.C`) shipped by the mod.
    pub entries: Vec<String>,
}

impl ModDescriptor {
    pub fn new(id: impl Into<String>, settings: Option<RemapSettings>, entries: Vec<String>) -> Self {
        Self {
            id: id.into(),
            settings,
            entries,
        }
    }

    /// Describe a mod whose classes live under the directory roots `roots`.
    pub fn from_roots<P: AsRef<Path>>(
        id: impl Into<String>,
        settings: Option<RemapSettings>,
        roots: impl IntoIterator<Item = P>,
    ) -> Result<Self, walkdir::Error> {
        let mut entries = Vec::new();
        for root in roots {
            entries.extend(collect_class_entries(root.as_ref())?);
        }
        Ok(Self::new(id, settings, entries))
    }

    pub fn remap_enabled(&self) -> bool {
        self.settings.as_ref().is_some_and(|s| s.enabled)
    }
}

/// Lists installed mods.
pub trait ModEnumerator {
    fn mods(&self) -> Vec<ModDescriptor>;
}

impl ModEnumerator for Vec<ModDescriptor> {
    fn mods(&self) -> Vec<ModDescriptor> {
        self.clone()
    }
}

/// `a/b/C.class` under `root` → `a.b.C`. `None` for anything that is not a
/// class file inside `root`.
pub fn class_name_from_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    if relative.extension().and_then(|ext| ext.to_str()) != Some(CLASS_EXTENSION) {
        return None;
    }
    let stem = relative.with_extension("");
    let parts: Option<Vec<&str>> = stem.components().map(|c| c.as_os_str().to_str()).collect();
    let parts = parts?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("."))
}

/// Every class file under `root` as a binary class name, sorted.
pub fn collect_class_entries(root: &Path) -> Result<Vec<String>, walkdir::Error> {
    let mut names = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = class_name_from_path(root, entry.path()) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// `a.b.C` → `a/b/C`
pub fn internal_name(binary_name: &str) -> String {
    binary_name.replace('.', "/")
}
