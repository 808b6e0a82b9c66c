//! Domain constants shared across the crate.

/// Namespace holding the human-readable names mods are compiled against.
pub const NAMED_NAMESPACE: &str = "named";

/// Runtime namespace used when no other is configured.
pub const DEFAULT_RUNTIME_NAMESPACE: &str = "intermediary";

/// Maximum number of bytes inspected when detecting a mapping format.
pub const DETECT_LIMIT: usize = 4096;

/// Directory (relative to the working directory) holding cached mapping files.
pub const CACHE_DIR: &str = "intermap_mappings";

/// File extension of cached and remote mapping files.
pub const MAPPING_EXTENSION: &str = "tiny";

/// Remote location mapping files are fetched from, one file per version.
pub const REMOTE_BASE_URL: &str =
    "https://raw.githubusercontent.com/TheTypholorian/intermap/refs/heads/master/mappings";

/// Key of the custom metadata object a mod uses to opt into remapping.
pub const MOD_SETTINGS_KEY: &str = "intermap";

/// Compiled class file extension.
pub const CLASS_EXTENSION: &str = "class";

/// Constructor and static initializer names are never remapped.
pub const CONSTRUCTOR_NAME: &str = "<init>";
pub const STATIC_INIT_NAME: &str = "<clinit>";
