//! Mapping table acquisition with an on-disk cache.
//!
//! ```text
//! open("1.21.1")
//!   ├─ <cache_dir>/1.21.1.tiny exists → read it
//!   └─ otherwise fetch <base_url>/1.21.1.tiny
//!        → write 1.21.1.tiny.part, rename to 1.21.1.tiny → read it
//! ```

use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "remote")]
use std::time::Duration;

#[cfg(feature = "remote")]
use tracing::debug;
use tracing::info;

use super::{RemapConfig, SourceError};
use crate::base::constants::MAPPING_EXTENSION;

/// Supplies mapping table bytes for a version.
pub trait MappingSource: Send + Sync {
    fn open(&self, version: &str) -> Result<Box<dyn Read + Send>, SourceError>;
}

impl<F> MappingSource for F
where
    F: Fn(&str) -> Result<Box<dyn Read + Send>, SourceError> + Send + Sync,
{
    fn open(&self, version: &str) -> Result<Box<dyn Read + Send>, SourceError> {
        self(version)
    }
}

/// Network transport used on a cache miss.
///
/// `Ok(None)` means the remote has nothing for the URL.
pub trait MappingFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>, SourceError>;
}

impl<F> MappingFetcher for F
where
    F: Fn(&str) -> Result<Option<Vec<u8>>, SourceError> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>, SourceError> {
        self(url)
    }
}

/// Blocking HTTP transport.
///
/// A non-success status is "nothing for this URL"; connection and read
/// failures are errors.
#[cfg(feature = "remote")]
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

#[cfg(feature = "remote")]
impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

#[cfg(feature = "remote")]
impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "remote")]
impl MappingFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>, SourceError> {
        let fetch_error = |message: String| SourceError::Fetch {
            url: url.to_string(),
            message,
        };

        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                debug!("[INTERMAP] {} answered {}", url, status);
                return Ok(None);
            }
            Err(error) => return Err(fetch_error(error.to_string())),
        };

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| fetch_error(e.to_string()))?;
        Ok(Some(bytes))
    }
}

/// Reads `<cache_dir>/<version>.tiny`, filling it from the remote on a miss.
pub struct CachedMappingSource<F> {
    cache_dir: PathBuf,
    base_url: String,
    fetcher: F,
}

impl<F: MappingFetcher> CachedMappingSource<F> {
    pub fn new(cache_dir: impl Into<PathBuf>, base_url: impl Into<String>, fetcher: F) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            base_url: base_url.into(),
            fetcher,
        }
    }

    pub fn from_config(config: &RemapConfig, fetcher: F) -> Self {
        Self::new(&config.cache_dir, &config.remote_base_url, fetcher)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache location for `version`.
    pub fn cache_path(&self, version: &str) -> Result<PathBuf, SourceError> {
        validate_version(version)?;
        Ok(self
            .cache_dir
            .join(format!("{}.{}", version, MAPPING_EXTENSION)))
    }

    /// Remote location for `version`.
    pub fn url(&self, version: &str) -> String {
        format!(
            "{}/{}.{}",
            self.base_url.trim_end_matches('/'),
            version,
            MAPPING_EXTENSION
        )
    }

    fn download(&self, version: &str, cached: &Path) -> Result<(), SourceError> {
        let url = self.url(version);
        let bytes = match self.fetcher.fetch(&url)? {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                return Err(SourceError::NotFound {
                    version: version.to_string(),
                });
            }
        };

        let partial = cached.with_extension(format!("{}.part", MAPPING_EXTENSION));
        let mut file = File::create(&partial).map_err(|e| SourceError::io(&partial, e))?;
        file.write_all(&bytes)
            .and_then(|()| file.sync_all())
            .map_err(|e| SourceError::io(&partial, e))?;
        drop(file);
        fs::rename(&partial, cached).map_err(|e| SourceError::io(cached, e))?;

        info!(
            "[INTERMAP] Loading mappings from {}, caching to {}",
            url,
            cached.display()
        );
        Ok(())
    }
}

#[cfg(feature = "remote")]
impl CachedMappingSource<HttpFetcher> {
    /// Cache in `config.cache_dir`, downloading from `config.remote_base_url`.
    pub fn over_http(config: &RemapConfig) -> Self {
        Self::from_config(config, HttpFetcher::new())
    }
}

impl<F: MappingFetcher> MappingSource for CachedMappingSource<F> {
    fn open(&self, version: &str) -> Result<Box<dyn Read + Send>, SourceError> {
        let cached = self.cache_path(version)?;
        fs::create_dir_all(&self.cache_dir).map_err(|e| SourceError::io(&self.cache_dir, e))?;

        if cached.is_file() {
            info!("[INTERMAP] Found cached mappings at {}", cached.display());
        } else {
            self.download(version, &cached)?;
        }

        let file = File::open(&cached).map_err(|e| SourceError::io(&cached, e))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Versions become file names; reject anything that could escape the cache
/// directory.
fn validate_version(version: &str) -> Result<(), SourceError> {
    let invalid = version.is_empty()
        || version.starts_with('.')
        || version.contains(['/', '\\', '\0']);
    if invalid {
        Err(SourceError::InvalidVersion(version.to_string()))
    } else {
        Ok(())
    }
}
