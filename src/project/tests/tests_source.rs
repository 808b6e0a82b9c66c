use std::fs;
use std::io::Read;

use parking_lot::Mutex;
use rstest::rstest;
use tempfile::TempDir;

use crate::project::*;

struct RecordingFetcher {
    payload: Option<Vec<u8>>,
    urls: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    fn new(payload: Option<&str>) -> Self {
        Self {
            payload: payload.map(|p| p.as_bytes().to_vec()),
            urls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

impl MappingFetcher for &RecordingFetcher {
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>, SourceError> {
        self.urls.lock().push(url.to_string());
        Ok(self.payload.clone())
    }
}

fn read_all(mut reader: Box<dyn Read + Send>) -> String {
    let mut out = String::new();
    reader.read_to_string(&mut out).unwrap();
    out
}

#[test]
fn test_cached_file_wins() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.20.tiny"), "cached").unwrap();
    let fetcher = RecordingFetcher::new(Some("remote"));
    let source = CachedMappingSource::new(dir.path(), "https://example.invalid/m", &fetcher);

    assert_eq!(read_all(source.open("1.20").unwrap()), "cached");
    assert!(fetcher.calls().is_empty());
}

#[test]
fn test_miss_fetches_and_persists() {
    let dir = TempDir::new().unwrap();
    let cache_dir = dir.path().join("nested").join("cache");
    let fetcher = RecordingFetcher::new(Some("v1\tnamed\tintermediary\n"));
    let source = CachedMappingSource::new(&cache_dir, "https://example.invalid/m/", &fetcher);

    assert_eq!(
        read_all(source.open("1.21.1").unwrap()),
        "v1\tnamed\tintermediary\n"
    );
    assert_eq!(fetcher.calls(), vec!["https://example.invalid/m/1.21.1.tiny"]);
    assert!(cache_dir.join("1.21.1.tiny").is_file());
    assert!(!cache_dir.join("1.21.1.tiny.part").exists());

    // Second open is served from disk.
    read_all(source.open("1.21.1").unwrap());
    assert_eq!(fetcher.calls().len(), 1);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
fn test_missing_remote_is_not_found(#[case] payload: Option<&str>) {
    let dir = TempDir::new().unwrap();
    let fetcher = RecordingFetcher::new(payload);
    let source = CachedMappingSource::new(dir.path(), "https://example.invalid", &fetcher);

    let result = source.open("9.9");
    assert!(matches!(result, Err(SourceError::NotFound { version }) if version == "9.9"));
    assert!(!dir.path().join("9.9.tiny").exists());
}

#[test]
fn test_fetch_error_propagates() {
    let dir = TempDir::new().unwrap();
    let fetcher = |url: &str| -> Result<Option<Vec<u8>>, SourceError> {
        Err(SourceError::Fetch {
            url: url.to_string(),
            message: "connection refused".to_string(),
        })
    };
    let source = CachedMappingSource::new(dir.path(), "https://example.invalid", fetcher);

    assert!(matches!(source.open("1.20"), Err(SourceError::Fetch { .. })));
}

#[rstest]
#[case("")]
#[case("../escape")]
#[case("a/b")]
#[case("a\\b")]
fn test_invalid_version_rejected(#[case] version: &str) {
    let dir = TempDir::new().unwrap();
    let fetcher = RecordingFetcher::new(Some("content"));
    let source = CachedMappingSource::new(dir.path(), "https://example.invalid", &fetcher);

    assert!(matches!(source.open(version), Err(SourceError::InvalidVersion(_))));
    assert!(fetcher.calls().is_empty());
}

#[test]
fn test_from_config() {
    let config = RemapConfig::new("1.20").with_cache_dir("some/dir");
    let fetcher = RecordingFetcher::new(None);
    let source = CachedMappingSource::from_config(&config, &fetcher);

    assert_eq!(source.cache_path("1.20").unwrap(), config.cache_file());
    assert!(source.url("1.20").ends_with("/mappings/1.20.tiny"));
}

#[cfg(feature = "remote")]
mod http {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use tempfile::TempDir;

    use crate::project::*;

    /// Serve one request with `status` and `body`, returning the base URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_http_fetch_success() {
        let base = serve_once("200 OK", "v1\tnamed\tintermediary\n");
        let bytes = HttpFetcher::new()
            .fetch(&format!("{}/1.20.tiny", base))
            .unwrap();
        assert_eq!(bytes.as_deref(), Some("v1\tnamed\tintermediary\n".as_bytes()));
    }

    #[test]
    fn test_http_status_is_not_found() {
        let base = serve_once("404 Not Found", "");
        let bytes = HttpFetcher::new()
            .fetch(&format!("{}/1.20.tiny", base))
            .unwrap();
        assert!(bytes.is_none());
    }

    #[test]
    fn test_http_connection_failure_is_fetch_error() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let url = format!("http://{}/1.20.tiny", addr);
        let error = HttpFetcher::new().fetch(&url).unwrap_err();
        assert!(matches!(error, SourceError::Fetch { url: failed, .. } if failed == url));
    }

    #[test]
    fn test_cold_cache_filled_over_http() {
        let base = serve_once("200 OK", "v1\tnamed\tintermediary\n");
        let dir = TempDir::new().unwrap();
        let source = CachedMappingSource::new(dir.path(), base, HttpFetcher::new());

        let mut content = String::new();
        source
            .open("1.20")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        assert_eq!(content, "v1\tnamed\tintermediary\n");
        assert!(dir.path().join("1.20.tiny").is_file());
    }

    #[test]
    fn test_cold_cache_missing_remote_is_not_found() {
        let base = serve_once("404 Not Found", "");
        let dir = TempDir::new().unwrap();
        let source = CachedMappingSource::new(dir.path(), base, HttpFetcher::new());

        let error = source.open("1.20").err().unwrap();
        assert!(matches!(error, SourceError::NotFound { version } if version == "1.20"));
    }
}
