use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use super::*;

/// Source that counts how many times it was asked for bytes.
#[derive(Debug, Clone, Default)]
struct CountingSource {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl CountingSource {
    fn failing() -> Self {
        Self {
            calls: Arc::default(),
            fail: true,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModelSource for CountingSource {
    fn bytes(&self) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(TestcopError::Http("offline".to_string()))
        } else {
            Ok(b"model-bytes".to_vec())
        }
    }

    fn describe(&self) -> String {
        "counting".to_string()
    }
}

struct FakeHttp {
    body: Vec<u8>,
}

impl HttpClient for FakeHttp {
    fn get(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(self.body.clone())
    }
}

#[test]
fn bundled_source_starts_with_model_header() {
    let bytes = BundledSource.bytes().unwrap();
    assert!(bytes.starts_with(crate::pos::MODEL_HEADER.as_bytes()));
}

#[test]
fn internet_source_returns_client_body() {
    let source = InternetSource::with_client(
        "https://example.com/model.bin",
        FakeHttp {
            body: b"remote".to_vec(),
        },
    );
    assert_eq!(source.bytes().unwrap(), b"remote");
    assert_eq!(source.describe(), "https://example.com/model.bin");
}

#[test]
fn internet_source_rejects_non_http_url() {
    let source = InternetSource::with_client("ftp://example.com/model", FakeHttp { body: vec![] });
    assert!(matches!(source.bytes(), Err(TestcopError::Config(_))));
}

#[test]
fn is_remote_url_accepts_http_and_https() {
    assert!(is_remote_url("http://a"));
    assert!(is_remote_url("https://a"));
    assert!(!is_remote_url("file:///a"));
}

#[test]
fn cached_source_materializes_once() {
    let temp_dir = TempDir::new().unwrap();
    let inner = CountingSource::default();
    let cached = CachedSource::new(inner.clone(), temp_dir.path().join("model.bin"));

    assert_eq!(cached.bytes().unwrap(), b"model-bytes");
    assert_eq!(cached.bytes().unwrap(), b"model-bytes");

    assert_eq!(inner.calls(), 1);
    assert!(cached.path().is_file());
    assert!(sidecar_path(cached.path(), "ready").is_file());
}

#[test]
fn cached_source_reads_existing_cache_without_inner() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.bin");
    CachedSource::new(CountingSource::default(), &path)
        .bytes()
        .unwrap();

    let failing = CountingSource::failing();
    let cached = CachedSource::new(failing.clone(), &path);

    assert_eq!(cached.bytes().unwrap(), b"model-bytes");
    assert_eq!(failing.calls(), 0);
}

#[test]
fn cached_source_ignores_file_without_marker() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.bin");
    fs::write(&path, b"half-written").unwrap();
    let inner = CountingSource::default();

    let bytes = CachedSource::new(inner.clone(), &path).bytes().unwrap();

    assert_eq!(bytes, b"model-bytes");
    assert_eq!(inner.calls(), 1);
}

#[test]
fn cached_source_rewrites_file_with_mismatching_marker() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.bin");
    fs::write(&path, b"corrupted").unwrap();
    fs::write(sidecar_path(&path, "ready"), "0000").unwrap();

    let bytes = CachedSource::new(CountingSource::default(), &path)
        .bytes()
        .unwrap();

    assert_eq!(bytes, b"model-bytes");
    assert_eq!(fs::read(&path).unwrap(), b"model-bytes");
}

#[test]
fn cached_source_reports_model_unavailable_when_everything_fails() {
    let temp_dir = TempDir::new().unwrap();
    let cached = CachedSource::new(CountingSource::failing(), temp_dir.path().join("model.bin"));
    let err = cached.bytes().unwrap_err();
    assert!(matches!(err, TestcopError::ModelUnavailable(_)));
    assert!(err.to_string().contains("counting"));
}

#[test]
fn cached_source_serializes_concurrent_cold_starts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.bin");
    let inner = CountingSource::default();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let inner = inner.clone();
            let path = path.clone();
            scope.spawn(move || {
                let bytes = CachedSource::new(inner, path).bytes().unwrap();
                assert_eq!(bytes, b"model-bytes");
            });
        }
    });

    assert_eq!(inner.calls(), 1);
}
