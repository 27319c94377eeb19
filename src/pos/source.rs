use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Result, TestcopError};
use crate::state::{
    DEFAULT_LOCK_TIMEOUT_MS, LockError, LockFileGuard, atomic_write, sha256_hex, sidecar_path,
    wait_for_file,
};

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Bundled model, the counterpart of a classpath resource.
static BUNDLED_MODEL: &[u8] = include_bytes!("../../resources/pos-model.txt");

/// Somewhere the POS model bytes can come from.
pub trait ModelSource: Send + Sync {
    /// Produce the raw model bytes.
    ///
    /// # Errors
    /// Returns an error if the model cannot be produced.
    fn bytes(&self) -> Result<Vec<u8>>;

    /// Human-readable origin, used in logs and error messages.
    fn describe(&self) -> String;
}

impl<S: ModelSource + ?Sized> ModelSource for Box<S> {
    fn bytes(&self) -> Result<Vec<u8>> {
        (**self).bytes()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// HTTP client abstraction for dependency injection.
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and return the response body.
    ///
    /// # Errors
    /// Returns an error on connection failures or non-2xx responses.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production HTTP client using reqwest.
#[derive(Debug, Default)]
pub struct ReqwestClient;

#[cfg(not(tarpaulin_include))]
impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| TestcopError::Http(format!("Failed to create HTTP client: {e}")))?;

        let response = client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                TestcopError::Http(format!("Request timeout fetching model: {url}"))
            } else if e.is_connect() {
                TestcopError::Http(format!("Failed to connect to model URL: {url}"))
            } else {
                TestcopError::Http(format!("Failed to fetch model from {url}: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TestcopError::Http(format!(
                "Failed to fetch model from {url}: HTTP {status}"
            )));
        }

        response
            .bytes()
            .map(|body| body.to_vec())
            .map_err(|e| TestcopError::Http(format!("Failed to read response from {url}: {e}")))
    }
}

/// Check if a string is a valid remote URL (http:// or https://).
#[must_use]
pub fn is_remote_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Model downloaded from a URL.
#[derive(Debug)]
pub struct InternetSource<C = ReqwestClient> {
    url: String,
    client: C,
}

impl InternetSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, ReqwestClient)
    }
}

impl<C: HttpClient> InternetSource<C> {
    #[must_use]
    pub fn with_client(url: impl Into<String>, client: C) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

impl<C: HttpClient> ModelSource for InternetSource<C> {
    fn bytes(&self) -> Result<Vec<u8>> {
        if !is_remote_url(&self.url) {
            return Err(TestcopError::Config(format!(
                "Invalid model URL (must start with http:// or https://): {}",
                self.url
            )));
        }
        info!(url = %self.url, "downloading POS model");
        self.client.get(&self.url)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Model compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledSource;

impl ModelSource for BundledSource {
    fn bytes(&self) -> Result<Vec<u8>> {
        Ok(BUNDLED_MODEL.to_vec())
    }

    fn describe(&self) -> String {
        "bundled model".to_string()
    }
}

/// File-system cache in front of another source.
///
/// The first request materializes the inner source at `path`; later requests
/// read `path`. Writers are serialized through `<path>.lock`, publish the file
/// with a rename, then write `<path>.ready` holding the SHA-256 of the bytes.
/// A cached file is only trusted when the marker matches its digest.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    path: PathBuf,
    lock_timeout_ms: u64,
}

impl<S: ModelSource> CachedSource<S> {
    #[must_use]
    pub fn new(inner: S, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    #[must_use]
    pub const fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn marker_path(&self) -> PathBuf {
        sidecar_path(&self.path, "ready")
    }

    /// Read the cached bytes if the readiness marker vouches for them.
    fn read_ready(&self) -> Option<Vec<u8>> {
        let expected = fs::read_to_string(self.marker_path()).ok()?;
        let bytes = fs::read(&self.path).ok()?;
        if sha256_hex(&bytes) == expected.trim() {
            Some(bytes)
        } else {
            warn!(path = %self.path.display(), "cached POS model does not match its marker");
            None
        }
    }

    fn materialize(&self) -> Result<Vec<u8>> {
        let bytes = self.inner.bytes()?;
        atomic_write(&self.path, &bytes)?;
        atomic_write(&self.marker_path(), sha256_hex(&bytes).as_bytes())?;
        debug!(path = %self.path.display(), size = bytes.len(), "cached POS model");
        Ok(bytes)
    }

    /// Another process holds the lock for too long: wait for its marker, and
    /// fall back to the inner source without caching if it never shows up.
    fn wait_for_winner(&self) -> Result<Vec<u8>> {
        if wait_for_file(&self.marker_path(), self.lock_timeout_ms)
            && let Some(bytes) = self.read_ready()
        {
            return Ok(bytes);
        }
        warn!(path = %self.path.display(), "model cache is busy, reading source directly");
        self.inner.bytes()
    }
}

impl<S: ModelSource> ModelSource for CachedSource<S> {
    fn bytes(&self) -> Result<Vec<u8>> {
        if let Some(bytes) = self.read_ready() {
            debug!(path = %self.path.display(), "POS model cache hit");
            return Ok(bytes);
        }

        let lock_path = sidecar_path(&self.path, "lock");
        let result = match LockFileGuard::acquire(&lock_path, self.lock_timeout_ms) {
            Ok(_guard) => self.read_ready().map_or_else(|| self.materialize(), Ok),
            Err(LockError::Timeout) => self.wait_for_winner(),
            Err(LockError::Io(e)) => {
                warn!(path = %lock_path.display(), error = %e, "cannot lock model cache");
                self.inner.bytes()
            }
        };

        result.map_err(|e| match e {
            TestcopError::ModelUnavailable(_) => e,
            other => TestcopError::ModelUnavailable(format!(
                "{} (cache {}): {other}",
                self.inner.describe(),
                self.path.display()
            )),
        })
    }

    fn describe(&self) -> String {
        format!("{} cached at {}", self.inner.describe(), self.path.display())
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
