//! File and URL reading.
//!
//! The assignment pass never reads remote content directly; it goes through
//! a [`Vfs`] handed in by the caller so tests can substitute canned content.

use crate::error::BoxError;
use std::time::Duration;

/// Reads the content at a location (URL or filesystem path).
pub trait Vfs: Send + Sync {
    fn read_file(&self, location: &str) -> Result<Vec<u8>, BoxError>;
}

/// Reads `http(s)://` locations with a blocking HTTP client, and `file://`
/// locations or plain paths from the local filesystem.
pub struct DefaultVfs {
    client: reqwest::blocking::Client,
}

impl DefaultVfs {
    pub fn new(timeout: Duration) -> Result<DefaultVfs, BoxError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(DefaultVfs { client })
    }

    fn read_url(&self, url: &str) -> Result<Vec<u8>, BoxError> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send()?.error_for_status()?;
        let body = response.bytes()?;
        log::trace!("GET {url} returned {} bytes", body.len());
        Ok(body.to_vec())
    }
}

impl Vfs for DefaultVfs {
    fn read_file(&self, location: &str) -> Result<Vec<u8>, BoxError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return self.read_url(location);
        }
        let path = location.strip_prefix("file://").unwrap_or(location);
        log::debug!("Reading file {path}");
        std::fs::read(path).map_err(|e| format!("error reading {path}: {e}").into())
    }
}
