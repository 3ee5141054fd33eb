//! The base image catalog: an external provider of candidate base
//! images, normalized to `BaseImage` records. Provider failures are
//! absorbed into an empty catalog with a visible status; they never
//! take the editing session down.

use crate::error::{Error, Result};
use crate::session::BaseImage;

use serde::Deserialize;

pub const CATALOG_URL: &str = "https://api.imgflip.com/get_memes";

#[derive(Debug, Deserialize)]
struct Payload {
    data: PayloadData,
}

#[derive(Debug, Deserialize)]
struct PayloadData {
    memes: Vec<BaseImage>,
}

/// Normalizes the provider payload (`{ "data": { "memes": [...] } }`)
/// into the projection the core needs. Unknown fields are ignored.
pub fn parse_catalog(body: &str) -> Result<Vec<BaseImage>> {
    let payload: Payload =
        serde_json::from_str(body).map_err(|e| Error::MalformedCatalog(e.to_string()))?;
    Ok(payload.data.memes)
}

pub fn fetch_catalog(url: &str) -> Result<Vec<BaseImage>> {
    let body = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.text())
        .map_err(|e| Error::ProviderError(e.to_string()))?;
    parse_catalog(&body)
}

/// Downloads the bytes of a base image, from http(s) or the local
/// filesystem. Decoding is the backend's job.
pub fn fetch_bytes(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let bytes = reqwest::blocking::get(source)
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(|e| Error::ProviderError(e.to_string()))?;
        Ok(bytes.to_vec())
    } else {
        Ok(std::fs::read(source)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    /// No fetch has completed yet.
    Loading,
    Ready,
    /// The last fetch failed; the catalog is empty until a retry.
    Failed(String),
}

/// Snapshot of the provider's entries. The fetch resolves once and the
/// core treats the result as a synchronous list thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<BaseImage>,
    status: CatalogStatus,
}

impl Catalog {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            status: CatalogStatus::Loading,
        }
    }

    pub fn entries(&self) -> &[BaseImage] {
        &self.entries
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn find(&self, id: &str) -> Option<&BaseImage> {
        self.entries.iter().find(|m| m.id == id)
    }

    /// Folds a fetch result into the catalog: entries on success, empty
    /// list plus failure status otherwise.
    pub fn apply(&mut self, result: Result<Vec<BaseImage>>) {
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.status = CatalogStatus::Ready;
            }
            Err(e) => {
                self.entries.clear();
                self.status = CatalogStatus::Failed(e.to_string());
            }
        }
    }

    pub fn refresh(&mut self, url: &str) {
        self.apply(fetch_catalog(url));
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}
