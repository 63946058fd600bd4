//! Content-addressed report cache.
//!
//! Lives entirely outside the engine: keyed by the SHA-256 of the canonical
//! request JSON, stores whole responses, and supports explicit per-request
//! invalidation. The engine crates never see it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AppError, AppResult};
use crate::request::MatchRequest;
use crate::service::MatchResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheManifest {
    pub key: String,
    pub created_at: String,
    pub engine_version: String,
}

/// Compute the cache key for a request.
pub fn request_key(request: &MatchRequest) -> AppResult<String> {
    let canonical = serde_json::to_string(request)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

#[derive(Clone)]
pub struct ReportCache {
    root_dir: PathBuf,
}

impl ReportCache {
    pub fn new(root_dir: PathBuf) -> AppResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Default cache location under a working directory.
    pub fn for_dir(dir: &Path) -> AppResult<Self> {
        Self::new(dir.join(".dualmatch").join("cache"))
    }

    fn entry_dir(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    pub fn has(&self, request: &MatchRequest) -> AppResult<bool> {
        let key = request_key(request)?;
        Ok(self.entry_dir(&key).join("manifest.json").exists())
    }

    pub fn save(&self, request: &MatchRequest, response: &MatchResponse) -> AppResult<String> {
        let key = request_key(request)?;
        let entry_dir = self.entry_dir(&key);
        fs::create_dir_all(&entry_dir)?;

        let manifest = CacheManifest {
            key: key.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        };
        fs::write(
            entry_dir.join("manifest.json"),
            serde_json::to_string_pretty(&manifest)?,
        )?;
        fs::write(
            entry_dir.join("response.json"),
            serde_json::to_string(response)?,
        )?;

        Ok(key)
    }

    pub fn load(&self, request: &MatchRequest) -> AppResult<MatchResponse> {
        let key = request_key(request)?;
        let response_path = self.entry_dir(&key).join("response.json");
        if !response_path.exists() {
            return Err(AppError::CacheMiss { key });
        }
        let content = fs::read_to_string(response_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_manifest(&self, request: &MatchRequest) -> AppResult<CacheManifest> {
        let key = request_key(request)?;
        let manifest_path = self.entry_dir(&key).join("manifest.json");
        if !manifest_path.exists() {
            return Err(AppError::CacheMiss { key });
        }
        let content = fs::read_to_string(manifest_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Drop the entry for one request, if present.
    pub fn invalidate(&self, request: &MatchRequest) -> AppResult<()> {
        let key = request_key(request)?;
        let entry_dir = self.entry_dir(&key);
        if entry_dir.exists() {
            fs::remove_dir_all(entry_dir)?;
        }
        Ok(())
    }

    /// Drop every entry.
    pub fn clear(&self) -> AppResult<()> {
        if self.root_dir.exists() {
            fs::remove_dir_all(&self.root_dir)?;
            fs::create_dir_all(&self.root_dir)?;
        }
        Ok(())
    }
}
