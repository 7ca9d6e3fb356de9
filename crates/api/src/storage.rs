//! Local-disk storage for uploaded photos.
//!
//! Files land in a flat directory under generated names and are served
//! statically under a public prefix. Deleting a photo row never removes its
//! file here.

use std::path::PathBuf;

use sideludi_core::upload::{generate_filename, public_url};

use crate::error::{AppError, AppResult};

/// Where uploads are written and the URL prefix they are served from.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are written to (default: `uploads`).
    pub dir: PathBuf,
    /// URL prefix the directory is served under (default: `/uploads`).
    pub public_prefix: String,
}

impl UploadConfig {
    /// Load upload configuration from environment variables.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `UPLOAD_DIR`           | `uploads`  |
    /// | `UPLOAD_PUBLIC_PREFIX` | `/uploads` |
    pub fn from_env() -> Self {
        let dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());
        let public_prefix =
            std::env::var("UPLOAD_PUBLIC_PREFIX").unwrap_or_else(|_| "/uploads".into());

        assert!(
            public_prefix.starts_with('/'),
            "UPLOAD_PUBLIC_PREFIX must start with '/'"
        );

        Self {
            dir: PathBuf::from(dir),
            public_prefix,
        }
    }
}

/// Writes uploaded bytes to the upload directory.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    config: UploadConfig,
}

impl UploadStorage {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.config.dir
    }

    pub fn public_prefix(&self) -> &str {
        &self.config.public_prefix
    }

    /// Persist `data` under a freshly generated name and return its public URL.
    pub async fn persist(&self, original_name: &str, data: &[u8]) -> AppResult<String> {
        tokio::fs::create_dir_all(&self.config.dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

        let filename = generate_filename(original_name, chrono::Utc::now());
        let path = self.config.dir.join(&filename);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

        tracing::info!(path = %path.display(), bytes = data.len(), "Stored upload");
        Ok(public_url(&self.config.public_prefix, &filename))
    }

    /// Remove a file previously returned by [`persist`](Self::persist).
    ///
    /// Only used to undo a write whose row could not be recorded. Failures
    /// are logged, not returned. URLs outside the public prefix are ignored.
    pub async fn discard(&self, url: &str) {
        let prefix = format!("{}/", self.config.public_prefix.trim_end_matches('/'));
        let Some(filename) = url.strip_prefix(&prefix) else {
            return;
        };
        if filename.is_empty() || filename.starts_with('.') || filename.contains('/') {
            return;
        }

        let path = self.config.dir.join(filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::info!(path = %path.display(), "Discarded upload"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to discard upload"),
        }
    }
}
