// src/storage/processed.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::naia::ProcessedUrls;
use crate::utils::error::StorageError;

// On-disk shape: {"urls": [...], "updated_at": "..."}
#[derive(Debug, Serialize, Deserialize)]
struct ProcessedUrlsFile {
    #[serde(default)]
    urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// JSON file backing for the processed URL set.
pub struct ProcessedUrlStore {
    path: PathBuf,
}

impl ProcessedUrlStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty set. So is a corrupt one, with a warning.
    pub fn load(&self) -> Result<ProcessedUrls, StorageError> {
        if !self.path.exists() {
            return Ok(ProcessedUrls::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<ProcessedUrlsFile>(&contents) {
            Ok(file) => Ok(file.urls.into_iter().collect()),
            Err(e) => {
                tracing::warn!("Ignoring unreadable processed URL file {}: {}", self.path.display(), e);
                Ok(ProcessedUrls::new())
            }
        }
    }

    pub fn save(&self, processed: &ProcessedUrls) -> Result<(), StorageError> {
        let file = ProcessedUrlsFile {
            urls: processed.iter().map(String::from).collect(),
            updated_at: Some(Utc::now()),
        };

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;

        tracing::info!("Saved {} processed URLs to {}", processed.len(), self.path.display());
        Ok(())
    }
}
