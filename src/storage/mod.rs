// Local upload storage
// Raw uploads land in the configured upload directory as `<id>_<file name>`.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::types::AppResult;

#[derive(Debug, Clone)]
pub struct UploadStorage {
    upload_dir: PathBuf,
    output_dir: PathBuf,
}

impl UploadStorage {
    pub fn new(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, &config.output_dir)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the upload and parser output directories if missing
    pub async fn ensure_dirs(&self) -> AppResult<()> {
        fs::create_dir_all(&self.upload_dir).await?;
        fs::create_dir_all(&self.output_dir).await?;
        info!(
            upload_dir = %self.upload_dir.display(),
            output_dir = %self.output_dir.display(),
            "Storage directories ready"
        );
        Ok(())
    }

    /// Path an upload with this id and client file name is stored under
    pub fn upload_path(&self, id: &str, file_name: &str) -> PathBuf {
        self.upload_dir
            .join(format!("{}_{}", id, base_name(file_name)))
    }

    /// Write raw upload bytes and return where they were stored
    pub async fn save(&self, id: &str, file_name: &str, data: &[u8]) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.upload_dir).await?;
        let path = self.upload_path(id, file_name);
        fs::write(&path, data).await?;
        debug!(path = %path.display(), bytes = data.len(), "Upload written");
        Ok(path)
    }

    /// Best-effort removal of a saved upload
    pub async fn remove(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "Failed to remove upload");
        }
    }
}

/// Last path component of a client-supplied file name. Handles both `/` and
/// `\` separators since browsers on Windows may send full paths.
pub fn base_name(file_name: &str) -> &str {
    let trimmed = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match trimmed {
        "" | "." | ".." => "upload",
        name => name,
    }
}
