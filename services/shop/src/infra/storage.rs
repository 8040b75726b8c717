//! Local-disk upload storage, served back under `/uploads`.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::repository::FileStore;
use crate::error::IntegrationError;

/// URL prefix the upload directory is mounted at.
pub const UPLOADS_PATH: &str = "/uploads";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Lowercased extension of `file_name` if it is an accepted image type.
pub fn image_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

#[derive(Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileStore for LocalFileStore {
    async fn store(&self, extension: &str, bytes: Bytes) -> Result<String, IntegrationError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| IntegrationError::Storage(format!("create upload dir: {e}")))?;

        let name = format!("{}.{extension}", Uuid::now_v7());
        tokio::fs::write(self.root.join(&name), &bytes)
            .await
            .map_err(|e| IntegrationError::Storage(format!("write {name}: {e}")))?;

        tracing::info!(file = %name, size = bytes.len(), "upload stored");
        Ok(format!("{UPLOADS_PATH}/{name}"))
    }
}
