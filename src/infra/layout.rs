//! Filesystem-backed layout skeleton.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::repos::{LayoutError, LayoutSource};

/// Reads the skeleton from disk on every fetch, so edits to the layout file
/// show up without a restart.
#[derive(Debug, Clone)]
pub struct FileLayoutSource {
    path: PathBuf,
}

impl FileLayoutSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LayoutSource for FileLayoutSource {
    async fn fetch_layout_skeleton(&self) -> Result<String, LayoutError> {
        fs::read_to_string(&self.path)
            .await
            .map_err(|source| LayoutError::Read {
                path: self.path.display().to_string(),
                source,
            })
    }
}
