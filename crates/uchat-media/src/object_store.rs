use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{MediaError, Result};

/// Where an upload ended up
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub path: PathBuf,
    pub url: String,
}

/// Upload storage on the local filesystem, served under a public base URL
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &Url) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.as_str().trim_end_matches('/').to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    /// Resolve a key to a path inside the root
    ///
    /// Keys are single path components; separators, parent references and
    /// hidden names are rejected as not found.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && !key.contains(['/', '\\', '\0'])
            && !key.contains("..");

        if valid {
            Ok(self.root.join(key))
        } else {
            Err(MediaError::NotFound)
        }
    }

    pub async fn put(&self, key: &str, bytes: &[u8]) -> Result<StoredObject> {
        let path = self.path_for(key)?;

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(key, size = bytes.len(), "stored upload");

        Ok(StoredObject {
            key: key.to_owned(),
            url: self.url_for(key),
            path,
        })
    }

    pub async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Err(MediaError::NotFound),
            Err(error) => Err(error.into()),
        }
    }
}
