use std::{io::Error, io::ErrorKind, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::config;

#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerdeError(err)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum CacheCategory {
    Track,
    Album,
    Playlist,
    Image,
    Lyrics,
    Token,
}

impl CacheCategory {
    pub fn dir_name(&self) -> &'static str {
        match self {
            CacheCategory::Track => "track",
            CacheCategory::Album => "album",
            CacheCategory::Playlist => "playlist",
            CacheCategory::Image => "image",
            CacheCategory::Lyrics => "lyrics",
            CacheCategory::Token => "token",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            CacheCategory::Image => "jpg",
            CacheCategory::Lyrics => "txt",
            _ => "json",
        }
    }
}

pub struct CacheManager {
    root: PathBuf,
}

impl CacheManager {
    pub fn new() -> Self {
        Self {
            root: config::cache_dir(),
        }
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub async fn store<T: Serialize>(
        &self,
        category: CacheCategory,
        key: &str,
        value: &T,
    ) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(value)?;
        self.store_bytes(category, key, json.as_bytes()).await
    }

    pub async fn store_text(
        &self,
        category: CacheCategory,
        key: &str,
        text: &str,
    ) -> Result<(), CacheError> {
        self.store_bytes(category, key, text.as_bytes()).await
    }

    pub async fn store_bytes(
        &self,
        category: CacheCategory,
        key: &str,
        bytes: &[u8],
    ) -> Result<(), CacheError> {
        let path = self.entry_path(category, key);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        async_fs::write(&path, bytes).await?;
        Ok(())
    }

    // A miss and a corrupt entry look identical; callers refetch either way.
    pub async fn retrieve<T: DeserializeOwned>(
        &self,
        category: CacheCategory,
        key: &str,
    ) -> Option<T> {
        let content = self.retrieve_text(category, key).await?;
        serde_json::from_str(&content).ok()
    }

    pub async fn retrieve_text(&self, category: CacheCategory, key: &str) -> Option<String> {
        async_fs::read_to_string(self.entry_path(category, key))
            .await
            .ok()
    }

    pub async fn retrieve_bytes(&self, category: CacheCategory, key: &str) -> Option<Vec<u8>> {
        async_fs::read(self.entry_path(category, key)).await.ok()
    }

    pub async fn clear(&self, category: CacheCategory) -> Result<(), CacheError> {
        Self::remove_dir(self.root.join(category.dir_name())).await
    }

    pub async fn clear_all(&self) -> Result<(), CacheError> {
        Self::remove_dir(self.root.clone()).await
    }

    async fn remove_dir(path: PathBuf) -> Result<(), CacheError> {
        match async_fs::remove_dir_all(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::IoError(e)),
        }
    }

    fn entry_path(&self, category: CacheCategory, key: &str) -> PathBuf {
        self.root
            .join(category.dir_name())
            .join(format!("{}.{}", key, category.extension()))
    }
}
