use super::{FileInfo, Storage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

const ALIGNMENT_EXTENSION: &str = "bam";
const INDEX_EXTENSION: &str = "bai";

pub struct LocalStorage {
    data_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn make_file_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", id, ALIGNMENT_EXTENSION))
    }

    /// Index candidates: appended (`x.bam.bai`) first, then replaced (`x.bai`).
    fn index_candidates(path: &Path) -> [PathBuf; 2] {
        [
            PathBuf::from(format!("{}.{}", path.display(), INDEX_EXTENSION)),
            path.with_extension(INDEX_EXTENSION),
        ]
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn exists(&self, id: &str) -> Result<bool> {
        let path = self.make_file_path(id);
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn file_info(&self, id: &str) -> Result<FileInfo> {
        let path = self.make_file_path(id);
        let metadata = fs::metadata(&path)
            .await
            .map_err(|_| Error::NotFound(id.to_string()))?;

        let has_index = Self::index_candidates(&path).iter().any(|p| p.exists());

        Ok(FileInfo {
            id: id.to_string(),
            size: metadata.len(),
            has_index,
        })
    }

    async fn index_path(&self, id: &str) -> Result<Option<PathBuf>> {
        let path = self.make_file_path(id);
        Ok(Self::index_candidates(&path)
            .into_iter()
            .find(|p| p.exists()))
    }

    fn file_path(&self, id: &str) -> PathBuf {
        self.make_file_path(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_appended_index_preferred() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("s1.bam"), b"bam").unwrap();
        std::fs::write(dir.path().join("s1.bam.bai"), b"bai").unwrap();
        std::fs::write(dir.path().join("s1.bai"), b"bai").unwrap();

        let storage = LocalStorage::new(dir.path().to_path_buf());
        let index = storage.index_path("s1").await.unwrap().unwrap();
        assert_eq!(index, dir.path().join("s1.bam.bai"));
    }

    #[tokio::test]
    async fn test_replaced_extension_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("s2.bam"), b"bamdata").unwrap();
        std::fs::write(dir.path().join("s2.bai"), b"bai").unwrap();

        let storage = LocalStorage::new(dir.path().to_path_buf());
        let info = storage.file_info("s2").await.unwrap();
        assert_eq!(info.size, 7);
        assert!(info.has_index);
        assert_eq!(
            storage.index_path("s2").await.unwrap(),
            Some(dir.path().join("s2.bai"))
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf());
        assert!(!storage.exists("nope").await.unwrap());
        assert!(matches!(
            storage.file_info("nope").await,
            Err(Error::NotFound(_))
        ));
        assert_eq!(storage.index_path("nope").await.unwrap(), None);
    }
}
