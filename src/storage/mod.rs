//! Storage backend abstraction for alignment files and their indexes.
//!
//! Two layers live here:
//!
//! - [`Storage`] resolves a dataset id to an alignment file and its BAI,
//!   reporting existence and size. Handlers use it from async code.
//! - [`IndexSource`] opens a fresh forward-only byte stream over an index.
//!   Density estimation calls it from blocking code, once per query.
//!
//! # Implementations
//!
//! - [`LocalStorage`] - Local filesystem storage
//!
//! # Example
//!
//! ```no_run
//! use readdensity::storage::{Storage, LocalStorage};
//! use std::path::PathBuf;
//!
//! # async fn run() -> readdensity::Result<()> {
//! let storage = LocalStorage::new(PathBuf::from("./data"));
//! let info = storage.file_info("sample").await?;
//! println!("{} bytes, indexed: {}", info.size, info.has_index);
//! # Ok(())
//! # }
//! ```

mod local;

pub use local::LocalStorage;

use crate::Result;
use async_trait::async_trait;
use bytes::{Buf, Bytes};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

/// Metadata about a stored alignment file
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub id: String,
    pub size: u64,
    pub has_index: bool,
}

/// Storage backend trait for locating alignment files
#[async_trait]
pub trait Storage: Send + Sync {
    /// Check if an alignment file exists
    async fn exists(&self, id: &str) -> Result<bool>;

    /// Get file metadata
    async fn file_info(&self, id: &str) -> Result<FileInfo>;

    /// Get index file path if available
    async fn index_path(&self, id: &str) -> Result<Option<PathBuf>>;

    /// Path of the alignment file itself
    fn file_path(&self, id: &str) -> PathBuf;
}

/// Something an index can be streamed from, start to end.
pub trait IndexSource: Send + Sync {
    fn open(&self) -> Result<Box<dyn Read + Send + '_>>;
}

impl IndexSource for PathBuf {
    fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        let file = File::open(self)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

impl IndexSource for Bytes {
    fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(self.clone().reader()))
    }
}
