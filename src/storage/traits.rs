//! Storage abstraction trait and common types.

use std::io::{Read, Write};
use std::ops::Deref;
use std::sync::Arc;

use memmap2::Mmap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslitError};

/// A trait for storage backends that can store and retrieve artifacts.
///
/// This provides a pluggable interface for different storage implementations
/// like file system or memory.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Open a file for reading.
    fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>>;

    /// Create a file for writing, truncating any existing content.
    fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>>;

    /// Check if a file exists.
    fn file_exists(&self, name: &str) -> bool;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete_file(&self, name: &str) -> Result<()>;

    /// List all files in the storage.
    fn list_files(&self) -> Result<Vec<String>>;

    /// Get the size of a file in bytes.
    fn file_size(&self, name: &str) -> Result<u64>;

    /// Rename a file, replacing the destination if it exists.
    fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()>;

    /// Read a whole file into memory (or map it, where the backend supports it).
    fn read_all(&self, name: &str) -> Result<StorageBytes> {
        let mut input = self.open_input(name)?;
        let mut buffer = Vec::with_capacity(input.size()? as usize);
        input.read_to_end(&mut buffer)?;
        Ok(StorageBytes::Owned(buffer))
    }

    /// Create a temporary file whose name starts with `prefix`.
    fn create_temp_output(&self, prefix: &str) -> Result<(String, Box<dyn StorageOutput>)> {
        let mut counter = 0;
        let mut temp_name;

        loop {
            temp_name = format!("{prefix}_{counter}.tmp");
            if !self.file_exists(&temp_name) {
                break;
            }
            counter += 1;

            if counter > 10000 {
                return Err(
                    StorageError::IoError("Could not create temporary file".to_string()).into(),
                );
            }
        }

        let output = self.create_output(&temp_name)?;
        Ok((temp_name, output))
    }
}

/// A trait for reading data from storage.
pub trait StorageInput: Read + Send + std::fmt::Debug {
    /// Get the size of the input stream.
    fn size(&self) -> Result<u64>;
}

/// A trait for writing data to storage.
pub trait StorageOutput: Write + Send + std::fmt::Debug {
    /// Flush and sync the output to storage.
    fn flush_and_sync(&mut self) -> Result<()>;

    /// Get the current position in the output stream.
    fn position(&self) -> Result<u64>;

    /// Close the output stream, making its content visible.
    fn close(&mut self) -> Result<()>;
}

/// The raw bytes of an artifact.
///
/// Dictionaries keep their artifacts in this form for their whole lifetime and
/// only slice lines out of it, so the backing may be an owned buffer, a
/// buffer shared with a storage backend, a `'static` embedded resource or a
/// memory map.
pub enum StorageBytes {
    Owned(Vec<u8>),
    Shared(Arc<[u8]>),
    Static(&'static [u8]),
    Mapped(Mmap),
}

impl Deref for StorageBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            StorageBytes::Owned(bytes) => bytes,
            StorageBytes::Shared(bytes) => bytes,
            StorageBytes::Static(bytes) => bytes,
            StorageBytes::Mapped(mmap) => mmap,
        }
    }
}

impl std::fmt::Debug for StorageBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            StorageBytes::Owned(_) => "Owned",
            StorageBytes::Shared(_) => "Shared",
            StorageBytes::Static(_) => "Static",
            StorageBytes::Mapped(_) => "Mapped",
        };
        f.debug_struct("StorageBytes")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

impl From<Vec<u8>> for StorageBytes {
    fn from(bytes: Vec<u8>) -> Self {
        StorageBytes::Owned(bytes)
    }
}

impl From<&'static [u8]> for StorageBytes {
    fn from(bytes: &'static [u8]) -> Self {
        StorageBytes::Static(bytes)
    }
}

impl From<Arc<[u8]>> for StorageBytes {
    fn from(bytes: Arc<[u8]>) -> Self {
        StorageBytes::Shared(bytes)
    }
}

/// Configuration for storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Whether to memory-map files on read (file storage only).
    pub use_mmap: bool,

    /// Buffer size for I/O operations.
    pub buffer_size: usize,

    /// Whether to flush on every write.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            use_mmap: false,
            buffer_size: 65536,
            sync_writes: false,
        }
    }
}

/// Error types specific to storage operations.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// File not found.
    FileNotFound(String),

    /// I/O error.
    IoError(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::FileNotFound(name) => write!(f, "File not found: {name}"),
            StorageError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for TranslitError {
    fn from(err: StorageError) -> Self {
        TranslitError::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();

        assert!(!config.use_mmap);
        assert_eq!(config.buffer_size, 65536);
        assert!(!config.sync_writes);
    }

    #[test]
    fn test_storage_config_partial_json() {
        let config: StorageConfig = serde_json::from_str(r#"{"use_mmap": true}"#).unwrap();
        assert!(config.use_mmap);
        assert_eq!(config.buffer_size, 65536);
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::FileNotFound("kanwa.nodes".to_string());
        assert_eq!(err.to_string(), "File not found: kanwa.nodes");

        let err = StorageError::IoError("disk full".to_string());
        assert_eq!(err.to_string(), "I/O error: disk full");

        let err: TranslitError = StorageError::FileNotFound("kanwa.patterns".to_string()).into();
        assert_eq!(err.to_string(), "Storage error: File not found: kanwa.patterns");
    }

    #[test]
    fn test_storage_bytes_deref() {
        let owned = StorageBytes::from(b"abc".to_vec());
        let fixed = StorageBytes::from(&b"abc"[..]);
        let shared = StorageBytes::from(Arc::<[u8]>::from(&b"abc"[..]));

        assert_eq!(&*owned, b"abc");
        assert_eq!(&*fixed, b"abc");
        assert_eq!(&*shared, b"abc");
        assert_eq!(
            format!("{fixed:?}"),
            "StorageBytes { kind: \"Static\", len: 3 }"
        );
    }
}
