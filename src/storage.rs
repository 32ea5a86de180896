//! Storage abstraction layer for dictionary artifacts.
//!
//! A compiled dictionary is a pair of line-oriented artifacts (a node table and
//! a pattern table). This module exposes a small pluggable storage facade so
//! that the builder can write them and the lazy reader can load them without
//! caring whether they live on disk or in memory.
//!
//! # Storage Types
//!
//! ## FileStorage
//! - Disk-based persistent storage rooted at a directory
//! - Optionally memory-maps artifacts on read so untouched lines are never paged in
//!
//! ## MemoryStorage
//! - In-memory storage for tests and embedded dictionaries
//!
//! # Example
//!
//! ```
//! use translit::storage::{MemoryStorage, Storage};
//! use std::io::Write;
//!
//! # fn main() -> translit::error::Result<()> {
//! let storage = MemoryStorage::new();
//! let mut output = storage.create_output("hello.txt")?;
//! output.write_all(b"hello")?;
//! output.close()?;
//!
//! assert_eq!(&*storage.read_all("hello.txt")?, b"hello");
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod memory;
pub mod traits;

pub use file::{FileInput, FileOutput, FileStorage};
pub use memory::{MemoryInput, MemoryOutput, MemoryStorage};
pub use traits::{Storage, StorageBytes, StorageConfig, StorageError, StorageInput, StorageOutput};
