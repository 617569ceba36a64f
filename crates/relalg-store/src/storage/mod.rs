//! Byte storage for snapshots.
//!
//! - `fs`: files under a root directory.
//! - `memory`: shared in-process map, for tests and throwaway sessions.
//!
//! Paths are `/`-separated and relative to the backend's root.

mod fs;
mod memory;

pub use fs::FsStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

pub trait Storage: Send + Sync {
    /// Write bytes to a path, replacing any previous content.
    fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Read the whole object at a path.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Delete a path. Idempotent (no error if path doesn't exist).
    fn delete(&self, path: &str) -> Result<()>;

    /// All paths starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;

    fn exists(&self, path: &str) -> Result<bool>;
}
