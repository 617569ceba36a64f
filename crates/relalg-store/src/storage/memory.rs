//! In-memory storage backend.
//!
//! Clones share the same map, so a catalog and a test can look at the same
//! objects.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::Storage;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> Result<MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.data
            .lock()
            .map_err(|_| Error::Storage("memory storage lock poisoned".into()))
    }

    /// Number of stored objects.
    pub fn len(&self) -> Result<usize> {
        Ok(self.map()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.map()?.is_empty())
    }

    /// Overwrite an object in place, bypassing any encoding.
    pub fn insert(&self, path: impl Into<String>, bytes: Vec<u8>) -> Result<()> {
        self.map()?.insert(path.into(), bytes);
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.insert(path, bytes.to_vec())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.map()?
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Storage(format!("path not found: {path}")))
    }

    fn delete(&self, path: &str) -> Result<()> {
        self.map()?.remove(path);
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .map()?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.map()?.contains_key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_write_read() {
        let storage = MemoryStorage::new();
        storage.write("slots/movie.dbf", b"hello world").unwrap();
        assert_eq!(storage.read("slots/movie.dbf").unwrap(), b"hello world");
        assert!(matches!(storage.read("slots/none.dbf"), Err(Error::Storage(_))));
    }

    #[test]
    fn test_memory_storage_clones_share_data() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.write("a", b"1").unwrap();
        assert!(other.exists("a").unwrap());
        other.delete("a").unwrap();
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn test_memory_storage_list() {
        let storage = MemoryStorage::new();
        storage.write("dir/file2", b"2").unwrap();
        storage.write("dir/file1", b"1").unwrap();
        storage.write("other/file3", b"3").unwrap();

        assert_eq!(storage.list("dir/").unwrap(), vec!["dir/file1", "dir/file2"]);
        assert_eq!(storage.len().unwrap(), 3);
    }
}
