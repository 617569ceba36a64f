use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::Storage;
use crate::error::{Error, Result};

/// Local filesystem storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// The root directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Storage for FsStorage {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let p = self.resolve(path);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Storage(format!("mkparent: {e}")))?;
        }
        let mut f = File::create(&p).map_err(|e| Error::Storage(format!("create: {e}")))?;
        f.write_all(bytes)
            .map_err(|e| Error::Storage(format!("write: {e}")))?;
        f.flush()
            .map_err(|e| Error::Storage(format!("flush: {e}")))?;
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        fs::read(self.resolve(path)).map_err(|e| Error::Storage(format!("read {path}: {e}")))
    }

    fn delete(&self, path: &str) -> Result<()> {
        let p = self.resolve(path);
        if p.exists() {
            fs::remove_file(p).map_err(|e| Error::Storage(format!("delete: {e}")))?;
        }
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut results = Vec::new();
        if !self.root.is_dir() {
            return Ok(results);
        }

        fn visit_dirs(root: &Path, dir: &Path, results: &mut Vec<String>) -> std::io::Result<()> {
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    visit_dirs(root, &path, results)?;
                } else if let Ok(rel) = path.strip_prefix(root) {
                    let parts: Vec<_> = rel.iter().filter_map(|c| c.to_str()).collect();
                    results.push(parts.join("/"));
                }
            }
            Ok(())
        }

        visit_dirs(&self.root, &self.root, &mut results)
            .map_err(|e| Error::Storage(format!("list: {e}")))?;
        results.retain(|p| p.starts_with(prefix));
        results.sort();
        Ok(results)
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path().join("store"));

        assert!(storage.list("").unwrap().is_empty());
        storage.write("movie.dbf", b"movie").unwrap();
        storage.write("nested/studio.dbf", b"studio").unwrap();

        assert_eq!(storage.read("movie.dbf").unwrap(), b"movie");
        assert!(storage.exists("nested/studio.dbf").unwrap());
        assert_eq!(storage.list("").unwrap(), vec!["movie.dbf", "nested/studio.dbf"]);
        assert_eq!(storage.list("nested/").unwrap(), vec!["nested/studio.dbf"]);

        storage.delete("movie.dbf").unwrap();
        storage.delete("movie.dbf").unwrap();
        assert!(!storage.exists("movie.dbf").unwrap());
        assert!(matches!(storage.read("movie.dbf"), Err(Error::Storage(_))));
    }

    #[test]
    fn test_fs_storage_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path());
        storage.write("a", b"first").unwrap();
        storage.write("a", b"second").unwrap();
        assert_eq!(storage.read("a").unwrap(), b"second");
    }
}
