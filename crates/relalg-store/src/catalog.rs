//! Named table slots over a `Storage` backend.
//!
//! A slot is the file `<name>.dbf` at the storage root holding one snapshot.

use relalg_core::config::EngineConfig;
use relalg_core::Table;
use tracing::{debug, info};

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::snapshot;
use crate::storage::{FsStorage, Storage};

pub const SLOT_EXT: &str = ".dbf";

pub struct Catalog {
    storage: Box<dyn Storage>,
    codec: Codec,
}

impl Catalog {
    pub fn new(storage: Box<dyn Storage>, codec: Codec) -> Self {
        Self { storage, codec }
    }

    /// File-backed catalog in `cfg.store_dir`, compressing with `cfg.snapshot_codec`.
    pub fn from_config(cfg: &EngineConfig) -> Result<Self> {
        let codec = Codec::from_name(&cfg.snapshot_codec)?;
        Ok(Self::new(Box::new(FsStorage::new(&cfg.store_dir)), codec))
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Write `table` to the slot named after it, replacing any earlier save.
    pub fn save(&self, table: &Table) -> Result<String> {
        let path = slot_path(table.name())?;
        let bytes = snapshot::encode(table, self.codec)?;
        self.storage.write(&path, &bytes)?;
        info!(slot = table.name(), rows = table.len(), bytes = bytes.len(), "saved table");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Table> {
        let path = slot_path(name)?;
        if !self.storage.exists(&path)? {
            return Err(Error::Storage(format!("no slot named '{name}'")));
        }
        let table = snapshot::decode(&self.storage.read(&path)?)?;
        debug!(slot = name, rows = table.len(), "loaded table");
        Ok(table)
    }

    /// Names of saved slots, sorted.
    pub fn slots(&self) -> Result<Vec<String>> {
        Ok(self
            .storage
            .list("")?
            .into_iter()
            .filter(|p| !p.contains('/'))
            .filter_map(|p| p.strip_suffix(SLOT_EXT).map(str::to_string))
            .filter(|n| !n.is_empty())
            .collect())
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        self.storage.exists(&slot_path(name)?)
    }

    /// Delete a slot. Removing a missing slot is not an error.
    pub fn remove(&self, name: &str) -> Result<()> {
        self.storage.delete(&slot_path(name)?)?;
        debug!(slot = name, "removed slot");
        Ok(())
    }
}

fn slot_path(name: &str) -> Result<String> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| c == '/' || c == '\\')
        && !name.chars().any(char::is_control);
    if !valid {
        return Err(Error::Storage(format!("invalid slot name '{name}'")));
    }
    Ok(format!("{name}{SLOT_EXT}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use relalg_core::prelude::{Key, Schema};
    use relalg_core::values;

    fn movie_star() -> Table {
        let mut t = Table::new(
            "movieStar",
            Schema::parse(
                "name address gender birthdate",
                "String String Character String",
                "name",
            )
            .unwrap(),
        );
        t.insert(values!["Carrie_Fisher", "Hollywood", 'F', "9/9/99"]).unwrap();
        t.insert(values!["Harrison_Ford", "Beverly_Hills", 'M', "7/7/77"]).unwrap();
        t
    }

    #[test]
    fn test_save_load_list_remove() {
        let storage = MemoryStorage::new();
        let catalog = Catalog::new(Box::new(storage.clone()), Codec::None);

        assert_eq!(catalog.save(&movie_star()).unwrap(), "movieStar.dbf");
        assert!(storage.exists("movieStar.dbf").unwrap());
        assert_eq!(catalog.slots().unwrap(), vec!["movieStar"]);

        let back = catalog.load("movieStar").unwrap();
        assert_eq!(back.len(), 2);
        assert!(back.get(&Key::single("Harrison_Ford")).is_some());

        catalog.remove("movieStar").unwrap();
        assert!(!catalog.contains("movieStar").unwrap());
        assert!(catalog.slots().unwrap().is_empty());
    }

    #[test]
    fn test_missing_and_invalid_slots() {
        let catalog = Catalog::new(Box::new(MemoryStorage::new()), Codec::None);
        assert!(matches!(catalog.load("studio"), Err(Error::Storage(_))));
        for bad in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(catalog.load(bad), Err(Error::Storage(_))), "{bad}");
        }
    }

    #[test]
    fn test_corrupt_slot_is_reported() {
        let storage = MemoryStorage::new();
        let catalog = Catalog::new(Box::new(storage.clone()), Codec::None);
        catalog.save(&movie_star()).unwrap();

        let mut bytes = storage.read("movieStar.dbf").unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        storage.insert("movieStar.dbf", bytes).unwrap();
        assert!(matches!(catalog.load("movieStar"), Err(Error::ChecksumMismatch)));
    }

    #[test]
    fn test_from_config_rejects_unknown_codec() {
        let cfg = EngineConfig {
            snapshot_codec: "brotli".into(),
            ..EngineConfig::default()
        };
        assert!(matches!(Catalog::from_config(&cfg), Err(Error::CodecUnsupported(_))));
    }
}
