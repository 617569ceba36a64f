#![forbid(unsafe_code)]
//! relalg-store: persistence for `relalg_core::Table`.
//!
//! A table is saved as one self-describing snapshot (header, JSON payload,
//! BLAKE3 trailer) under a named slot. Loading replays every tuple through
//! `Table::insert`, so the key index is rebuilt and the data re-validated.

pub mod catalog;
pub mod codec;
pub mod error;
pub mod snapshot;
pub mod storage;

pub use catalog::{Catalog, SLOT_EXT};
pub use codec::Codec;
pub use error::{Error, Result};
pub use storage::{FsStorage, MemoryStorage, Storage};
