//! Engine configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::index::IndexKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Backing used for the primary-key index of new tables.
    pub index_kind: IndexKind,

    /// Appended to a right-hand attribute name that collides in a join result.
    pub rename_suffix: String,

    /// Directory holding saved table slots.
    pub store_dir: String,

    /// Snapshot payload compression: `none`, `zstd` or `lz4`.
    pub snapshot_codec: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_kind: IndexKind::Hash,
            rename_suffix: "2".to_string(),
            store_dir: "store".to_string(),
            snapshot_codec: "none".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `RELALG_INDEX`: `hash` or `btree`
    /// - `RELALG_RENAME_SUFFIX`: join rename suffix
    /// - `RELALG_STORE_DIR`: snapshot directory
    /// - `RELALG_CODEC`: snapshot codec
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = var("RELALG_INDEX") {
            match s.parse::<IndexKind>() {
                Ok(v) => cfg.index_kind = v,
                Err(e) => warn!(value = %s, error = %e, "ignoring RELALG_INDEX"),
            }
        }

        if let Some(s) = var("RELALG_RENAME_SUFFIX") {
            if s.is_empty() {
                warn!("ignoring empty RELALG_RENAME_SUFFIX");
            } else {
                cfg.rename_suffix = s;
            }
        }

        if let Some(s) = var("RELALG_STORE_DIR") {
            cfg.store_dir = s;
        }

        if let Some(s) = var("RELALG_CODEC") {
            cfg.snapshot_codec = s;
        }

        cfg
    }
}
