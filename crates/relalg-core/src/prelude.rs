//! Convenient re-exports for downstream crates.

pub use crate::config::EngineConfig;
pub use crate::error::{Error, Result};
pub use crate::index::{BTreeIndex, HashIndex, Index, IndexKind, MultiIndex};
pub use crate::schema::{Attribute, Domain, Schema};
pub use crate::table::Table;
pub use crate::types::{Key, Tuple, Value};
pub use crate::values;
