#![forbid(unsafe_code)]
//! relalg-core: domains, values, schemas, keys, indices and tables.
//!
//! Everything here is pure and synchronous. Relational operators live in
//! `relalg-operators`; persistence lives in `relalg-store`.

pub mod config;
pub mod display;
pub mod error;
pub mod index;
pub mod prelude;
pub mod schema;
pub mod table;
pub mod types;

pub use error::{Error, Result};
pub use table::Table;
