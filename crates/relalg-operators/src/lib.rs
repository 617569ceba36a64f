#![forbid(unsafe_code)]
//! relalg-operators: relational algebra over `relalg_core::Table`.
//!
//! Design intent:
//! - Pure and synchronous. Operators read their operands and return a newly
//!   materialized `Table`; operands are never mutated.
//! - Each operator exposes a planning surface (`OpPlan`) with the output
//!   schema and a complexity class, and an `eval` that does the work.
//! - Derived table names come from an explicit `ExecContext`.

pub mod condition;
pub mod context;
pub mod ext;
pub mod plan;
pub mod traits;

pub mod filter;
pub mod lookup;
pub mod project;
pub mod set;

pub mod join;

mod metrics;

#[cfg(test)]
mod fixtures;

pub use condition::{CompareOp, Condition};
pub use context::ExecContext;
pub use ext::Relational;
pub use plan::{Complexity, OpPlan};
pub use traits::{OpError, Operator};
