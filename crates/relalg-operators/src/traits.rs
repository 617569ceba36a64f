//! Operator trait + common interfaces.
//!
//! `plan(...)` derives the output schema (and validates attribute names,
//! domains and conditions) without touching any tuples; `eval(...)` does the
//! same validation and then materializes the result table.

use relalg_core::prelude::{Schema, Table};

use crate::context::ExecContext;
use crate::plan::OpPlan;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error(transparent)]
    Core(#[from] relalg_core::Error),

    #[error("incompatible schemas: {0}")]
    IncompatibleSchema(String),

    #[error("planning error: {0}")]
    Plan(String),

    #[error("unsupported operator: {0}")]
    Unsupported(&'static str),
}

impl OpError {
    /// The core error behind this one, if any.
    pub fn core(&self) -> Option<&relalg_core::Error> {
        match self {
            OpError::Core(e) => Some(e),
            _ => None,
        }
    }
}

/// Trait that all operators implement.
///
/// Invariants:
/// - `eval` never mutates its inputs; the result owns a fresh tuple sequence.
/// - `eval` is deterministic given the same inputs.
/// - The schema `eval` produces equals `plan(...)?.output_schema`.
pub trait Operator {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Given input schemas, return the output schema and complexity class.
    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError>;

    /// Evaluate the operator. Unary operators take `inputs[0]`; binary
    /// operators take `inputs[0]` (left) and `inputs[1]` (right).
    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError>;
}

pub(crate) fn unary<'a, T: ?Sized>(name: &str, inputs: &[&'a T]) -> Result<&'a T, OpError> {
    match inputs {
        [one] => Ok(*one),
        _ => Err(OpError::Plan(format!(
            "{name} expects one input, got {}",
            inputs.len()
        ))),
    }
}

pub(crate) fn binary<'a, T: ?Sized>(
    name: &str,
    inputs: &[&'a T],
) -> Result<(&'a T, &'a T), OpError> {
    match inputs {
        [left, right] => Ok((*left, *right)),
        _ => Err(OpError::Plan(format!(
            "{name} expects two inputs, got {}",
            inputs.len()
        ))),
    }
}

/// Wrap operator output in a freshly named table that inherits the left
/// operand's index backing.
pub(crate) fn materialize(
    ctx: &mut ExecContext,
    base: &Table,
    schema: Schema,
    tuples: Vec<relalg_core::prelude::Tuple>,
) -> Table {
    Table::from_tuples(ctx.derive_name(base.name()), schema, base.index_kind(), tuples)
}
