//! Hash join.
//!
//! Plans like `EquiJoin` (same validation, same output schema) but has no
//! evaluation strategy yet.

use relalg_core::prelude::{Schema, Table};

use super::{join_schema, resolve_pairs, DEFAULT_RENAME_SUFFIX};
use crate::context::ExecContext;
use crate::plan::{Complexity, OpPlan};
use crate::traits::{binary, OpError, Operator};

#[derive(Debug, Clone)]
pub struct HashJoin {
    pub left_attrs: Vec<String>,
    pub right_attrs: Vec<String>,
    pub rename_suffix: String,
}

impl HashJoin {
    pub fn new<L, R, S>(left_attrs: L, right_attrs: R) -> Self
    where
        L: IntoIterator<Item = S>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            left_attrs: left_attrs.into_iter().map(Into::into).collect(),
            right_attrs: right_attrs.into_iter().map(Into::into).collect(),
            rename_suffix: DEFAULT_RENAME_SUFFIX.to_string(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.rename_suffix = suffix.into();
        self
    }
}

impl Operator for HashJoin {
    fn name(&self) -> &'static str {
        "hash_join"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        let (left, right) = binary(self.name(), input_schemas)?;
        resolve_pairs(left, right, &self.left_attrs, &self.right_attrs)?;
        Ok(OpPlan::new(
            join_schema(left, right, &self.rename_suffix)?,
            Complexity::Sum,
        ))
    }

    fn eval(&self, inputs: &[&Table], _ctx: &mut ExecContext) -> Result<Table, OpError> {
        let (left, right) = binary(self.name(), inputs)?;
        self.plan(&[left.schema(), right.schema()])?;
        Err(OpError::Unsupported("hash_join"))
    }
}
