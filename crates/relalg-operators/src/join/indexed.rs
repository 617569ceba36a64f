//! Index-assisted equi-join.
//!
//! Builds an operator-local `MultiIndex` over the right table's join columns
//! and probes it once per left tuple. Neither table's own index is read or
//! written. Matches come out in right-table order, so the result is identical
//! to `EquiJoin` on the same inputs.

use relalg_core::prelude::{MultiIndex, Schema, Table};
use tracing::debug;

use super::{join_schema, resolve_pairs, DEFAULT_RENAME_SUFFIX};
use crate::context::ExecContext;
use crate::metrics;
use crate::plan::{Complexity, OpPlan};
use crate::traits::{binary, materialize, OpError, Operator};

#[derive(Debug, Clone)]
pub struct IndexJoin {
    pub left_attrs: Vec<String>,
    pub right_attrs: Vec<String>,
    pub rename_suffix: String,
}

impl IndexJoin {
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

impl Operator for IndexJoin {
    fn name(&self) -> &'static str {
        "index_join"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        let (left, right) = binary(self.name(), input_schemas)?;
        resolve_pairs(left, right, &self.left_attrs, &self.right_attrs)?;
        Ok(OpPlan::new(
            join_schema(left, right, &self.rename_suffix)?,
            Complexity::Sum,
        ))
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let (left, right) = binary(self.name(), inputs)?;
        let plan = self.plan(&[left.schema(), right.schema()])?;
        let (lc, rc) = resolve_pairs(left.schema(), right.schema(), &self.left_attrs, &self.right_attrs)?;

        let probe = MultiIndex::build(right.tuples(), &rc);
        debug!(table = right.name(), keys = probe.keys(), tuples = probe.len(), "built join index");

        let mut tuples = Vec::new();
        for l in left.tuples() {
            for r in probe.get(&l.key(&lc)) {
                tuples.push(l.concat(r));
            }
        }

        let out = materialize(ctx, left, plan.output_schema, tuples);
        metrics::record(self.name(), inputs, plan.complexity, &out);
        Ok(out)
    }
}
