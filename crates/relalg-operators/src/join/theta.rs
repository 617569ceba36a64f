//! Theta-join: one comparison between a left and a right attribute.

use relalg_core::prelude::{Schema, Table};

use super::{join_schema, DEFAULT_RENAME_SUFFIX};
use crate::condition::Condition;
use crate::context::ExecContext;
use crate::metrics;
use crate::plan::{Complexity, OpPlan};
use crate::traits::{binary, materialize, OpError, Operator};

#[derive(Debug, Clone)]
pub struct ThetaJoin {
    /// "leftAttr OP rightAttr"
    pub condition: String,
    pub rename_suffix: String,
}

impl ThetaJoin {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            rename_suffix: DEFAULT_RENAME_SUFFIX.to_string(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.rename_suffix = suffix.into();
        self
    }
}

impl Operator for ThetaJoin {
    fn name(&self) -> &'static str {
        "theta_join"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        let (left, right) = binary(self.name(), input_schemas)?;
        Condition::parse(&self.condition)?.bind_columns(left, right)?;
        Ok(OpPlan::new(
            join_schema(left, right, &self.rename_suffix)?,
            Complexity::Product,
        ))
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let (left, right) = binary(self.name(), inputs)?;
        let plan = self.plan(&[left.schema(), right.schema()])?;
        let (lc, op, rc) = Condition::parse(&self.condition)?.bind_columns(left.schema(), right.schema())?;

        let mut tuples = Vec::new();
        for l in left.tuples() {
            for r in right.tuples() {
                if op.holds(l[lc].cmp(&r[rc])) {
                    tuples.push(l.concat(r));
                }
            }
        }

        let out = materialize(ctx, left, plan.output_schema, tuples);
        metrics::record(self.name(), inputs, plan.complexity, &out);
        Ok(out)
    }
}
