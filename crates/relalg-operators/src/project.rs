//! Projection onto a list of attributes.

use relalg_core::prelude::{Schema, Table};

use crate::context::ExecContext;
use crate::metrics;
use crate::plan::{Complexity, OpPlan};
use crate::traits::{materialize, unary, OpError, Operator};

/// Keep `attributes` in the given order. Duplicate tuples are not removed.
#[derive(Debug, Clone)]
pub struct Project {
    pub attributes: Vec<String>,
}

impl Project {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Operator for Project {
    fn name(&self) -> &'static str {
        "project"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        let schema = unary(self.name(), input_schemas)?;
        Ok(OpPlan::new(schema.project(&self.attributes)?, Complexity::Linear))
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let input = unary(self.name(), inputs)?;
        let plan = self.plan(&[input.schema()])?;
        let cols = input.schema().match_columns(&self.attributes)?;

        let tuples = input.tuples().iter().map(|t| t.project(&cols)).collect();
        let out = materialize(ctx, input, plan.output_schema, tuples);
        metrics::record(self.name(), inputs, plan.complexity, &out);
        Ok(out)
    }
}
