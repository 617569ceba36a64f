//! Point selection through a table's primary-key index.

use relalg_core::prelude::{Key, Schema, Table};

use crate::context::ExecContext;
use crate::metrics;
use crate::plan::{Complexity, OpPlan};
use crate::traits::{materialize, unary, OpError, Operator};

/// Returns zero or one tuple. A key of the wrong arity or domains finds
/// nothing.
#[derive(Debug, Clone)]
pub struct KeySelect {
    pub key: Key,
}

impl KeySelect {
    pub fn new(key: impl Into<Key>) -> Self {
        Self { key: key.into() }
    }
}

impl Operator for KeySelect {
    fn name(&self) -> &'static str {
        "select_key"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        let schema = unary(self.name(), input_schemas)?;
        Ok(OpPlan::new(schema.clone(), Complexity::Lookup))
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let input = unary(self.name(), inputs)?;
        let plan = self.plan(&[input.schema()])?;

        let tuples = input.get(&self.key).cloned().into_iter().collect();
        let out = materialize(ctx, input, plan.output_schema, tuples);
        metrics::record(self.name(), inputs, plan.complexity, &out);
        Ok(out)
    }
}
