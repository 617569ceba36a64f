//! Natural join over all commonly named attributes.

use relalg_core::prelude::{Attribute, Schema, Table, Value};

use crate::condition::check_domains;
use crate::context::ExecContext;
use crate::metrics;
use crate::plan::{Complexity, OpPlan};
use crate::traits::{binary, materialize, OpError, Operator};

/// Column layout shared by `plan` and `eval`.
struct Layout {
    /// (left column, right column) per common attribute, in left order.
    common: Vec<(usize, usize)>,
    /// Right columns that survive into the output.
    keep: Vec<usize>,
    schema: Schema,
}

fn layout(left: &Schema, right: &Schema) -> Result<Layout, OpError> {
    let mut common = Vec::new();
    for (l, attr) in left.attributes().iter().enumerate() {
        if let Some(r) = right.index_of(&attr.name) {
            check_domains(attr.domain, right.attributes()[r].domain)?;
            common.push((l, r));
        }
    }

    let keep: Vec<usize> = (0..right.arity())
        .filter(|r| !common.iter().any(|&(_, c)| c == *r))
        .collect();

    let mut attributes: Vec<Attribute> = left.attributes().to_vec();
    attributes.extend(keep.iter().map(|&r| right.attributes()[r].clone()));
    let schema = Schema::new(attributes, left.key().iter().cloned())?;

    Ok(Layout {
        common,
        keep,
        schema,
    })
}

/// With no common attributes every pair qualifies (cartesian product).
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalJoin;

impl Operator for NaturalJoin {
    fn name(&self) -> &'static str {
        "natural_join"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        let (left, right) = binary(self.name(), input_schemas)?;
        Ok(OpPlan::new(layout(left, right)?.schema, Complexity::Product))
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let (left, right) = binary(self.name(), inputs)?;
        let Layout {
            common,
            keep,
            schema,
        } = layout(left.schema(), right.schema())?;

        let mut tuples = Vec::new();
        for l in left.tuples() {
            for r in right.tuples() {
                if common.iter().all(|&(a, b)| l[a] == r[b]) {
                    let tail: Vec<Value> = keep.iter().map(|&c| r[c].clone()).collect();
                    tuples.push(l.concat(&tail));
                }
            }
        }

        let out = materialize(ctx, left, schema, tuples);
        metrics::record(self.name(), inputs, Complexity::Product, &out);
        Ok(out)
    }
}
