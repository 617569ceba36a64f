//! Set operators over union-compatible tables.
//!
//! Tuples are compared structurally. The output schema is the left schema.

use std::collections::HashSet;

use relalg_core::prelude::{Schema, Table, Tuple};
use tracing::warn;

use crate::context::ExecContext;
use crate::metrics;
use crate::plan::{Complexity, OpPlan};
use crate::traits::{binary, materialize, OpError, Operator};

fn check_compatible(op: &str, left: &Schema, right: &Schema) -> Result<(), OpError> {
    if left.compatible(right) {
        return Ok(());
    }
    warn!(op, left = %left, right = %right, "incompatible schemas");
    Err(OpError::IncompatibleSchema(format!("{op}: {left} vs {right}")))
}

fn plan_set(op: &str, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
    let (left, right) = binary(op, input_schemas)?;
    check_compatible(op, left, right)?;
    Ok(OpPlan::new(left.clone(), Complexity::Sum))
}

/// Every left tuple, then each right tuple not already collected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Union;

impl Operator for Union {
    fn name(&self) -> &'static str {
        "union"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        plan_set(self.name(), input_schemas)
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let (left, right) = binary(self.name(), inputs)?;
        let plan = self.plan(&[left.schema(), right.schema()])?;

        let mut seen: HashSet<&Tuple> = HashSet::with_capacity(left.len() + right.len());
        let mut tuples = Vec::with_capacity(left.len() + right.len());
        for t in left.tuples() {
            seen.insert(t);
            tuples.push(t.clone());
        }
        for t in right.tuples() {
            if seen.insert(t) {
                tuples.push(t.clone());
            }
        }

        let out = materialize(ctx, left, plan.output_schema, tuples);
        metrics::record(self.name(), inputs, plan.complexity, &out);
        Ok(out)
    }
}

/// Left tuples with no equal tuple on the right, in left order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minus;

impl Operator for Minus {
    fn name(&self) -> &'static str {
        "minus"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        plan_set(self.name(), input_schemas)
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let (left, right) = binary(self.name(), inputs)?;
        let plan = self.plan(&[left.schema(), right.schema()])?;

        let other: HashSet<&Tuple> = right.tuples().iter().collect();
        let tuples = left
            .tuples()
            .iter()
            .filter(|t| !other.contains(*t))
            .cloned()
            .collect();

        let out = materialize(ctx, left, plan.output_schema, tuples);
        metrics::record(self.name(), inputs, plan.complexity, &out);
        Ok(out)
    }
}

/// Left tuples that also occur on the right, in left order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intersect;

impl Operator for Intersect {
    fn name(&self) -> &'static str {
        "intersect"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        plan_set(self.name(), input_schemas)
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let (left, right) = binary(self.name(), inputs)?;
        let plan = self.plan(&[left.schema(), right.schema()])?;

        let other: HashSet<&Tuple> = right.tuples().iter().collect();
        let tuples = left
            .tuples()
            .iter()
            .filter(|t| other.contains(*t))
            .cloned()
            .collect();

        let out = materialize(ctx, left, plan.output_schema, tuples);
        metrics::record(self.name(), inputs, plan.complexity, &out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{cinema, movie, rows, studio};
    use relalg_core::prelude::*;

    #[test]
    fn test_union_drops_shared_tuple() {
        let mut ctx = ExecContext::new();
        let (m, c) = (movie(), cinema());
        let out = Union.eval(&[&m, &c], &mut ctx).unwrap();
        assert_eq!(out.len(), 5);
        assert_eq!(&out.tuples()[..4], m.tuples());
        assert_eq!(rows(&out)[4], values!["Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890]);
    }

    #[test]
    fn test_minus_and_intersect() {
        let mut ctx = ExecContext::new();
        let (m, c) = (movie(), cinema());
        let diff = Minus.eval(&[&m, &c], &mut ctx).unwrap();
        let both = Intersect.eval(&[&m, &c], &mut ctx).unwrap();

        let titles: Vec<_> = diff.tuples().iter().map(|t| t[0].to_string()).collect();
        assert_eq!(titles, vec!["Star_Wars", "Star_Wars_2", "Rambo"]);
        assert_eq!(rows(&both), vec![values!["Rocky", 1985, 200, "action", "Universal", 12125]]);
    }

    #[test]
    fn test_compatible_ignores_names() {
        let mut ctx = ExecContext::new();
        let m = movie();
        let mut films = Table::parse(
            "films",
            "t y l g s p",
            "String Integer Integer String String Integer",
            "t",
        )
        .unwrap();
        films.insert(values!["Rambo", 1978, 100, "action", "Universal", 32355]).unwrap();
        let out = Minus.eval(&[&m, &films], &mut ctx).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.schema(), m.schema());
    }

    #[test]
    fn test_incompatible_is_recoverable() {
        let mut ctx = ExecContext::new();
        let (m, s) = (movie(), studio());
        for err in [
            Union.eval(&[&m, &s], &mut ctx).unwrap_err(),
            Minus.eval(&[&m, &s], &mut ctx).unwrap_err(),
            Intersect.eval(&[&m, &s], &mut ctx).unwrap_err(),
        ] {
            assert!(matches!(err, OpError::IncompatibleSchema(_)));
        }
        assert_eq!(m.len(), 4);
    }
}
