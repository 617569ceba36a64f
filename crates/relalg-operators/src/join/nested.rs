//! Nested-loop equi-join.

use relalg_core::prelude::{Schema, Table};

use super::{join_schema, resolve_pairs, DEFAULT_RENAME_SUFFIX};
use crate::context::ExecContext;
use crate::metrics;
use crate::plan::{Complexity, OpPlan};
use crate::traits::{binary, materialize, OpError, Operator};

/// Pairs every left tuple with every right tuple whose `right_attrs` values
/// equal the left tuple's `left_attrs` values.
#[derive(Debug, Clone)]
pub struct EquiJoin {
    pub left_attrs: Vec<String>,
    pub right_attrs: Vec<String>,
    pub rename_suffix: String,
}

impl EquiJoin {
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

impl Operator for EquiJoin {
    fn name(&self) -> &'static str {
        "join"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        let (left, right) = binary(self.name(), input_schemas)?;
        resolve_pairs(left, right, &self.left_attrs, &self.right_attrs)?;
        Ok(OpPlan::new(
            join_schema(left, right, &self.rename_suffix)?,
            Complexity::Product,
        ))
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let (left, right) = binary(self.name(), inputs)?;
        let plan = self.plan(&[left.schema(), right.schema()])?;
        let (lc, rc) = resolve_pairs(left.schema(), right.schema(), &self.left_attrs, &self.right_attrs)?;

        let mut tuples = Vec::new();
        for l in left.tuples() {
            for r in right.tuples() {
                if lc.iter().zip(&rc).all(|(&a, &b)| l[a] == r[b]) {
                    tuples.push(l.concat(r));
                }
            }
        }

        let out = materialize(ctx, left, plan.output_schema, tuples);
        metrics::record(self.name(), inputs, plan.complexity, &out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{movie, movie_star, rows, stars_in, studio};
    use relalg_core::prelude::*;

    #[test]
    fn test_movie_studio_join() {
        let mut ctx = ExecContext::new();
        let (m, s) = (movie(), studio());
        let out = EquiJoin::new(["studioName"], ["name"]).eval(&[&m, &s], &mut ctx).unwrap();

        assert_eq!(out.schema().arity(), 9);
        assert_eq!(
            rows(&out),
            vec![
                values!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345, "Fox", "Los_Angeles", 7777],
                values!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345, "Fox", "Los_Angeles", 7777],
                values!["Rocky", 1985, 200, "action", "Universal", 12125, "Universal", "Universal_City", 8888],
                values!["Rambo", 1978, 100, "action", "Universal", 32355, "Universal", "Universal_City", 8888],
            ]
        );
        assert_eq!(out.schema().key(), m.schema().key());
    }

    #[test]
    fn test_composite_join_renames_collision() {
        let mut ctx = ExecContext::new();
        let (m, si) = (movie(), stars_in());
        let out = EquiJoin::new(["title", "year"], ["movieTitle", "movieYear"])
            .eval(&[&m, &si], &mut ctx)
            .unwrap();
        assert_eq!(out.len(), 3);

        let stars = movie_star();
        let out = EquiJoin::new(["name"], ["name"]).eval(&[&stars, &stars], &mut ctx).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(
            out.attribute_names(),
            vec!["name", "address", "gender", "birthdate", "name2", "address2", "gender2", "birthdate2"]
        );
    }

    #[test]
    fn test_join_errors() {
        let mut ctx = ExecContext::new();
        let (m, s) = (movie(), studio());
        let err = EquiJoin::new(["year"], ["name"]).eval(&[&m, &s], &mut ctx).unwrap_err();
        assert!(matches!(err, OpError::Core(Error::DomainMismatch { .. })));
        let err = EquiJoin::new(["studioName"], ["label"]).eval(&[&m, &s], &mut ctx).unwrap_err();
        assert!(matches!(err, OpError::Core(Error::UnknownAttribute(_))));
        let none: [&str; 0] = [];
        let err = EquiJoin::new(none, none).eval(&[&m, &s], &mut ctx).unwrap_err();
        assert!(matches!(err, OpError::Core(Error::Schema(_))));
    }

    #[test]
    fn test_custom_suffix() {
        let stars = movie_star();
        let plan = EquiJoin::new(["name"], ["name"])
            .with_suffix("_b")
            .plan(&[stars.schema(), stars.schema()])
            .unwrap();
        assert_eq!(plan.output_schema.names()[4], "name_b");
    }
}
