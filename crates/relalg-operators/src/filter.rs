//! Selection operators.
//!
//! `Select` takes an arbitrary predicate over a tuple; `Filter` takes a textual
//! condition of the form "attr OP literal" where OP ∈ {==, !=, <, <=, >, >=}.
//! Both keep the schema and the input order.

use relalg_core::prelude::{Schema, Table, Tuple};

use crate::condition::Condition;
use crate::context::ExecContext;
use crate::metrics;
use crate::plan::{Complexity, OpPlan};
use crate::traits::{materialize, unary, OpError, Operator};

pub struct Select<F> {
    predicate: F,
}

impl<F> Select<F>
where
    F: Fn(&Tuple) -> bool,
{
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> Operator for Select<F>
where
    F: Fn(&Tuple) -> bool,
{
    fn name(&self) -> &'static str {
        "select"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        let schema = unary(self.name(), input_schemas)?;
        Ok(OpPlan::new(schema.clone(), Complexity::Linear))
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let input = unary(self.name(), inputs)?;
        let plan = self.plan(&[input.schema()])?;

        let tuples = input
            .tuples()
            .iter()
            .filter(|t| (self.predicate)(*t))
            .cloned()
            .collect();
        let out = materialize(ctx, input, plan.output_schema, tuples);
        metrics::record(self.name(), inputs, plan.complexity, &out);
        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct Filter {
    pub condition: String,
}

impl Filter {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
        }
    }
}

impl Operator for Filter {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn plan(&self, input_schemas: &[&Schema]) -> Result<OpPlan, OpError> {
        let schema = unary(self.name(), input_schemas)?;
        Condition::parse(&self.condition)?.bind_literal(schema)?;
        Ok(OpPlan::new(schema.clone(), Complexity::Linear))
    }

    fn eval(&self, inputs: &[&Table], ctx: &mut ExecContext) -> Result<Table, OpError> {
        let input = unary(self.name(), inputs)?;
        let bound = Condition::parse(&self.condition)?.bind_literal(input.schema())?;

        let tuples = input
            .tuples()
            .iter()
            .filter(|t| bound.matches(t))
            .cloned()
            .collect();
        let out = materialize(ctx, input, input.schema().clone(), tuples);
        metrics::record(self.name(), inputs, Complexity::Linear, &out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{movie, movie_star, rows};
    use relalg_core::prelude::*;

    #[test]
    fn test_select_predicate() {
        let mut ctx = ExecContext::new();
        let stars = movie_star();
        let col = stars.col("name").unwrap();
        let out = Select::new(|t: &Tuple| t[col] == Value::from("Harrison_Ford"))
            .eval(&[&stars], &mut ctx)
            .unwrap();
        assert_eq!(rows(&out), vec![values!["Harrison_Ford", "Beverly_Hills", 'M', "7/7/77"]]);
        assert_eq!(out.schema(), stars.schema());
    }

    #[test]
    fn test_select_none_and_all() {
        let mut ctx = ExecContext::new();
        let m = movie();
        let none = Select::new(|_: &Tuple| false).eval(&[&m], &mut ctx).unwrap();
        let all = Select::new(|_: &Tuple| true).eval(&[&m], &mut ctx).unwrap();
        assert!(none.is_empty());
        assert_eq!(all.tuples(), m.tuples());
        assert_eq!(all.name(), "movie1");
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut ctx = ExecContext::new();
        let m = movie();
        let out = Filter::new("year < 1980").eval(&[&m], &mut ctx).unwrap();
        let titles: Vec<_> = out.tuples().iter().map(|t| t[0].to_string()).collect();
        assert_eq!(titles, vec!["Star_Wars", "Rambo"]);

        let out = Filter::new("genre != 'sciFi'").eval(&[&m], &mut ctx).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_filter_character_domain() {
        let mut ctx = ExecContext::new();
        let stars = movie_star();
        let out = Filter::new("gender == M").eval(&[&stars], &mut ctx).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_filter_errors() {
        let mut ctx = ExecContext::new();
        let m = movie();
        let err = Filter::new("year ~ 1977").eval(&[&m], &mut ctx).unwrap_err();
        assert!(matches!(err, OpError::Core(Error::Parse(_))));

        let err = Filter::new("rating > 3").eval(&[&m], &mut ctx).unwrap_err();
        assert!(matches!(err, OpError::Core(Error::UnknownAttribute(_))));

        let err = Filter::new("year > 19x7").plan(&[m.schema()]).unwrap_err();
        assert!(matches!(err, OpError::Core(Error::Parse(_))));
    }
}
