//! Method-call surface over `Table`.
//!
//! Attribute lists are whitespace separated, as in `Schema::parse`:
//! `movie.join("studioName", "name", &studio, &mut ctx)`.

use relalg_core::prelude::{Key, Table, Tuple};

use crate::context::ExecContext;
use crate::filter::{Filter, Select};
use crate::join::{EquiJoin, HashJoin, IndexJoin, NaturalJoin, ThetaJoin};
use crate::lookup::KeySelect;
use crate::project::Project;
use crate::set::{Intersect, Minus, Union};
use crate::traits::{OpError, Operator};

pub trait Relational {
    fn project(&self, attributes: &str, ctx: &mut ExecContext) -> Result<Table, OpError>;

    fn select<F>(&self, predicate: F, ctx: &mut ExecContext) -> Result<Table, OpError>
    where
        F: Fn(&Tuple) -> bool;

    /// `condition` is "attr OP literal".
    fn select_where(&self, condition: &str, ctx: &mut ExecContext) -> Result<Table, OpError>;

    fn select_key(&self, key: &Key, ctx: &mut ExecContext) -> Result<Table, OpError>;

    fn union(&self, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError>;

    fn minus(&self, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError>;

    fn intersect(&self, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError>;

    fn join(
        &self,
        attributes1: &str,
        attributes2: &str,
        other: &Table,
        ctx: &mut ExecContext,
    ) -> Result<Table, OpError>;

    /// `condition` is "leftAttr OP rightAttr".
    fn theta_join(&self, condition: &str, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError>;

    fn index_join(
        &self,
        attributes1: &str,
        attributes2: &str,
        other: &Table,
        ctx: &mut ExecContext,
    ) -> Result<Table, OpError>;

    fn natural_join(&self, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError>;

    fn hash_join(
        &self,
        attributes1: &str,
        attributes2: &str,
        other: &Table,
        ctx: &mut ExecContext,
    ) -> Result<Table, OpError>;
}

impl Relational for Table {
    fn project(&self, attributes: &str, ctx: &mut ExecContext) -> Result<Table, OpError> {
        Project::new(attributes.split_whitespace()).eval(&[self], ctx)
    }

    fn select<F>(&self, predicate: F, ctx: &mut ExecContext) -> Result<Table, OpError>
    where
        F: Fn(&Tuple) -> bool,
    {
        Select::new(predicate).eval(&[self], ctx)
    }

    fn select_where(&self, condition: &str, ctx: &mut ExecContext) -> Result<Table, OpError> {
        Filter::new(condition).eval(&[self], ctx)
    }

    fn select_key(&self, key: &Key, ctx: &mut ExecContext) -> Result<Table, OpError> {
        KeySelect::new(key.clone()).eval(&[self], ctx)
    }

    fn union(&self, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError> {
        Union.eval(&[self, other], ctx)
    }

    fn minus(&self, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError> {
        Minus.eval(&[self, other], ctx)
    }

    fn intersect(&self, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError> {
        Intersect.eval(&[self, other], ctx)
    }

    fn join(
        &self,
        attributes1: &str,
        attributes2: &str,
        other: &Table,
        ctx: &mut ExecContext,
    ) -> Result<Table, OpError> {
        EquiJoin::new(attributes1.split_whitespace(), attributes2.split_whitespace())
            .with_suffix(ctx.rename_suffix())
            .eval(&[self, other], ctx)
    }

    fn theta_join(&self, condition: &str, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError> {
        ThetaJoin::new(condition)
            .with_suffix(ctx.rename_suffix())
            .eval(&[self, other], ctx)
    }

    fn index_join(
        &self,
        attributes1: &str,
        attributes2: &str,
        other: &Table,
        ctx: &mut ExecContext,
    ) -> Result<Table, OpError> {
        IndexJoin::new(attributes1.split_whitespace(), attributes2.split_whitespace())
            .with_suffix(ctx.rename_suffix())
            .eval(&[self, other], ctx)
    }

    fn natural_join(&self, other: &Table, ctx: &mut ExecContext) -> Result<Table, OpError> {
        NaturalJoin.eval(&[self, other], ctx)
    }

    fn hash_join(
        &self,
        attributes1: &str,
        attributes2: &str,
        other: &Table,
        ctx: &mut ExecContext,
    ) -> Result<Table, OpError> {
        HashJoin::new(attributes1.split_whitespace(), attributes2.split_whitespace())
            .with_suffix(ctx.rename_suffix())
            .eval(&[self, other], ctx)
    }
}
