//! Operator planning surfaces: `Complexity` and `OpPlan`.

use std::fmt;

use relalg_core::prelude::Schema;
use serde::{Deserialize, Serialize};

/// Asymptotic cost class of an operator over inputs of `n` and `m` tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    /// One index probe.
    Lookup,
    /// One scan of the input.
    Linear,
    /// One pass over each input (build + probe).
    Sum,
    /// Every pair of tuples is compared.
    Product,
}

impl Complexity {
    /// Rough number of tuple visits for inputs of the given cardinalities.
    pub fn estimate(self, n: u64, m: u64) -> u64 {
        match self {
            Complexity::Lookup => 1,
            Complexity::Linear => n,
            Complexity::Sum => n.saturating_add(m),
            Complexity::Product => n.saturating_mul(m),
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Complexity::Lookup => "O(1)",
            Complexity::Linear => "O(n)",
            Complexity::Sum => "O(n+m)",
            Complexity::Product => "O(n*m)",
        })
    }
}

/// Operator plan: output schema and cost class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpPlan {
    pub output_schema: Schema,
    pub complexity: Complexity,
}

impl OpPlan {
    pub fn new(output_schema: Schema, complexity: Complexity) -> Self {
        Self {
            output_schema,
            complexity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate() {
        assert_eq!(Complexity::Lookup.estimate(1_000, 0), 1);
        assert_eq!(Complexity::Sum.estimate(1_000, 50), 1_050);
        assert_eq!(Complexity::Product.estimate(1_000, 50), 50_000);
        assert_eq!(Complexity::Product.estimate(u64::MAX, 2), u64::MAX);
    }
}
