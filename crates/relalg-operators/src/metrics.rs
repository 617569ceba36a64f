//! Tracing hooks for operator evaluation.

use relalg_core::Table;

use crate::plan::Complexity;

pub(crate) fn record(op: &'static str, inputs: &[&Table], complexity: Complexity, output: &Table) {
    let operands: Vec<&str> = inputs.iter().map(|t| t.name()).collect();
    tracing::debug!(
        op,
        operands = ?operands,
        complexity = %complexity,
        result = output.name(),
        rows = output.len(),
        "RA"
    );
}
