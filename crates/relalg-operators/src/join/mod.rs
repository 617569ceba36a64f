//! Join operators.
//!
//! Every join concatenates a left tuple with a right tuple. The output schema
//! is the left schema followed by the right one, with colliding right-hand
//! names renamed; natural join drops the common right columns instead. The
//! result key is the left key.

pub mod hash;
pub mod indexed;
pub mod natural;
pub mod nested;
pub mod theta;

use std::collections::HashSet;

use relalg_core::prelude::{Attribute, Error, Schema};

use crate::condition::check_domains;
use crate::traits::OpError;

pub use hash::HashJoin;
pub use indexed::IndexJoin;
pub use natural::NaturalJoin;
pub use nested::EquiJoin;
pub use theta::ThetaJoin;

pub const DEFAULT_RENAME_SUFFIX: &str = "2";

/// Left attributes, then right attributes with `suffix` appended to any name
/// already taken. If the suffixed name is taken too, `_1`, `_2`, ... follow.
pub fn join_schema(left: &Schema, right: &Schema, suffix: &str) -> Result<Schema, OpError> {
    let mut taken: HashSet<String> = left.names().into_iter().map(str::to_string).collect();
    let mut attributes: Vec<Attribute> = left.attributes().to_vec();

    for attr in right.attributes() {
        let name = if taken.contains(&attr.name) {
            let mut candidate = format!("{}{suffix}", attr.name);
            let mut n = 1u32;
            while taken.contains(&candidate) {
                candidate = format!("{}{suffix}_{n}", attr.name);
                n += 1;
            }
            candidate
        } else {
            attr.name.clone()
        };
        taken.insert(name.clone());
        attributes.push(Attribute::new(name, attr.domain));
    }

    Ok(Schema::new(attributes, left.key().iter().cloned())?)
}

/// Resolve paired equi-join attribute lists to column positions, checking
/// that each pair shares a domain.
pub fn resolve_pairs<S: AsRef<str>>(
    left: &Schema,
    right: &Schema,
    left_attrs: &[S],
    right_attrs: &[S],
) -> Result<(Vec<usize>, Vec<usize>), OpError> {
    if left_attrs.is_empty() || left_attrs.len() != right_attrs.len() {
        return Err(Error::Schema(format!(
            "join needs equally long, non-empty attribute lists ({} vs {})",
            left_attrs.len(),
            right_attrs.len()
        ))
        .into());
    }
    let lc = left.match_columns(left_attrs)?;
    let rc = right.match_columns(right_attrs)?;
    for (&l, &r) in lc.iter().zip(&rc) {
        check_domains(left.attributes()[l].domain, right.attributes()[r].domain)?;
    }
    Ok((lc, rc))
}
