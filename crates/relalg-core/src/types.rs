//! Runtime values, tuples and composite keys.
//!
//! `Value` carries exactly one domain-typed payload. Equality, ordering and
//! hashing agree with each other: floating point payloads use the IEEE total
//! order, so `NaN == NaN` and `-0.0 != 0.0`. Values of different domains are
//! never equal; the derived `Ord` sorts them by domain so they can live in one
//! ordered map, while `try_cmp` is the checked comparison operators use.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::schema::Domain;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Integer(i32),
    Long(i64),
    Short(i16),
    Byte(i8),
    Double(#[serde(with = "f64_bits")] f64),
    Float(#[serde(with = "f32_bits")] f32),
    Character(char),
    String(String),
}

impl Value {
    pub fn domain(&self) -> Domain {
        match self {
            Value::Integer(_) => Domain::Integer,
            Value::Long(_) => Domain::Long,
            Value::Short(_) => Domain::Short,
            Value::Byte(_) => Domain::Byte,
            Value::Double(_) => Domain::Double,
            Value::Float(_) => Domain::Float,
            Value::Character(_) => Domain::Character,
            Value::String(_) => Domain::String,
        }
    }

    /// Parse a literal in the given domain. Character and string literals may
    /// be wrapped in single or double quotes.
    pub fn parse(domain: Domain, literal: &str) -> Result<Value> {
        let literal = literal.trim();
        let value = match domain {
            Domain::Integer => Value::Integer(literal.parse().map_err(bad(domain, literal))?),
            Domain::Long => Value::Long(literal.parse().map_err(bad(domain, literal))?),
            Domain::Short => Value::Short(literal.parse().map_err(bad(domain, literal))?),
            Domain::Byte => Value::Byte(literal.parse().map_err(bad(domain, literal))?),
            Domain::Double => Value::Double(literal.parse().map_err(bad(domain, literal))?),
            Domain::Float => Value::Float(literal.parse().map_err(bad(domain, literal))?),
            Domain::Character => {
                let mut chars = unquote(literal).chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Value::Character(c),
                    _ => return Err(bad(domain, literal)(())),
                }
            }
            Domain::String => Value::String(unquote(literal).to_string()),
        };
        Ok(value)
    }

    /// Compare two values of the same domain.
    pub fn try_cmp(&self, other: &Value) -> Result<Ordering> {
        if self.domain() != other.domain() {
            return Err(Error::DomainMismatch {
                left: self.domain(),
                right: other.domain(),
            });
        }
        Ok(self.cmp(other))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

fn bad<E>(domain: Domain, literal: &str) -> impl FnOnce(E) -> Error + '_ {
    move |_| Error::Parse(format!("cannot parse '{literal}' as {domain}"))
}

fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Long(a), Long(b)) => a.cmp(b),
            (Short(a), Short(b)) => a.cmp(b),
            (Byte(a), Byte(b)) => a.cmp(b),
            (Double(a), Double(b)) => a.total_cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Character(a), Character(b)) => a.cmp(b),
            (String(a), String(b)) => a.cmp(b),
            // Mixed domains: order by domain
            _ => self.domain().cmp(&other.domain()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain().hash(state);
        match self {
            Value::Integer(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Byte(v) => v.hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Character(v) => v.hash(state),
            Value::String(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Character(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from!(
    i32 => Integer,
    i64 => Long,
    i16 => Short,
    i8 => Byte,
    f64 => Double,
    f32 => Float,
    char => Character,
    String => String,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// Build a `Vec<Value>` from literals: `values!["Fox", "Los_Angeles", 7777]`.
#[macro_export]
macro_rules! values {
    ($($v:expr),* $(,)?) => {
        vec![$($crate::types::Value::from($v)),*]
    };
}

/// One row: an immutable, cheaply clonable sequence of values.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tuple(Arc<[Value]>);

impl Tuple {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values.into())
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Values at `cols`, in that order.
    pub fn project(&self, cols: &[usize]) -> Tuple {
        Tuple::new(cols.iter().map(|&c| self.0[c].clone()).collect())
    }

    /// This tuple followed by `tail`.
    pub fn concat(&self, tail: &[Value]) -> Tuple {
        let mut values = Vec::with_capacity(self.0.len() + tail.len());
        values.extend_from_slice(&self.0);
        values.extend_from_slice(tail);
        Tuple::new(values)
    }

    pub fn key(&self, cols: &[usize]) -> Key {
        Key::new(cols.iter().map(|&c| self.0[c].clone()).collect())
    }
}

impl Deref for Tuple {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(values: Vec<Value>) -> Self {
        Tuple::new(values)
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, &self.0)
    }
}

impl Serialize for Tuple {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tuple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<Value>::deserialize(deserializer).map(Tuple::new)
    }
}

// Floats are serialized by their IEEE bit pattern. JSON has no spelling for
// NaN or the infinities, and the bits also keep -0.0 and NaN payloads, which
// the total order tells apart.
mod f64_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(v.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        u64::deserialize(deserializer).map(f64::from_bits)
    }
}

mod f32_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(v.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        u32::deserialize(deserializer).map(f32::from_bits)
    }
}

/// Composite lookup key: a tuple projected onto the key attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Vec<Value>);

impl Key {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn single(value: impl Into<Value>) -> Self {
        Self(vec![value.into()])
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Value> for Key {
    fn from(v: Value) -> Self {
        Key(vec![v])
    }
}

impl From<Vec<Value>> for Key {
    fn from(values: Vec<Value>) -> Self {
        Key(values)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, &self.0)
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    write!(f, "(")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v}")?;
    }
    write!(f, ")")
}
