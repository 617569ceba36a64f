//! Logical schema types: attribute domains, attributes and the schema itself.
//!
//! A `Schema` is validated on construction: attribute names are unique and the
//! primary key is a non-empty list of attribute names. Positions of the key
//! attributes are resolved once and cached.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Value;

/// The primitive type tag of an attribute's values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Domain {
    Integer,
    Long,
    Short,
    Byte,
    Double,
    Float,
    Character,
    String,
}

impl Domain {
    pub const ALL: [Domain; 8] = [
        Domain::Integer,
        Domain::Long,
        Domain::Short,
        Domain::Byte,
        Domain::Double,
        Domain::Float,
        Domain::Character,
        Domain::String,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Integer => "Integer",
            Domain::Long => "Long",
            Domain::Short => "Short",
            Domain::Byte => "Byte",
            Domain::Double => "Double",
            Domain::Float => "Float",
            Domain::Character => "Character",
            Domain::String => "String",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = Error;

    /// Accepts the canonical names (`Integer`, `String`, ...) and a few
    /// lower-case aliases (`int`, `long`, `char`, `str`, ...).
    fn from_str(s: &str) -> Result<Self> {
        let domain = match s {
            "Integer" | "integer" | "int" | "i32" => Domain::Integer,
            "Long" | "long" | "i64" => Domain::Long,
            "Short" | "short" | "i16" => Domain::Short,
            "Byte" | "byte" | "i8" => Domain::Byte,
            "Double" | "double" | "f64" => Domain::Double,
            "Float" | "float" | "f32" => Domain::Float,
            "Character" | "character" | "char" => Domain::Character,
            "String" | "string" | "str" => Domain::String,
            other => return Err(Error::Parse(format!("unknown domain '{other}'"))),
        };
        Ok(domain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: String,
    pub domain: Domain,
}

impl Attribute {
    pub fn new(name: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaSpec", into = "SchemaSpec")]
pub struct Schema {
    attributes: Vec<Attribute>,
    key: Vec<String>,
    key_cols: Vec<usize>,
}

impl Schema {
    pub fn new<K, S>(attributes: Vec<Attribute>, key: K) -> Result<Self>
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key: Vec<String> = key.into_iter().map(Into::into).collect();
        if attributes.is_empty() {
            return Err(Error::Schema("a schema needs at least one attribute".into()));
        }
        if key.is_empty() {
            return Err(Error::Schema("a schema needs at least one key attribute".into()));
        }

        let mut seen = HashSet::with_capacity(attributes.len());
        for attr in &attributes {
            if !seen.insert(attr.name.as_str()) {
                return Err(Error::Schema(format!(
                    "duplicate attribute name '{}'",
                    attr.name
                )));
            }
        }

        let mut key_cols = Vec::with_capacity(key.len());
        for name in &key {
            let pos = attributes
                .iter()
                .position(|a| &a.name == name)
                .ok_or_else(|| Error::UnknownAttribute(name.clone()))?;
            if key_cols.contains(&pos) {
                return Err(Error::Schema(format!("key attribute '{name}' listed twice")));
            }
            key_cols.push(pos);
        }

        Ok(Self {
            attributes,
            key,
            key_cols,
        })
    }

    /// Build a schema from whitespace-separated attribute names, domain names
    /// and key attribute names.
    ///
    /// ```
    /// use relalg_core::schema::Schema;
    /// let studio = Schema::parse("name address presNo", "String String Integer", "name").unwrap();
    /// assert_eq!(studio.arity(), 3);
    /// ```
    pub fn parse(attributes: &str, domains: &str, key: &str) -> Result<Self> {
        let names: Vec<&str> = attributes.split_whitespace().collect();
        let domains = domains
            .split_whitespace()
            .map(str::parse::<Domain>)
            .collect::<Result<Vec<_>>>()?;
        if names.len() != domains.len() {
            return Err(Error::Schema(format!(
                "{} attribute names but {} domains",
                names.len(),
                domains.len()
            )));
        }
        let attributes = names
            .into_iter()
            .zip(domains)
            .map(|(name, domain)| Attribute::new(name, domain))
            .collect();
        Self::new(attributes, key.split_whitespace())
    }

    pub fn arity(&self) -> usize {
        self.attributes.len()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, idx: usize) -> Option<&Attribute> {
        self.attributes.get(idx)
    }

    pub fn names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn domains(&self) -> Vec<Domain> {
        self.attributes.iter().map(|a| a.domain).collect()
    }

    pub fn key(&self) -> &[String] {
        &self.key
    }

    /// Positions of the key attributes, in key order.
    pub fn key_positions(&self) -> &[usize] {
        &self.key_cols
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Resolve attribute names to their positions, in the order given.
    pub fn match_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|n| {
                let n = n.as_ref();
                self.index_of(n)
                    .ok_or_else(|| Error::UnknownAttribute(n.to_string()))
            })
            .collect()
    }

    /// Resolve a single attribute name to `(position, domain)`.
    pub fn resolve(&self, name: &str) -> Result<(usize, Domain)> {
        let pos = self
            .index_of(name)
            .ok_or_else(|| Error::UnknownAttribute(name.to_string()))?;
        Ok((pos, self.attributes[pos].domain))
    }

    /// Check arity and the domain of every value against its positional attribute.
    pub fn type_check(&self, values: &[Value]) -> Result<()> {
        if values.len() != self.arity() {
            return Err(Error::Arity {
                expected: self.arity(),
                found: values.len(),
            });
        }
        for (position, (value, attr)) in values.iter().zip(&self.attributes).enumerate() {
            if value.domain() != attr.domain {
                return Err(Error::TypeMismatch {
                    position,
                    expected: attr.domain,
                    found: value.domain(),
                });
            }
        }
        Ok(())
    }

    /// Same arity and the same domain at every position; names may differ.
    pub fn compatible(&self, other: &Schema) -> bool {
        self.arity() == other.arity()
            && self
                .attributes
                .iter()
                .zip(&other.attributes)
                .all(|(a, b)| a.domain == b.domain)
    }

    /// Narrow the schema to `names` (in that order).
    ///
    /// The key survives when `names` covers it; otherwise `names` itself becomes
    /// the nominal key and uniqueness is no longer guaranteed.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Result<Schema> {
        if names.is_empty() {
            return Err(Error::Schema("projection needs at least one attribute".into()));
        }
        let cols = self.match_columns(names)?;
        let attributes: Vec<Attribute> =
            cols.iter().map(|&c| self.attributes[c].clone()).collect();
        let covers_key = self.key_cols.iter().all(|k| cols.contains(k));
        let key: Vec<String> = if covers_key {
            self.key.clone()
        } else {
            attributes.iter().map(|a| a.name.clone()).collect()
        };
        Schema::new(attributes, key)
    }
}

/// Serialized form of a schema; validated again when read back.
#[derive(Serialize, Deserialize)]
struct SchemaSpec {
    attributes: Vec<String>,
    domains: Vec<Domain>,
    key: Vec<String>,
}

impl TryFrom<SchemaSpec> for Schema {
    type Error = Error;

    fn try_from(spec: SchemaSpec) -> Result<Self> {
        if spec.attributes.len() != spec.domains.len() {
            return Err(Error::Schema(format!(
                "{} attribute names but {} domains",
                spec.attributes.len(),
                spec.domains.len()
            )));
        }
        let attributes = spec
            .attributes
            .into_iter()
            .zip(spec.domains)
            .map(|(name, domain)| Attribute { name, domain })
            .collect();
        Schema::new(attributes, spec.key)
    }
}

impl From<Schema> for SchemaSpec {
    fn from(schema: Schema) -> Self {
        let (attributes, domains) = schema
            .attributes
            .into_iter()
            .map(|a| (a.name, a.domain))
            .unzip();
        SchemaSpec {
            attributes,
            domains,
            key: schema.key,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", attr.name, attr.domain)?;
        }
        write!(f, ") key ({})", self.key.join(", "))
    }
}
