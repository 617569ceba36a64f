//! Textual comparison conditions: `attr op literal` and `attr1 op attr2`.
//!
//! The operator is the first run of `= ! < >` characters; everything left of
//! it must be a single attribute name and the right side must be non-empty.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use relalg_core::prelude::{Domain, Error, Result, Schema, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Whether `left.cmp(right) == ord` satisfies this operator.
    pub fn holds(self, ord: Ordering) -> bool {
        match self {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Ne => ord != Ordering::Equal,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Le => ord != Ordering::Greater,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Ge => ord != Ordering::Less,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "==" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::Ne),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Le),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Ge),
            other => Err(Error::Parse(format!("unsupported comparison operator '{other}'"))),
        }
    }
}

/// A parsed but unresolved condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub attribute: String,
    pub op: CompareOp,
    /// Literal text (selection) or the right-hand attribute name (theta-join).
    pub operand: String,
}

impl Condition {
    pub fn parse(text: &str) -> Result<Condition> {
        let malformed = || Error::Parse(format!("malformed condition '{text}'"));

        let is_op = |c: char| matches!(c, '=' | '!' | '<' | '>');

        let start = text.find(is_op).ok_or_else(malformed)?;
        let len = text[start..]
            .find(|c: char| !is_op(c))
            .unwrap_or(text.len() - start);
        let op: CompareOp = text[start..start + len].parse()?;

        let attribute = text[..start].trim();
        let operand = text[start + len..].trim();
        if attribute.is_empty() || attribute.contains(char::is_whitespace) || operand.is_empty() {
            return Err(malformed());
        }

        Ok(Condition {
            attribute: attribute.to_string(),
            op,
            operand: operand.to_string(),
        })
    }

    /// Resolve against `schema` with the operand read as a literal in the
    /// attribute's domain.
    pub fn bind_literal(&self, schema: &Schema) -> Result<BoundCondition> {
        let (col, domain) = schema.resolve(&self.attribute)?;
        let literal = Value::parse(domain, &self.operand)?;
        Ok(BoundCondition {
            col,
            op: self.op,
            literal,
        })
    }

    /// Resolve against a left and right schema with the operand read as a
    /// right-hand attribute name. Both sides must share a domain.
    pub fn bind_columns(&self, left: &Schema, right: &Schema) -> Result<(usize, CompareOp, usize)> {
        let (l, ld) = left.resolve(&self.attribute)?;
        let (r, rd) = right.resolve(&self.operand)?;
        check_domains(ld, rd)?;
        Ok((l, self.op, r))
    }
}

impl FromStr for Condition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Condition::parse(s)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.op, self.operand)
    }
}

/// A condition resolved to a column position and a typed literal.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCondition {
    pub col: usize,
    pub op: CompareOp,
    pub literal: Value,
}

impl BoundCondition {
    pub fn matches(&self, values: &[Value]) -> bool {
        self.op.holds(values[self.col].cmp(&self.literal))
    }
}

pub(crate) fn check_domains(left: Domain, right: Domain) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(Error::DomainMismatch { left, right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Schema {
        Schema::parse(
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
        )
        .unwrap()
    }

    #[test]
    fn test_parse_with_and_without_spaces() {
        let a = Condition::parse("year >= 1977").unwrap();
        let b = Condition::parse("year>=1977").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.op, CompareOp::Ge);
        assert_eq!(a.operand, "1977");
    }

    #[test]
    fn test_parse_rejects_unknown_operator() {
        assert!(matches!(Condition::parse("year => 1977"), Err(Error::Parse(_))));
        assert!(matches!(Condition::parse("year <> 1977"), Err(Error::Parse(_))));
        assert!(matches!(Condition::parse("year = 1977"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "year", "== 1977", "year ==", "long title == x"] {
            assert!(matches!(Condition::parse(text), Err(Error::Parse(_))), "{text}");
        }
    }

    #[test]
    fn test_bind_literal_uses_domain() {
        let s = movie();
        let bound = Condition::parse("length < 130").unwrap().bind_literal(&s).unwrap();
        assert_eq!(bound.col, 2);
        assert_eq!(bound.literal, Value::Integer(130));

        let quoted = Condition::parse("title == 'Star_Wars'").unwrap().bind_literal(&s).unwrap();
        assert_eq!(quoted.literal, Value::from("Star_Wars"));
    }

    #[test]
    fn test_bind_literal_errors() {
        let s = movie();
        let err = Condition::parse("rating > 3").unwrap().bind_literal(&s).unwrap_err();
        assert_eq!(err, Error::UnknownAttribute("rating".into()));
        let err = Condition::parse("year > soon").unwrap().bind_literal(&s).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_numeric_order_not_textual() {
        let s = movie();
        let bound = Condition::parse("length > 99").unwrap().bind_literal(&s).unwrap();
        let row = [
            Value::from("Rocky"),
            Value::from(1985),
            Value::from(200),
            Value::from("drama"),
            Value::from("MGM"),
            Value::from(1),
        ];
        assert!(bound.matches(&row));
    }

    #[test]
    fn test_bind_columns_checks_domains() {
        let movie = movie();
        let studio = Schema::parse("name address presNo", "String String Integer", "name").unwrap();
        let ok = Condition::parse("producerNo < presNo").unwrap();
        assert_eq!(ok.bind_columns(&movie, &studio).unwrap(), (5, CompareOp::Lt, 2));

        let bad = Condition::parse("year == name").unwrap();
        assert!(matches!(
            bad.bind_columns(&movie, &studio),
            Err(Error::DomainMismatch { .. })
        ));
    }

    #[test]
    fn test_holds_table() {
        use Ordering::*;
        assert!(CompareOp::Le.holds(Equal) && CompareOp::Le.holds(Less) && !CompareOp::Le.holds(Greater));
        assert!(CompareOp::Ne.holds(Less) && !CompareOp::Ne.holds(Equal));
        assert!(CompareOp::Gt.holds(Greater) && !CompareOp::Gt.holds(Equal));
    }
}
