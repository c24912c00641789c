//! Comparison operators for `where_by` / `first_where`

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CollectionError;
use crate::value_utils::{compare_values, values_equal};

/// Comparison applied between a record field and an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl Operator {
    /// Symbol form
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Apply the comparison `left <op> right`
    ///
    /// Ordering comparisons between values of different types are false.
    pub fn matches(self, left: &Value, right: &Value) -> bool {
        match self {
            Self::Eq => values_equal(left, right),
            Self::Ne => !values_equal(left, right),
            _ if std::mem::discriminant(left) != std::mem::discriminant(right) => false,
            Self::Gt => compare_values(left, right) == Ordering::Greater,
            Self::Gte => compare_values(left, right) != Ordering::Less,
            Self::Lt => compare_values(left, right) == Ordering::Less,
            Self::Lte => compare_values(left, right) != Ordering::Greater,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(Self::Eq),
            "!=" | "<>" => Ok(Self::Ne),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Gte),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Lte),
            other => Err(CollectionError::invalid_argument(
                "where_by",
                format!("unknown operator '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("=", Operator::Eq)]
    #[case("==", Operator::Eq)]
    #[case("<>", Operator::Ne)]
    #[case(" >= ", Operator::Gte)]
    #[case("<", Operator::Lt)]
    fn parses_symbols(#[case] input: &str, #[case] expected: Operator) {
        assert_eq!(input.parse::<Operator>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_symbol() {
        let err = "~=".parse::<Operator>().unwrap_err();
        assert!(err.to_string().contains("unknown operator '~='"));
    }

    #[test]
    fn numeric_comparisons_use_decimal_order() {
        assert!(Operator::Gt.matches(&json!(10), &json!(9.5)));
        assert!(Operator::Eq.matches(&json!(2), &json!(2.0)));
        assert!(Operator::Lte.matches(&json!(2), &json!(2)));
        assert!(!Operator::Lt.matches(&json!(2), &json!(2)));
    }

    #[test]
    fn cross_type_ordering_is_false() {
        assert!(!Operator::Gt.matches(&json!("b"), &json!(1)));
        assert!(!Operator::Lt.matches(&json!("b"), &json!(1)));
        assert!(Operator::Ne.matches(&json!("1"), &json!(1)));
    }
}
