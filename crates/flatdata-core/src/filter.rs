//! Filter operators for record queries

use crate::error::CoreError;
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operators accepted by `filter`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Loose equality (==)
    Equal,
    /// Strict identity (===)
    Identical,
    /// Loose inequality (!=)
    NotEqual,
    /// Strict non-identity (!==)
    NotIdentical,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 8] = [
        FilterOperator::Equal,
        FilterOperator::Identical,
        FilterOperator::NotEqual,
        FilterOperator::NotIdentical,
        FilterOperator::LessThan,
        FilterOperator::LessThanOrEqual,
        FilterOperator::GreaterThan,
        FilterOperator::GreaterThanOrEqual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "==",
            FilterOperator::Identical => "===",
            FilterOperator::NotEqual => "!=",
            FilterOperator::NotIdentical => "!==",
            FilterOperator::LessThan => "<",
            FilterOperator::LessThanOrEqual => "<=",
            FilterOperator::GreaterThan => ">",
            FilterOperator::GreaterThanOrEqual => ">=",
        }
    }

    /// Returns true for the operators that never coerce types
    pub fn is_strict(&self) -> bool {
        matches!(self, FilterOperator::Identical | FilterOperator::NotIdentical)
    }

    /// Apply the operator to `left <op> right`
    ///
    /// Ordering operators are false for incomparable pairs.
    pub fn evaluate(&self, left: &Value, right: &Value) -> bool {
        match self {
            FilterOperator::Equal => left.loose_eq(right),
            FilterOperator::NotEqual => !left.loose_eq(right),
            FilterOperator::Identical => left.strict_eq(right),
            FilterOperator::NotIdentical => !left.strict_eq(right),
            FilterOperator::LessThan => left.loose_cmp(right) == Some(Ordering::Less),
            FilterOperator::LessThanOrEqual => matches!(
                left.loose_cmp(right),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOperator::GreaterThan => left.loose_cmp(right) == Some(Ordering::Greater),
            FilterOperator::GreaterThanOrEqual => matches!(
                left.loose_cmp(right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

impl FromStr for FilterOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnsupportedOperator(s.to_string()))
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
