//! Loose and strict comparison of values
//!
//! Repository files are hand-authored and mix `"10"` with `10` freely, so
//! filters default to loose comparison: numeric strings compare as numbers,
//! booleans and null compare by truthiness, containers order after scalars.
//! Strict identity requires the same variant and the same content.

use crate::types::value::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn cmp(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(l), Number::Int(r)) => Some(l.cmp(&r)),
            (l, r) => l.as_f64().partial_cmp(&r.as_f64()),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn to_display(self) -> String {
        match self {
            Number::Int(i) => i.to_string(),
            Number::Float(f) => f.to_string(),
        }
    }
}

fn number_of(value: &Value) -> Option<Number> {
    match value {
        Value::Integer(i) => Some(Number::Int(*i)),
        Value::Float(f) => Some(Number::Float(*f)),
        _ => None,
    }
}

/// Parse a numeric string such as `" 12"`, `"-3.5"` or `"1e3"`
fn numeric_string(s: &str) -> Option<Number> {
    let trimmed = s.trim();
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::Int(i));
    }
    trimmed.parse::<f64>().ok().map(Number::Float)
}

impl Value {
    /// Truthiness used when comparing against booleans and null
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }

    /// Loose ordering; `None` when the pair is incomparable
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Bool(_), _) | (_, Value::Bool(_)) => {
                Some(self.is_truthy().cmp(&other.is_truthy()))
            }
            (Value::Null, Value::String(s)) => Some("".cmp(s.as_str())),
            (Value::String(s), Value::Null) => Some(s.as_str().cmp("")),
            (Value::Null, _) | (_, Value::Null) => {
                Some(self.is_truthy().cmp(&other.is_truthy()))
            }
            (Value::String(l), Value::String(r)) => {
                match (numeric_string(l), numeric_string(r)) {
                    (Some(ln), Some(rn)) => ln.cmp(rn),
                    _ => Some(l.cmp(r)),
                }
            }
            (Value::String(s), _) if !other.is_container() => {
                let n = number_of(other)?;
                match numeric_string(s) {
                    Some(sn) => sn.cmp(n),
                    None => Some(s.as_str().cmp(n.to_display().as_str())),
                }
            }
            (_, Value::String(_)) if !self.is_container() => {
                other.loose_cmp(self).map(Ordering::reverse)
            }
            (Value::Array(l), Value::Array(r)) => {
                if l.len() != r.len() {
                    return Some(l.len().cmp(&r.len()));
                }
                for (lv, rv) in l.iter().zip(r) {
                    match lv.loose_cmp(rv)? {
                        Ordering::Equal => continue,
                        unequal => return Some(unequal),
                    }
                }
                Some(Ordering::Equal)
            }
            (Value::Object(l), Value::Object(r)) => {
                if l.len() != r.len() {
                    return Some(l.len().cmp(&r.len()));
                }
                for (key, lv) in l {
                    match lv.loose_cmp(r.get(key)?)? {
                        Ordering::Equal => continue,
                        unequal => return Some(unequal),
                    }
                }
                Some(Ordering::Equal)
            }
            (Value::Array(_), Value::Object(_)) | (Value::Object(_), Value::Array(_)) => None,
            (l, r) if l.is_container() => {
                debug_assert!(!r.is_container());
                Some(Ordering::Greater)
            }
            (_, r) if r.is_container() => Some(Ordering::Less),
            (l, r) => number_of(l)?.cmp(number_of(r)?),
        }
    }

    /// Loose equality (`==`)
    pub fn loose_eq(&self, other: &Value) -> bool {
        self.loose_cmp(other) == Some(Ordering::Equal)
    }

    /// Strict identity (`===`): same variant, same content, same key order
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Integer(l), Value::Integer(r)) => l == r,
            (Value::Float(l), Value::Float(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Array(l), Value::Array(r)) => {
                l.len() == r.len() && l.iter().zip(r).all(|(lv, rv)| lv.strict_eq(rv))
            }
            (Value::Object(l), Value::Object(r)) => {
                l.len() == r.len()
                    && l
                        .iter()
                        .zip(r)
                        .all(|((lk, lv), (rk, rv))| lk == rk && lv.strict_eq(rv))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_numeric_string_equals_integer() {
        assert!(Value::from("10").loose_eq(&Value::Integer(10)));
        assert!(Value::Integer(10).loose_eq(&Value::from("10")));
        assert!(Value::from(" 10").loose_eq(&Value::Float(10.0)));
        assert!(!Value::from("10").strict_eq(&Value::Integer(10)));
    }

    #[test]
    fn test_integer_and_float_are_loose_equal_not_identical() {
        assert!(Value::Integer(3).loose_eq(&Value::Float(3.0)));
        assert!(!Value::Integer(3).strict_eq(&Value::Float(3.0)));
    }

    #[test]
    fn test_ordering_numbers() {
        assert_eq!(
            Value::Integer(27).loose_cmp(&Value::Integer(30)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("90").loose_cmp(&Value::Integer(30)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::from("9").loose_cmp(&Value::from("10")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_non_numeric_strings_compare_bytewise() {
        assert_eq!(
            Value::from("apple").loose_cmp(&Value::from("banana")),
            Some(Ordering::Less)
        );
        assert!(!Value::from("abc").loose_eq(&Value::Integer(0)));
    }

    #[test]
    fn test_bool_and_null_truthiness() {
        assert!(Value::Bool(true).loose_eq(&Value::from("yes")));
        assert!(Value::Bool(false).loose_eq(&Value::from("0")));
        assert!(Value::Null.loose_eq(&Value::from("")));
        assert!(Value::Null.loose_eq(&Value::Integer(0)));
        assert_eq!(
            Value::Null.loose_cmp(&Value::Integer(30)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_containers() {
        let a = Value::Array(vec![Value::Integer(1), Value::from("2")]);
        let b = Value::Array(vec![Value::from("1"), Value::Integer(2)]);
        assert!(a.loose_eq(&b));
        assert!(!a.strict_eq(&b));
        assert_eq!(a.loose_cmp(&Value::Integer(100)), Some(Ordering::Greater));
        assert_eq!(a.loose_cmp(&Value::empty_object()), None);
    }

    #[test]
    fn test_strict_object_key_order() {
        let mut first = IndexMap::new();
        first.insert("a".to_string(), Value::Integer(1));
        first.insert("b".to_string(), Value::Integer(2));
        let mut second = IndexMap::new();
        second.insert("b".to_string(), Value::Integer(2));
        second.insert("a".to_string(), Value::Integer(1));

        let first = Value::Object(first);
        let second = Value::Object(second);
        assert!(first.loose_eq(&second));
        assert!(!first.strict_eq(&second));
        assert!(first.strict_eq(&first.clone()));
    }
}
