//! A cell after coercion. Carries a total order so whole rows can be sorted.
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug)]
pub enum CanonicalValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CanonicalValue {
    fn rank(&self) -> u8 {
        match self {
            CanonicalValue::Null => 0,
            CanonicalValue::Bool(_) => 1,
            CanonicalValue::Number(_) => 2,
            CanonicalValue::Text(_) => 3,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CanonicalValue::Null)
    }
}

impl Ord for CanonicalValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CanonicalValue::Null, CanonicalValue::Null) => Ordering::Equal,
            (CanonicalValue::Bool(a), CanonicalValue::Bool(b)) => a.cmp(b),
            (CanonicalValue::Number(a), CanonicalValue::Number(b)) => a.total_cmp(b),
            (CanonicalValue::Text(a), CanonicalValue::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for CanonicalValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CanonicalValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CanonicalValue {}

impl Display for CanonicalValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalValue::Null => write!(f, "NULL"),
            CanonicalValue::Bool(ref value) => write!(f, "{}", value),
            CanonicalValue::Number(ref value) => write!(f, "{}", value),
            CanonicalValue::Text(ref value) => write!(f, "'{}'", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_type_order() {
        let mut values = vec![
            CanonicalValue::Text("".to_string()),
            CanonicalValue::Number(0.0),
            CanonicalValue::Null,
            CanonicalValue::Bool(false),
        ];
        values.sort();

        assert_eq!(
            values,
            vec![
                CanonicalValue::Null,
                CanonicalValue::Bool(false),
                CanonicalValue::Number(0.0),
                CanonicalValue::Text("".to_string()),
            ]
        );
    }

    #[test]
    fn test_null_is_not_empty_or_zero() {
        assert_ne!(CanonicalValue::Null, CanonicalValue::Text(String::new()));
        assert_ne!(CanonicalValue::Null, CanonicalValue::Number(0.0));
    }

    #[test]
    fn test_nan_is_orderable() {
        let mut values = vec![
            CanonicalValue::Number(f64::NAN),
            CanonicalValue::Number(1.0),
            CanonicalValue::Number(f64::NEG_INFINITY),
        ];
        values.sort();
        assert_eq!(values[0], CanonicalValue::Number(f64::NEG_INFINITY));
        assert_eq!(values[1], CanonicalValue::Number(1.0));
        assert_eq!(values[2], CanonicalValue::Number(f64::NAN));
    }
}
