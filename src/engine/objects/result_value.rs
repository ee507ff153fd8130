//! A single non-null cell as reported by the database, before any coercion.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub enum ResultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Exact decimal text of a NUMERIC column, e.g. "12.500", "NaN", "-Infinity"
    Numeric(String),
    Text(String),
    Uuid(Uuid),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
}

impl Display for ResultValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Bool(ref value) => write!(f, "{}", value),
            ResultValue::Integer(ref value) => write!(f, "{}", value),
            ResultValue::Float(ref value) => write!(f, "{}", value),
            ResultValue::Numeric(ref value) => write!(f, "{}", value),
            ResultValue::Text(ref value) => write!(f, "{}", value),
            ResultValue::Uuid(ref value) => write!(f, "{}", value.hyphenated()),
            ResultValue::Date(ref value) => write!(f, "{}", value.format("%Y-%m-%d")),
            ResultValue::Timestamp(ref value) => {
                write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S%.f"))
            }
            ResultValue::TimestampTz(ref value) => {
                write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S%.f+00"))
            }
        }
    }
}
