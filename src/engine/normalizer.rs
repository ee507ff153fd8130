//! Turns a raw query result into a canonical form where column order, row order and
//! cosmetic cell differences no longer matter.
//!
//! * numbers of every flavour become one rounded `Number`
//! * text is trimmed and lower-cased, temporal and uuid values are compared as text
//! * NULL stays a sentinel of its own
//! * columns sort by name, rows sort by their full tuple
//!
//! Normalizing an already canonical result (viewed back as a `TabularResult`) changes nothing.
use super::objects::{CanonicalResult, CanonicalRow, CanonicalValue, ResultValue, TabularResult};
use crate::constants::Defaults;
use std::cmp::Ordering;
use std::collections::HashMap;

//Beyond this a scaled f64 has no fractional part left to round
const MAX_EXACT_SCALED: f64 = 4_503_599_627_370_496.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalizer {
    decimal_points: u32,
    scale: f64,
}

impl Normalizer {
    pub fn new(decimal_points: u32) -> Normalizer {
        let decimal_points = decimal_points.min(Defaults::MAX_DECIMAL_POINTS);
        let exponent = i32::try_from(decimal_points).unwrap_or(0);
        Normalizer {
            decimal_points,
            scale: 10f64.powi(exponent),
        }
    }

    pub fn decimal_points(&self) -> u32 {
        self.decimal_points
    }

    fn round(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        if value.is_infinite() {
            return value;
        }

        let scaled = value * self.scale;
        let rounded = if scaled.abs() >= MAX_EXACT_SCALED {
            value
        } else {
            scaled.round() / self.scale
        };

        //Folds -0.0 into 0.0
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    pub fn coerce(&self, cell: &Option<ResultValue>) -> CanonicalValue {
        let value = match cell {
            Some(v) => v,
            None => return CanonicalValue::Null,
        };

        match value {
            ResultValue::Bool(b) => CanonicalValue::Bool(*b),
            //i64 beyond 2^53 loses precision here, acceptable for benchmark data
            ResultValue::Integer(i) => CanonicalValue::Number(self.round(*i as f64)),
            ResultValue::Float(f) => CanonicalValue::Number(self.round(*f)),
            ResultValue::Numeric(n) => match n.trim().parse::<f64>() {
                Ok(f) => CanonicalValue::Number(self.round(f)),
                Err(_) => CanonicalValue::Text(n.trim().to_lowercase()),
            },
            ResultValue::Text(t) => CanonicalValue::Text(t.trim().to_lowercase()),
            other => CanonicalValue::Text(other.to_string().trim().to_lowercase()),
        }
    }

    /// Column order: lower-cased name, then (for colliding names only) the sorted values
    /// of the column, then original position.
    fn column_order(&self, names: &[String], rows: &[CanonicalRow]) -> Vec<usize> {
        let keys: Vec<String> = names.iter().map(|n| n.trim().to_lowercase()).collect();

        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for k in keys.iter() {
            *name_counts.entry(k.as_str()).or_insert(0) += 1;
        }

        let signatures: Vec<Option<Vec<&CanonicalValue>>> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| {
                if name_counts.get(k.as_str()).copied().unwrap_or(0) > 1 {
                    let mut values: Vec<&CanonicalValue> = rows.iter().map(|r| &r[i]).collect();
                    values.sort();
                    Some(values)
                } else {
                    None
                }
            })
            .collect();

        let mut order: Vec<usize> = (0..names.len()).collect();
        order.sort_by(|a, b| {
            keys[*a]
                .cmp(&keys[*b])
                .then_with(|| match (&signatures[*a], &signatures[*b]) {
                    (Some(sa), Some(sb)) => sa.cmp(sb),
                    _ => Ordering::Equal,
                })
                .then_with(|| names[*a].cmp(&names[*b]))
                .then_with(|| a.cmp(b))
        });
        order
    }

    pub fn normalize(&self, result: &TabularResult) -> CanonicalResult {
        let coerced: Vec<CanonicalRow> = result
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| self.coerce(cell)).collect())
            .collect();

        let order = self.column_order(result.columns(), &coerced);

        let columns = order.iter().map(|i| result.columns()[*i].clone()).collect();
        let mut rows: Vec<CanonicalRow> = coerced
            .into_iter()
            .map(|row| order.iter().map(|i| row[*i].clone()).collect())
            .collect();
        rows.sort();

        CanonicalResult { columns, rows }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(Defaults::DECIMAL_POINTS)
    }
}
