use crate::engine::objects::{CanonicalRow, CanonicalValue};

/// Numeric closeness. Two numbers match when they are within `absolute` of each other
/// or within `relative` of the larger magnitude. Everything else compares exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    absolute: f64,
    relative: f64,
}

impl Tolerance {
    pub fn new(absolute: f64, relative: f64) -> Tolerance {
        Tolerance {
            absolute: absolute.max(0.0),
            relative: relative.max(0.0),
        }
    }

    pub fn values_eq(&self, left: &CanonicalValue, right: &CanonicalValue) -> bool {
        match (left, right) {
            (CanonicalValue::Number(a), CanonicalValue::Number(b)) => {
                if a.is_nan() || b.is_nan() {
                    return a.is_nan() && b.is_nan();
                }
                if a == b {
                    return true;
                }
                let diff = (a - b).abs();
                diff <= self.absolute || diff <= self.relative * a.abs().max(b.abs())
            }
            (a, b) => a == b,
        }
    }

    pub fn rows_eq(&self, left: &[CanonicalValue], right: &[CanonicalValue]) -> bool {
        left.len() == right.len() && left.iter().zip(right).all(|(a, b)| self.values_eq(a, b))
    }

    /// Pairs each `right` row with the first unused matching `left` row. Returns the
    /// unmatched rows of each side, or None when the inputs are too large to pair up.
    pub fn residuals<'a>(
        &self,
        left: &'a [CanonicalRow],
        right: &'a [CanonicalRow],
        limit: usize,
    ) -> Option<(Vec<&'a CanonicalRow>, Vec<&'a CanonicalRow>)> {
        if left.len().saturating_mul(right.len()) > limit {
            return None;
        }

        let mut used = vec![false; left.len()];
        let mut right_only = vec![];
        for row in right {
            let found = left
                .iter()
                .enumerate()
                .position(|(i, l)| !used[i] && self.rows_eq(l, row));
            match found {
                Some(i) => used[i] = true,
                None => right_only.push(row),
            }
        }

        let left_only = left
            .iter()
            .zip(used)
            .filter(|(_, u)| !u)
            .map(|(l, _)| l)
            .collect();

        Some((left_only, right_only))
    }

    /// Multiset equality of two row lists that are each sorted.
    pub fn multiset_eq(&self, left: &[CanonicalRow], right: &[CanonicalRow], limit: usize) -> bool {
        if left.len() != right.len() {
            return false;
        }
        if left.iter().zip(right).all(|(l, r)| self.rows_eq(l, r)) {
            return true;
        }

        //Tolerance can reorder near-equal rows, pair them up the slow way
        match self.residuals(left, right, limit) {
            Some((left_only, right_only)) => left_only.is_empty() && right_only.is_empty(),
            None => false,
        }
    }
}
