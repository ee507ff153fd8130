//! Ranking questions ("top 3 by score") are ambiguous when rows tie at the cut-off. Any
//! of the tied rows is a fair answer, so the rows that differ between golden and generated
//! are forgiven as long as they all sit on the boundary value of some numeric column and
//! no swapped-in row is a swapped-out row with a different measure.
use super::Tolerance;
use crate::engine::objects::{CanonicalRow, CanonicalValue, ComparisonPolicy};

/// Smallest and largest non-null value of a golden column, the two places a cut-off can fall.
fn boundaries(golden: &[CanonicalRow], column: usize) -> Vec<&CanonicalValue> {
    let values = golden.iter().map(|r| &r[column]).filter(|v| !v.is_null());
    match (values.clone().min(), values.max()) {
        (Some(low), Some(high)) if low == high => vec![low],
        (Some(low), Some(high)) => vec![low, high],
        _ => vec![],
    }
}

/// Rows that agree on every non-numeric column describe the same entity. Swapping one for
/// the other changes a measure, it does not pick a different member of a tie group.
fn same_entity(a: &CanonicalRow, b: &CanonicalRow, tolerance: &Tolerance) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| {
        (matches!(x, CanonicalValue::Number(_)) && matches!(y, CanonicalValue::Number(_)))
            || tolerance.values_eq(x, y)
    })
}

/// Both row lists must already be in golden column order.
pub fn tolerates(
    golden: &[CanonicalRow],
    generated: &[CanonicalRow],
    policy: ComparisonPolicy,
    tolerance: &Tolerance,
    limit: usize,
) -> bool {
    if generated.is_empty() {
        return false;
    }

    let (missing, extra) = match tolerance.residuals(golden, generated, limit) {
        Some(r) => r,
        None => return false,
    };

    if missing.is_empty() && extra.is_empty() {
        return true;
    }
    if !extra.is_empty() && !policy.contains(ComparisonPolicy::TIE_SWAP) {
        return false;
    }
    if extra.len() > missing.len() {
        return false;
    }
    if extra.len() < missing.len() && !policy.contains(ComparisonPolicy::TIE_SUBSET) {
        return false;
    }

    if extra
        .iter()
        .any(|e| missing.iter().any(|m| same_entity(e, m, tolerance)))
    {
        return false;
    }

    let width = match golden.first() {
        Some(row) => row.len(),
        None => return false,
    };

    (0..width).any(|column| {
        boundaries(golden, column).into_iter().any(|boundary| {
            matches!(boundary, CanonicalValue::Number(_))
                && missing
                    .iter()
                    .chain(extra.iter())
                    .all(|row| tolerance.values_eq(&row[column], boundary))
                && generated
                    .iter()
                    .any(|row| tolerance.values_eq(&row[column], boundary))
        })
    })
}
