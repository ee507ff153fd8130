//! Works out which generated column answers which golden column.
//!
//! An alignment is a list with one generated column index per golden column. Columns are
//! matched on their contents rather than their names, since a model is free to alias
//! `count(*)` however it likes.
use super::Tolerance;
use crate::engine::objects::{CanonicalResult, CanonicalRow, CanonicalValue};

fn sorted_column(result: &CanonicalResult, column: usize) -> Vec<&CanonicalValue> {
    let mut values = result.column_values(column);
    values.sort();
    values
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// For each golden column, the generated columns holding the same multiset of values.
/// Same-named columns come first so the most natural alignment is tried first.
fn candidates(
    golden: &CanonicalResult,
    generated: &CanonicalResult,
    tolerance: &Tolerance,
) -> Vec<Vec<usize>> {
    let generated_columns: Vec<Vec<&CanonicalValue>> = (0..generated.column_count())
        .map(|c| sorted_column(generated, c))
        .collect();

    (0..golden.column_count())
        .map(|g| {
            let golden_column = sorted_column(golden, g);
            let golden_name = name_key(&golden.columns[g]);

            let mut matches: Vec<usize> = generated_columns
                .iter()
                .enumerate()
                .filter(|(_, values)| {
                    values.len() == golden_column.len()
                        && values
                            .iter()
                            .zip(golden_column.iter())
                            .all(|(a, b)| tolerance.values_eq(a, b))
                })
                .map(|(c, _)| c)
                .collect();
            matches.sort_by_key(|c| (name_key(&generated.columns[*c]) != golden_name, *c));
            matches
        })
        .collect()
}

fn search<F: FnMut(&[usize]) -> bool>(
    options: &[Vec<usize>],
    used: &mut Vec<bool>,
    current: &mut Vec<usize>,
    budget: &mut usize,
    accept: &mut F,
) -> bool {
    if current.len() == options.len() {
        if *budget == 0 {
            return false;
        }
        *budget -= 1;
        return accept(current);
    }

    for &c in options[current.len()].iter() {
        if used[c] {
            continue;
        }
        used[c] = true;
        current.push(c);
        if search(options, used, current, budget, accept) {
            return true;
        }
        current.pop();
        used[c] = false;
        if *budget == 0 {
            return false;
        }
    }
    false
}

/// Tries value-matched alignments until `accept` approves one or `max_alignments` have
/// been tried. Generated must have at least as many columns as golden.
pub fn find_value_alignment<F: FnMut(&[usize]) -> bool>(
    golden: &CanonicalResult,
    generated: &CanonicalResult,
    tolerance: &Tolerance,
    max_alignments: usize,
    mut accept: F,
) -> bool {
    if generated.column_count() < golden.column_count()
        || generated.row_count() != golden.row_count()
    {
        return false;
    }

    let options = candidates(golden, generated, tolerance);
    if options.iter().any(|o| o.is_empty()) {
        return false;
    }

    let mut used = vec![false; generated.column_count()];
    let mut current = Vec::with_capacity(options.len());
    let mut budget = max_alignments;
    search(&options, &mut used, &mut current, &mut budget, &mut accept)
}

/// Aligns golden columns to distinct generated columns of the same (case-insensitive)
/// name. Falls back to position when the column counts agree but names do not line up.
pub fn name_alignment(golden: &CanonicalResult, generated: &CanonicalResult) -> Option<Vec<usize>> {
    let mut used = vec![false; generated.column_count()];
    let mut alignment = Vec::with_capacity(golden.column_count());

    for name in golden.columns.iter() {
        let key = name_key(name);
        let found = generated
            .columns
            .iter()
            .enumerate()
            .position(|(c, n)| !used[c] && name_key(n) == key);
        match found {
            Some(c) => {
                used[c] = true;
                alignment.push(c);
            }
            None if golden.column_count() == generated.column_count() => {
                return Some((0..golden.column_count()).collect());
            }
            None => return None,
        }
    }

    Some(alignment)
}

/// Generated rows rewritten into golden column order, sorted.
pub fn project(generated: &CanonicalResult, alignment: &[usize]) -> Vec<CanonicalRow> {
    let mut rows: Vec<CanonicalRow> = generated
        .rows
        .iter()
        .map(|row| alignment.iter().map(|c| row[*c].clone()).collect())
        .collect();
    rows.sort();
    rows
}
