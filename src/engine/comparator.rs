//! Decides whether a generated result answers the same question as the golden one.
//!
//! `exact_match` ignores column names and row order but nothing else. `correct` applies
//! the looser rules the question's category allows, see `ComparisonPolicy`.
use super::objects::{CanonicalResult, ComparisonOutcome, ComparisonPolicy, QueryCategory};
use crate::constants::Defaults;

mod column_alignment;
use column_alignment::{find_value_alignment, name_alignment, project};

mod tie_boundary;

mod tolerance;
pub use tolerance::Tolerance;

/// Upper bound on column alignments tried per comparison, many identical columns
/// would otherwise explode factorially.
pub const MAX_COLUMN_ALIGNMENTS: usize = 1024;

/// Upper bound on row pairings (golden rows * generated rows) for tolerant matching.
pub const MAX_ROW_PAIRINGS: usize = 25_000_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Comparator {
    strict: Tolerance,
    loose: Tolerance,
}

impl Comparator {
    pub fn new(tolerance: f64, loose_tolerance: f64) -> Comparator {
        Comparator {
            strict: Tolerance::new(tolerance, 0.0),
            loose: Tolerance::new(tolerance, loose_tolerance),
        }
    }

    pub fn compare(
        &self,
        golden: &CanonicalResult,
        generated: &CanonicalResult,
        category: &QueryCategory,
    ) -> ComparisonOutcome {
        if golden.is_empty() || generated.is_empty() {
            let both = golden.is_empty()
                && generated.is_empty()
                && golden.column_count() == generated.column_count();
            return ComparisonOutcome::new(both, both);
        }

        if self.exact_match(golden, generated) {
            return ComparisonOutcome::matched();
        }

        let correct = self.policy_match(golden, generated, category.policy());
        ComparisonOutcome::new(false, correct)
    }

    pub fn exact_match(&self, golden: &CanonicalResult, generated: &CanonicalResult) -> bool {
        if golden.column_count() != generated.column_count()
            || golden.row_count() != generated.row_count()
        {
            return false;
        }

        //Same names in the same order is the common case, skip the search
        if golden.columns == generated.columns
            && self
                .strict
                .multiset_eq(&golden.rows, &generated.rows, MAX_ROW_PAIRINGS)
        {
            return true;
        }

        find_value_alignment(
            golden,
            generated,
            &self.strict,
            MAX_COLUMN_ALIGNMENTS,
            |alignment| {
                self.strict.multiset_eq(
                    &golden.rows,
                    &project(generated, alignment),
                    MAX_ROW_PAIRINGS,
                )
            },
        )
    }

    pub fn policy_match(
        &self,
        golden: &CanonicalResult,
        generated: &CanonicalResult,
        policy: ComparisonPolicy,
    ) -> bool {
        if policy.is_strict() {
            return self.exact_match(golden, generated);
        }

        if generated.column_count() < golden.column_count() {
            return false;
        }
        if generated.column_count() > golden.column_count()
            && !policy.contains(ComparisonPolicy::EXTRA_COLUMNS)
        {
            return false;
        }

        let tolerance = if policy.contains(ComparisonPolicy::LOOSE_NUMERIC) {
            &self.loose
        } else {
            &self.strict
        };

        let value_aligned = find_value_alignment(
            golden,
            generated,
            tolerance,
            MAX_COLUMN_ALIGNMENTS,
            |alignment| {
                tolerance.multiset_eq(&golden.rows, &project(generated, alignment), MAX_ROW_PAIRINGS)
            },
        );
        if value_aligned {
            return true;
        }

        if policy.tie_tolerant() {
            if let Some(alignment) = name_alignment(golden, generated) {
                let projected = project(generated, &alignment);
                return tie_boundary::tolerates(
                    &golden.rows,
                    &projected,
                    policy,
                    tolerance,
                    MAX_ROW_PAIRINGS,
                );
            }
        }

        false
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Comparator::new(Defaults::TOLERANCE, Defaults::LOOSE_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalizer::Normalizer;
    use crate::engine::objects::{ResultRow, ResultValue, TabularResult};

    fn text(s: &str) -> Option<ResultValue> {
        Some(ResultValue::Text(s.to_string()))
    }

    fn int(i: i64) -> Option<ResultValue> {
        Some(ResultValue::Integer(i))
    }

    fn float(f: f64) -> Option<ResultValue> {
        Some(ResultValue::Float(f))
    }

    fn canon(columns: &[&str], rows: Vec<Vec<Option<ResultValue>>>) -> CanonicalResult {
        let raw = TabularResult::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.into_iter().map(ResultRow).collect(),
        )
        .unwrap();
        Normalizer::default().normalize(&raw)
    }

    fn all_categories() -> Vec<QueryCategory> {
        vec![
            QueryCategory::Exact,
            QueryCategory::Aggregation,
            QueryCategory::DateFunctions,
            QueryCategory::GroupBy,
            QueryCategory::OrderBy,
            QueryCategory::Ratio,
            QueryCategory::TableJoin,
            QueryCategory::Instructions,
            QueryCategory::Ranking,
            QueryCategory::Other("cte".to_string()),
        ]
    }

    #[test]
    fn test_row_order_ignored() {
        let golden = canon(&["id"], vec![vec![int(1)], vec![int(2)]]);
        let generated = canon(&["id"], vec![vec![int(2)], vec![int(1)]]);
        let outcome = Comparator::default().compare(&golden, &generated, &QueryCategory::Exact);
        assert_eq!(outcome, ComparisonOutcome::matched());
    }

    #[test]
    fn test_column_order_ignored() {
        let golden = canon(&["name", "age"], vec![vec![text("Alice"), int(30)]]);
        let generated = canon(&["age", "name"], vec![vec![int(30), text("Alice")]]);
        let outcome = Comparator::default().compare(&golden, &generated, &QueryCategory::Exact);
        assert_eq!(outcome, ComparisonOutcome::matched());
    }

    #[test]
    fn test_renamed_columns_still_exact() {
        let golden = canon(
            &["department", "count"],
            vec![vec![text("eng"), int(4)], vec![text("ops"), int(2)]],
        );
        let generated = canon(
            &["dept", "num_employees"],
            vec![vec![text("ops"), int(2)], vec![text("eng"), int(4)]],
        );
        let outcome = Comparator::default().compare(&golden, &generated, &QueryCategory::GroupBy);
        assert_eq!(outcome, ComparisonOutcome::matched());
    }

    #[test]
    fn test_value_sets_match_but_rows_do_not() {
        let golden = canon(&["a", "b"], vec![vec![int(1), int(2)], vec![int(2), int(1)]]);
        let generated = canon(&["a", "b"], vec![vec![int(1), int(1)], vec![int(2), int(2)]]);
        let outcome = Comparator::default().compare(&golden, &generated, &QueryCategory::GroupBy);
        assert_eq!(outcome, ComparisonOutcome::mismatched());
    }

    #[test]
    fn test_self_comparison() {
        let result = canon(
            &["name", "score", "note"],
            vec![
                vec![text("a"), float(1.5), None],
                vec![text("b"), float(2.5), text("x")],
                vec![text("b"), float(2.5), text("x")],
            ],
        );
        for category in all_categories() {
            assert_eq!(
                Comparator::default().compare(&result, &result, &category),
                ComparisonOutcome::matched(),
                "category {}",
                category
            );
        }
    }

    #[test]
    fn test_empty_results() {
        let empty = canon(&["id"], vec![]);
        let nonempty = canon(&["id"], vec![vec![int(1)]]);
        let comparator = Comparator::default();

        for category in all_categories() {
            assert_eq!(
                comparator.compare(&empty, &empty, &category),
                ComparisonOutcome::matched()
            );
            assert_eq!(
                comparator.compare(&empty, &nonempty, &category),
                ComparisonOutcome::mismatched()
            );
            assert_eq!(
                comparator.compare(&nonempty, &empty, &category),
                ComparisonOutcome::mismatched()
            );
        }
    }

    #[test]
    fn test_extra_columns() {
        let golden = canon(&["name"], vec![vec![text("alice")], vec![text("bob")]]);
        let generated = canon(
            &["id", "name"],
            vec![vec![int(1), text("alice")], vec![int(2), text("bob")]],
        );
        let comparator = Comparator::default();

        let outcome = comparator.compare(&golden, &generated, &QueryCategory::TableJoin);
        assert_eq!(outcome, ComparisonOutcome::new(false, true));

        let outcome = comparator.compare(&golden, &generated, &QueryCategory::Exact);
        assert_eq!(outcome, ComparisonOutcome::mismatched());
    }

    #[test]
    fn test_narrower_projection_never_correct() {
        let golden = canon(
            &["id", "name"],
            vec![vec![int(1), text("alice")], vec![int(2), text("bob")]],
        );
        let generated = canon(&["name"], vec![vec![text("alice")], vec![text("bob")]]);
        for category in all_categories() {
            assert_eq!(
                Comparator::default().compare(&golden, &generated, &category),
                ComparisonOutcome::mismatched()
            );
        }
    }

    #[test]
    fn test_loose_numeric_for_ratios() {
        let golden = canon(&["ratio"], vec![vec![float(0.3333333)]]);
        let generated = canon(&["ratio"], vec![vec![float(0.3334)]]);
        let comparator = Comparator::default();

        assert_eq!(
            comparator.compare(&golden, &generated, &QueryCategory::Ratio),
            ComparisonOutcome::new(false, true)
        );
        assert_eq!(
            comparator.compare(&golden, &generated, &QueryCategory::GroupBy),
            ComparisonOutcome::mismatched()
        );
    }

    #[test]
    fn test_ranking_tie_at_cut_off() {
        let golden = canon(
            &["name", "score"],
            vec![
                vec![text("alice"), int(100)],
                vec![text("bob"), int(90)],
                vec![text("carol"), int(80)],
            ],
        );
        let generated = canon(
            &["name", "score"],
            vec![
                vec![text("alice"), int(100)],
                vec![text("bob"), int(90)],
                vec![text("dave"), int(80)],
            ],
        );
        let comparator = Comparator::default();

        assert_eq!(
            comparator.compare(&golden, &generated, &QueryCategory::Ranking),
            ComparisonOutcome::new(false, true)
        );
        assert_eq!(
            comparator.compare(&golden, &generated, &QueryCategory::Exact),
            ComparisonOutcome::mismatched()
        );
    }

    #[test]
    fn test_ranking_wrong_score_is_mismatched() {
        let golden = canon(
            &["name", "score"],
            vec![
                vec![text("alice"), int(100)],
                vec![text("bob"), int(90)],
                vec![text("carol"), int(80)],
            ],
        );
        let generated = canon(
            &["name", "score"],
            vec![
                vec![text("alice"), int(100)],
                vec![text("bob"), int(90)],
                vec![text("carol"), int(5)],
            ],
        );
        let outcome = Comparator::default().compare(&golden, &generated, &QueryCategory::Ranking);
        assert_eq!(outcome, ComparisonOutcome::mismatched());
    }

    #[test]
    fn test_ranking_with_extra_column() {
        let golden = canon(
            &["name", "score"],
            vec![vec![text("alice"), int(100)], vec![text("carol"), int(80)]],
        );
        let generated = canon(
            &["rank", "name", "score"],
            vec![
                vec![int(1), text("alice"), int(100)],
                vec![int(2), text("dave"), int(80)],
            ],
        );
        let outcome = Comparator::default().compare(&golden, &generated, &QueryCategory::Ranking);
        assert_eq!(outcome, ComparisonOutcome::new(false, true));
    }

    #[test]
    fn test_exact_implies_correct_everywhere() {
        let samples = vec![
            canon(&["a"], vec![vec![int(1)]]),
            canon(&["a"], vec![vec![int(2)]]),
            canon(&["a", "b"], vec![vec![int(1), text("x")]]),
            canon(&["b", "a"], vec![vec![text("x"), int(1)]]),
            canon(&["a", "b"], vec![vec![int(1), text("x")], vec![int(1), text("y")]]),
            canon(&["a"], vec![]),
        ];
        let comparator = Comparator::default();

        for golden in samples.iter() {
            for generated in samples.iter() {
                for category in all_categories() {
                    let outcome = comparator.compare(golden, generated, &category);
                    assert!(!outcome.exact_match || outcome.correct);
                }
            }
        }
    }
}
