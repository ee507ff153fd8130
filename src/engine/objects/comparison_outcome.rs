//! The verdict for one golden/generated pair.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComparisonOutcome {
    pub exact_match: bool,
    pub correct: bool,
}

impl ComparisonOutcome {
    /// An exact match is always correct, so `correct` is widened when needed.
    pub fn new(exact_match: bool, correct: bool) -> ComparisonOutcome {
        ComparisonOutcome {
            exact_match,
            correct: correct || exact_match,
        }
    }

    pub fn matched() -> ComparisonOutcome {
        ComparisonOutcome::new(true, true)
    }

    pub fn mismatched() -> ComparisonOutcome {
        ComparisonOutcome::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_implies_correct() {
        let outcome = ComparisonOutcome::new(true, false);
        assert!(outcome.correct);
        assert_eq!(outcome, ComparisonOutcome::matched());
    }
}
