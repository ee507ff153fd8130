//! Flags selecting which looser equivalence rules a category may use for `correct`.
//! An empty set means `correct` is exactly `exact_match`.

bitflags! {
    pub struct ComparisonPolicy: u8 {
        /// Generated may project columns the golden query did not ask for
        const EXTRA_COLUMNS = 0b0000_0001;
        /// Numbers may differ by the loose relative tolerance
        const LOOSE_NUMERIC = 0b0000_0010;
        /// Rows tied at the ranking cut-off may be swapped for other tied rows
        const TIE_SWAP      = 0b0000_0100;
        /// Rows tied at the ranking cut-off may be omitted
        const TIE_SUBSET    = 0b0000_1000;
    }
}

impl ComparisonPolicy {
    pub fn is_strict(&self) -> bool {
        self.is_empty()
    }

    pub fn tie_tolerant(&self) -> bool {
        self.intersects(ComparisonPolicy::TIE_SWAP | ComparisonPolicy::TIE_SUBSET)
    }
}
