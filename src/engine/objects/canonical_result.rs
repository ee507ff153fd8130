use super::CanonicalValue;

pub type CanonicalRow = Vec<CanonicalValue>;

/// Output of the normalizer: columns sorted by name, rows sorted by their full tuple.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanonicalResult {
    pub columns: Vec<String>,
    pub rows: Vec<CanonicalRow>,
}

impl CanonicalResult {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_values(&self, column: usize) -> Vec<&CanonicalValue> {
        self.rows.iter().map(|r| &r[column]).collect()
    }
}
