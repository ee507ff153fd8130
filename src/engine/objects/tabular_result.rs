//! The raw outcome of running one query: column names in database order and the rows as returned.
use super::{CanonicalResult, CanonicalValue, ResultRow, ResultValue};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct TabularResult {
    columns: Vec<String>,
    rows: Vec<ResultRow>,
}

impl TabularResult {
    pub fn new(columns: Vec<String>, rows: Vec<ResultRow>) -> Result<TabularResult, TabularResultError> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TabularResultError::RowWidthMismatch(i, row.len(), columns.len()));
            }
        }

        Ok(TabularResult { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Views an already canonical result as raw input again, used to feed it back through the normalizer.
impl From<CanonicalResult> for TabularResult {
    fn from(canonical: CanonicalResult) -> Self {
        let rows = canonical
            .rows
            .into_iter()
            .map(|row| {
                ResultRow(
                    row.into_iter()
                        .map(|cell| match cell {
                            CanonicalValue::Null => None,
                            CanonicalValue::Bool(b) => Some(ResultValue::Bool(b)),
                            CanonicalValue::Number(n) => Some(ResultValue::Float(n)),
                            CanonicalValue::Text(t) => Some(ResultValue::Text(t)),
                        })
                        .collect(),
                )
            })
            .collect();

        TabularResult {
            columns: canonical.columns,
            rows,
        }
    }
}

#[derive(Debug, Error)]
pub enum TabularResultError {
    #[error("Row {0} has {1} cells but the result has {2} columns")]
    RowWidthMismatch(usize, usize, usize),
}
