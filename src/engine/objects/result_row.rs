//! Wrapper type for one row of a query result, positionally aligned to its columns
use super::ResultValue;
use std::ops::Deref;

#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow(pub Vec<Option<ResultValue>>);

impl Deref for ResultRow {
    type Target = Vec<Option<ResultValue>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Option<ResultValue>>> for ResultRow {
    fn from(cells: Vec<Option<ResultValue>>) -> Self {
        ResultRow(cells)
    }
}
