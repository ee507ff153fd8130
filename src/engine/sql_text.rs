//! Small parsers over raw SQL text: statement splitting, golden alternative expansion
//! and pulling a query out of a model completion.
//!
//! None of these understand SQL grammar. They only know enough about quoting and
//! comments to find statement boundaries safely.

mod alternatives;
pub use alternatives::expand_alternatives;
pub use alternatives::MAX_GOLDEN_ALTERNATIVES;

mod common;

mod extraction;
pub use extraction::extract_sql;

mod statements;
pub use statements::split_statements;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SqlTextError {
    #[error("Unterminated quoted section starting near byte {0}")]
    Unterminated(usize),
    #[error("Unbalanced column group near byte {0}")]
    UnbalancedGroup(usize),
    #[error("Empty column group near byte {0}")]
    EmptyGroup(usize),
    #[error("Golden query expands to more than {0} alternatives")]
    TooManyAlternatives(usize),
    #[error("No SQL statement found")]
    NoStatement(),
}
