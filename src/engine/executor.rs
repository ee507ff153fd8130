//! Runs one query against a reference database and hands back the raw table.
//!
//! The trait is the seam between the comparison engine and a live server, tests swap in
//! an in-memory implementation.
use super::objects::{DatabaseCredentials, TabularResult, TabularResultError};
use super::sql_text::{split_statements, SqlTextError};
use crate::constants::PgErrorCodes;
use futures::future::BoxFuture;
use std::time::Duration;
use thiserror::Error;

mod cell_decoder;

mod pg_numeric;
pub use pg_numeric::PgNumeric;
pub use pg_numeric::PgNumericError;

mod postgres_executor;
pub use postgres_executor::PostgresExecutor;

pub trait QueryExecutor: Send + Sync {
    fn execute<'a>(
        &'a self,
        query: &'a str,
        credentials: &'a DatabaseCredentials,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<TabularResult, ExecutorError>>;
}

/// Rejects empty input and anything holding more than one statement, returns the lone statement.
pub fn single_statement(query: &str) -> Result<&str, ExecutorError> {
    match split_statements(query)?.as_slice() {
        [] => Err(ExecutorError::EmptyQuery()),
        [statement] => Ok(*statement),
        many => Err(ExecutorError::MultipleStatements(many.len())),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionErrorKind {
    Syntax,
    Timeout,
    Other,
}

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("{0}")]
    Syntax(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Other(String),
    #[error("Expected a single statement, found {0}")]
    MultipleStatements(usize),
    #[error("Empty query")]
    EmptyQuery(),
    #[error(transparent)]
    SqlTextError(#[from] SqlTextError),
    #[error(transparent)]
    TabularResultError(#[from] TabularResultError),
}

impl ExecutorError {
    pub fn kind(&self) -> ExecutionErrorKind {
        match self {
            ExecutorError::Syntax(_)
            | ExecutorError::MultipleStatements(_)
            | ExecutorError::EmptyQuery()
            | ExecutorError::SqlTextError(_) => ExecutionErrorKind::Syntax,
            ExecutorError::Timeout(_) => ExecutionErrorKind::Timeout,
            ExecutorError::Other(_) | ExecutorError::TabularResultError(_) => {
                ExecutionErrorKind::Other
            }
        }
    }
}

impl From<tokio_postgres::Error> for ExecutorError {
    fn from(e: tokio_postgres::Error) -> Self {
        let code = e.code().map(|c| c.code());
        let message = match e.as_db_error() {
            Some(db) => db.message().to_string(),
            None => e.to_string(),
        };

        if code == Some(PgErrorCodes::SyntaxError.value()) {
            ExecutorError::Syntax(message)
        } else if code == Some(PgErrorCodes::QueryCanceled.value()) {
            ExecutorError::Timeout(message)
        } else {
            ExecutorError::Other(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_statement() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(single_statement("select 1;")?, "select 1");
        assert_eq!(single_statement("  select ';'  ")?, "select ';'");
        Ok(())
    }

    #[test]
    fn test_statement_count_errors_are_syntax() {
        let err = single_statement("select 1; drop table t");
        assert!(matches!(err, Err(ExecutorError::MultipleStatements(2))));

        let err = single_statement(" ; ");
        assert!(matches!(err, Err(ExecutorError::EmptyQuery())));

        for e in [
            ExecutorError::MultipleStatements(2),
            ExecutorError::EmptyQuery(),
            ExecutorError::SqlTextError(SqlTextError::Unterminated(0)),
        ] {
            assert_eq!(e.kind(), ExecutionErrorKind::Syntax);
        }
    }

    #[test]
    fn test_messages_are_verbatim() {
        let e = ExecutorError::Syntax("syntax error at or near \"FORM\"".to_string());
        assert_eq!(e.to_string(), "syntax error at or near \"FORM\"");
        assert_eq!(
            ExecutorError::Timeout("canceling statement due to statement timeout".to_string())
                .kind(),
            ExecutionErrorKind::Timeout
        );
    }
}
