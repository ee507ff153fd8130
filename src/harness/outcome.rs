//! What the harness records for each question.
use super::{GenerationError, Question};
use crate::engine::objects::ComparisonOutcome;
use crate::engine::{ComparisonError, ExecutionErrorKind};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// A failure confined to one question. The message prefixes are what downstream
/// analysis greps for, keep them stable.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RowError {
    #[error("QUERY GENERATION TIMEOUT: {0}")]
    GenerationTimeout(String),
    #[error("QUERY GENERATION ERROR: {0}")]
    GenerationProvider(String),
    #[error("QUERY GENERATION ERROR: {0}")]
    GenerationEmptyResult(String),
    #[error("QUERY EXECUTION ERROR: {0}")]
    ExecutionSyntax(String),
    #[error("QUERY EXECUTION ERROR: {0}")]
    ExecutionTimeout(String),
    #[error("QUERY EXECUTION ERROR: {0}")]
    ExecutionOther(String),
    #[error("WORKER ABORTED: {0}")]
    WorkerAborted(String),
}

impl RowError {
    pub fn is_execution(&self) -> bool {
        matches!(
            self,
            RowError::ExecutionSyntax(_) | RowError::ExecutionTimeout(_) | RowError::ExecutionOther(_)
        )
    }
}

impl From<GenerationError> for RowError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::Timeout(_) => RowError::GenerationTimeout(e.to_string()),
            GenerationError::EmptyResult() => RowError::GenerationEmptyResult(e.to_string()),
            GenerationError::ReqwestError(ref r) if r.is_timeout() => {
                RowError::GenerationTimeout(e.to_string())
            }
            _ => RowError::GenerationProvider(e.to_string()),
        }
    }
}

impl From<ComparisonError> for RowError {
    fn from(e: ComparisonError) -> Self {
        match e.kind() {
            ExecutionErrorKind::Syntax => RowError::ExecutionSyntax(e.to_string()),
            ExecutionErrorKind::Timeout => RowError::ExecutionTimeout(e.to_string()),
            ExecutionErrorKind::Other => RowError::ExecutionOther(e.to_string()),
        }
    }
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}

/// One row of the output report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutcomeRecord {
    pub question: String,
    pub db_name: String,
    pub query_category: String,
    pub query: String,
    pub instructions: String,
    pub generated_query: String,
    #[serde(serialize_with = "two_decimals")]
    pub latency_seconds: f64,
    pub exact_match: u8,
    pub correct: u8,
    pub error_db_exec: u8,
    pub error_msg: String,
}

impl OutcomeRecord {
    pub fn new(question: &Question) -> OutcomeRecord {
        OutcomeRecord {
            question: question.question.clone(),
            db_name: question.db_name.clone(),
            query_category: question.query_category.clone(),
            query: question.query.clone(),
            instructions: question.instructions.clone(),
            generated_query: String::new(),
            latency_seconds: 0.0,
            exact_match: 0,
            correct: 0,
            error_db_exec: 0,
            error_msg: String::new(),
        }
    }

    pub fn record_outcome(&mut self, outcome: ComparisonOutcome) {
        self.exact_match = outcome.exact_match as u8;
        self.correct = outcome.correct as u8;
        self.error_db_exec = 0;
        self.error_msg.clear();
    }

    /// Any error scores the row as wrong.
    pub fn record_error(&mut self, error: &RowError) {
        self.exact_match = 0;
        self.correct = 0;
        self.error_db_exec = error.is_execution() as u8;
        self.error_msg = error.to_string();
    }

    pub fn is_correct(&self) -> bool {
        self.correct == 1
    }

    /// Report order
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.db_name, &self.query_category, &self.question)
    }
}
