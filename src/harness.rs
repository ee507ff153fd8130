//! The benchmark loop: questions in, prompts out to the model, generated SQL scored
//! against the golden query, a report at the end.
mod completion;
pub use completion::completion_text;
pub use completion::CompletionProvider;
pub use completion::GenerationError;
pub use completion::HttpCompletionClient;

mod outcome;
pub use outcome::OutcomeRecord;
pub use outcome::RowError;

mod prompt;
pub use prompt::PromptError;
pub use prompt::PromptTemplate;

mod questions;
pub use questions::load_questions;
pub use questions::read_questions;
pub use questions::Question;
pub use questions::QuestionError;

mod report;
pub use report::write_report;
pub use report::write_report_file;
pub use report::ReportError;

mod runner;
pub use runner::PreparedQuestion;
pub use runner::Runner;

mod summary;
pub use summary::CategoryStats;
pub use summary::RunSummary;
