//! Wires configuration, the model client and the comparison engine into a benchmark run.
use crate::config::{Config, ConfigError};
use crate::engine::{Comparator, Normalizer, PostgresExecutor, QueryComparer, QueryExecutor};
use crate::harness::{
    load_questions, write_report_file, CompletionProvider, HttpCompletionClient, PreparedQuestion,
    PromptError, PromptTemplate, QuestionError, ReportError, RunSummary, Runner,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// The result of benchmarking one prompt file.
#[derive(Clone, Debug)]
pub struct PromptReport {
    pub prompt_file: PathBuf,
    pub output_file: PathBuf,
    pub summary: RunSummary,
}

pub struct SqlEval {
    config: Config,
    runner: Runner,
}

impl SqlEval {
    pub fn new(config: Config) -> Result<SqlEval, SqlEvalError> {
        let provider = HttpCompletionClient::new(
            config.api_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
            config.retry_count,
        )
        .with_sampling(config.temperature, config.max_tokens);

        SqlEval::with_parts(config, Arc::new(provider), Arc::new(PostgresExecutor::new()))
    }

    /// Builds a run around any model and database, tests use this with in-memory fakes.
    pub fn with_parts(
        config: Config,
        provider: Arc<dyn CompletionProvider>,
        executor: Arc<dyn QueryExecutor>,
    ) -> Result<SqlEval, SqlEvalError> {
        config.validate()?;

        let comparer = QueryComparer::new(
            executor,
            Normalizer::new(config.decimal_points),
            Comparator::new(config.tolerance, config.loose_tolerance),
        );
        let runner = Runner::new(
            provider,
            comparer,
            config.credentials(),
            config.parallel_threads,
            config.generation_timeout(),
            config.execution_timeout(),
        );

        Ok(SqlEval { config, runner })
    }

    pub async fn run(&self) -> Result<Vec<PromptReport>, SqlEvalError> {
        info!("Preparing questions");
        let questions = load_questions(&self.config.questions_file, self.config.num_questions)?;
        info!(
            "Using {} questions from {}",
            questions.len(),
            self.config.questions_file.display()
        );

        let mut reports = vec![];
        for (prompt_file, output_file) in self
            .config
            .prompt_file
            .iter()
            .zip(self.config.output_file.iter())
        {
            let mut template = PromptTemplate::load(prompt_file, self.config.metadata_dir.clone())?;
            let prepared = questions
                .iter()
                .map(|q| {
                    Ok(PreparedQuestion {
                        question: q.clone(),
                        prompt: template.render(q)?,
                    })
                })
                .collect::<Result<Vec<_>, PromptError>>()?;

            info!("Running {} with prompt {}", prepared.len(), prompt_file.display());
            let mut records = self.runner.run(prepared).await;

            let summary = RunSummary::from_records(&records);
            info!("Results for {}\n{}", prompt_file.display(), summary);

            write_report_file(output_file, &mut records)?;
            info!("Wrote {}", output_file.display());

            reports.push(PromptReport {
                prompt_file: prompt_file.clone(),
                output_file: output_file.clone(),
                summary,
            });
        }

        Ok(reports)
    }
}

#[derive(Debug, Error)]
pub enum SqlEvalError {
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    PromptError(#[from] PromptError),
    #[error(transparent)]
    QuestionError(#[from] QuestionError),
    #[error(transparent)]
    ReportError(#[from] ReportError),
}
