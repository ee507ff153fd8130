//! Drives questions through generation and comparison with bounded concurrency.
use super::{CompletionProvider, OutcomeRecord, Question, RowError};
use crate::engine::objects::DatabaseCredentials;
use crate::engine::sql_text::extract_sql;
use crate::engine::QueryComparer;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A question with its rendered prompt, ready to send.
#[derive(Clone, Debug)]
pub struct PreparedQuestion {
    pub question: Question,
    pub prompt: String,
}

#[derive(Clone)]
pub struct Runner {
    provider: Arc<dyn CompletionProvider>,
    comparer: QueryComparer,
    credentials: DatabaseCredentials,
    parallel_threads: usize,
    generation_timeout: Duration,
    execution_timeout: Duration,
}

impl Runner {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        comparer: QueryComparer,
        credentials: DatabaseCredentials,
        parallel_threads: usize,
        generation_timeout: Duration,
        execution_timeout: Duration,
    ) -> Runner {
        Runner {
            provider,
            comparer,
            credentials,
            parallel_threads: parallel_threads.max(1),
            generation_timeout,
            execution_timeout,
        }
    }

    /// Runs every question, at most `parallel_threads` at a time. Records come back in
    /// completion order, one per question, whatever happened to it.
    pub async fn run(&self, questions: Vec<PreparedQuestion>) -> Vec<OutcomeRecord> {
        let total = questions.len();
        let mut rows = stream::iter(questions)
            .map(|prepared| {
                let runner = self.clone();
                let mut fallback = OutcomeRecord::new(&prepared.question);
                async move {
                    match tokio::spawn(async move { runner.process_row(prepared).await }).await {
                        Ok(record) => record,
                        Err(e) => {
                            error!("Worker for \"{}\" aborted: {}", fallback.question, e);
                            fallback.record_error(&RowError::WorkerAborted(e.to_string()));
                            fallback
                        }
                    }
                }
            })
            .buffer_unordered(self.parallel_threads);

        let mut records = Vec::with_capacity(total);
        let mut total_correct = 0;
        while let Some(record) = rows.next().await {
            if record.is_correct() {
                total_correct += 1;
            }
            records.push(record);
            info!(
                "Correct so far: {}/{} ({:.2}%) [{} of {} done]",
                total_correct,
                records.len(),
                100.0 * total_correct as f64 / records.len() as f64,
                records.len(),
                total
            );
        }

        records
    }

    pub async fn process_row(&self, prepared: PreparedQuestion) -> OutcomeRecord {
        let question = &prepared.question;
        let mut record = OutcomeRecord::new(question);

        let start = Instant::now();
        let generated = self.generate(&prepared.prompt).await;
        record.latency_seconds = start.elapsed().as_secs_f64();

        let generated = match generated {
            Ok(sql) => sql,
            Err(e) => {
                warn!("Generation failed for \"{}\": {}", question.question, e);
                record.record_error(&e);
                return record;
            }
        };
        debug!("Generated for \"{}\": {}", question.question, generated);
        record.generated_query = generated;

        let credentials = self.credentials.for_database(&question.db_name);
        let result = self
            .comparer
            .compare_query_results(
                &question.query,
                &record.generated_query,
                &credentials,
                &question.category(),
                self.execution_timeout,
            )
            .await;

        match result {
            Ok(outcome) => {
                debug!(
                    "\"{}\" exact_match={} correct={}",
                    question.question, outcome.exact_match, outcome.correct
                );
                record.record_outcome(outcome);
            }
            Err(e) => {
                let e = RowError::from(e);
                warn!("Execution failed for \"{}\": {}", question.question, e);
                record.record_error(&e);
            }
        }

        record
    }

    async fn generate(&self, prompt: &str) -> Result<String, RowError> {
        let completion = self.provider.complete(prompt, self.generation_timeout).await?;
        extract_sql(&completion).map_err(|_| RowError::GenerationEmptyResult("Empty query".to_string()))
    }
}
