//! The query comparison engine: run the golden and generated queries, put both results in
//! canonical form and decide whether they agree.
pub mod comparator;
pub use comparator::Comparator;

pub mod executor;
pub use executor::ExecutionErrorKind;
pub use executor::ExecutorError;
pub use executor::PostgresExecutor;
pub use executor::QueryExecutor;

pub mod normalizer;
pub use normalizer::Normalizer;

pub mod objects;

pub mod sql_text;
pub use sql_text::SqlTextError;

use crate::constants::Defaults;
use moka::future::Cache;
use objects::{CanonicalResult, ComparisonOutcome, DatabaseCredentials, QueryCategory};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Golden results are keyed by database and the exact text of one golden alternative.
type GoldenKey = (String, String);

#[derive(Clone)]
pub struct QueryComparer {
    executor: Arc<dyn QueryExecutor>,
    normalizer: Normalizer,
    comparator: Comparator,
    golden_cache: Cache<GoldenKey, Arc<CanonicalResult>>,
}

impl QueryComparer {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        normalizer: Normalizer,
        comparator: Comparator,
    ) -> QueryComparer {
        QueryComparer {
            executor,
            normalizer,
            comparator,
            golden_cache: Cache::new(Defaults::GOLDEN_CACHE_CAPACITY),
        }
    }

    /// Scores `generated_sql` against every acceptable form of `golden_sql`.
    ///
    /// The first alternative that matches exactly wins outright, otherwise the query is
    /// correct if any alternative considers it correct.
    pub async fn compare_query_results(
        &self,
        golden_sql: &str,
        generated_sql: &str,
        credentials: &DatabaseCredentials,
        category: &QueryCategory,
        timeout: Duration,
    ) -> Result<ComparisonOutcome, ComparisonError> {
        let alternatives = sql_text::expand_alternatives(golden_sql)?;
        if alternatives.is_empty() {
            return Err(ComparisonError::NoGoldenAlternatives());
        }

        let mut golden_results = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            golden_results.push(self.golden_result(alternative, credentials, timeout).await?);
        }

        let generated = self
            .executor
            .execute(generated_sql, credentials, timeout)
            .await
            .map_err(ComparisonError::GeneratedQuery)?;
        let generated = self.normalizer.normalize(&generated);

        let mut correct = false;
        for golden in golden_results.iter() {
            let outcome = self.comparator.compare(golden, &generated, category);
            if outcome.exact_match {
                return Ok(outcome);
            }
            correct |= outcome.correct;
        }

        Ok(ComparisonOutcome::new(false, correct))
    }

    async fn golden_result(
        &self,
        alternative: String,
        credentials: &DatabaseCredentials,
        timeout: Duration,
    ) -> Result<Arc<CanonicalResult>, ComparisonError> {
        let key = (credentials.database().to_string(), alternative);
        if let Some(hit) = self.golden_cache.get(&key).await {
            debug!("Golden cache hit for {}", key.1);
            return Ok(hit);
        }

        let raw = self
            .executor
            .execute(&key.1, credentials, timeout)
            .await
            .map_err(ComparisonError::GoldenQuery)?;
        let canonical = Arc::new(self.normalizer.normalize(&raw));
        self.golden_cache.insert(key, canonical.clone()).await;
        Ok(canonical)
    }
}

#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("Invalid golden query: {0}")]
    InvalidGolden(#[from] SqlTextError),
    #[error("Golden query has no alternatives")]
    NoGoldenAlternatives(),
    #[error("Golden query failed: {0}")]
    GoldenQuery(ExecutorError),
    #[error("{0}")]
    GeneratedQuery(ExecutorError),
}

impl ComparisonError {
    pub fn kind(&self) -> ExecutionErrorKind {
        match self {
            ComparisonError::GoldenQuery(e) | ComparisonError::GeneratedQuery(e) => e.kind(),
            ComparisonError::InvalidGolden(_) | ComparisonError::NoGoldenAlternatives() => {
                ExecutionErrorKind::Other
            }
        }
    }
}
