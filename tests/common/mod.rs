use futures::future::BoxFuture;
use futures::FutureExt;
use sqlevallib::engine::objects::{DatabaseCredentials, ResultRow, ResultValue, TabularResult};
use sqlevallib::engine::{ExecutionErrorKind, ExecutorError, QueryExecutor};
use sqlevallib::harness::{CompletionProvider, GenerationError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[allow(dead_code)]
pub enum Fixture {
    Table(TabularResult),
    Fail(ExecutionErrorKind, String),
}

/// Answers queries from a fixed table keyed by database and query text.
#[derive(Default)]
pub struct StaticExecutor {
    fixtures: HashMap<(String, String), Fixture>,
    pub calls: AtomicUsize,
}

fn query_key(query: &str) -> String {
    query.trim().trim_end_matches(';').trim().to_string()
}

#[allow(dead_code)]
impl StaticExecutor {
    pub fn new() -> StaticExecutor {
        StaticExecutor::default()
    }

    pub fn with_table(mut self, database: &str, query: &str, table: TabularResult) -> Self {
        self.fixtures.insert(
            (database.to_string(), query_key(query)),
            Fixture::Table(table),
        );
        self
    }

    pub fn with_failure(
        mut self,
        database: &str,
        query: &str,
        kind: ExecutionErrorKind,
        message: &str,
    ) -> Self {
        self.fixtures.insert(
            (database.to_string(), query_key(query)),
            Fixture::Fail(kind, message.to_string()),
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QueryExecutor for StaticExecutor {
    fn execute<'a>(
        &'a self,
        query: &'a str,
        credentials: &'a DatabaseCredentials,
        _timeout: Duration,
    ) -> BoxFuture<'a, Result<TabularResult, ExecutorError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = (credentials.database().to_string(), query_key(query));
        let result = match self.fixtures.get(&key) {
            Some(Fixture::Table(t)) => Ok(t.clone()),
            Some(Fixture::Fail(ExecutionErrorKind::Syntax, m)) => Err(ExecutorError::Syntax(m.clone())),
            Some(Fixture::Fail(ExecutionErrorKind::Timeout, m)) => {
                Err(ExecutorError::Timeout(m.clone()))
            }
            Some(Fixture::Fail(ExecutionErrorKind::Other, m)) => Err(ExecutorError::Other(m.clone())),
            None => Err(ExecutorError::Other(format!(
                "relation does not exist for query {}",
                key.1
            ))),
        };
        async move { result }.boxed()
    }
}

#[allow(dead_code)]
pub enum Script {
    Answer(String),
    Timeout,
    Fail(String),
}

/// A model that answers each prompt from a script and remembers what it was asked.
#[derive(Default)]
pub struct ScriptedProvider {
    answers: HashMap<String, Script>,
    pub prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn new() -> ScriptedProvider {
        ScriptedProvider::default()
    }

    pub fn answer(mut self, prompt: &str, completion: &str) -> Self {
        self.answers
            .insert(prompt.to_string(), Script::Answer(completion.to_string()));
        self
    }

    pub fn script(mut self, prompt: &str, script: Script) -> Self {
        self.answers.insert(prompt.to_string(), script);
        self
    }
}

impl CompletionProvider for ScriptedProvider {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<String, GenerationError>> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let result = match self.answers.get(prompt.trim()) {
            Some(Script::Answer(a)) => Ok(a.clone()),
            Some(Script::Timeout) => Err(GenerationError::Timeout(timeout.as_secs_f64())),
            Some(Script::Fail(m)) => Err(GenerationError::Provider(m.clone())),
            None => Err(GenerationError::EmptyResult()),
        };
        async move { result }.boxed()
    }
}

#[allow(dead_code)]
pub fn int(v: i64) -> Option<ResultValue> {
    Some(ResultValue::Integer(v))
}

#[allow(dead_code)]
pub fn float(v: f64) -> Option<ResultValue> {
    Some(ResultValue::Float(v))
}

#[allow(dead_code)]
pub fn text(v: &str) -> Option<ResultValue> {
    Some(ResultValue::Text(v.to_string()))
}

#[allow(dead_code)]
pub fn table(
    columns: &[&str],
    rows: Vec<Vec<Option<ResultValue>>>,
) -> Result<TabularResult, Box<dyn std::error::Error>> {
    Ok(TabularResult::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.into_iter().map(ResultRow).collect(),
    )?)
}

#[allow(dead_code)]
pub fn credentials(database: &str) -> DatabaseCredentials {
    DatabaseCredentials::new(
        "localhost".to_string(),
        5432,
        "postgres".to_string(),
        "postgres".to_string(),
        database.to_string(),
    )
}
