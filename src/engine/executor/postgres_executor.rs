use super::cell_decoder::decode_row;
use super::{single_statement, ExecutorError, QueryExecutor};
use crate::engine::objects::{DatabaseCredentials, TabularResult};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};

/// Aborts the spawned connection driver however execution ends, including when the
/// whole execution future is dropped by a timeout.
struct ConnectionGuard(JoinHandle<()>);

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Executes against a live PostgreSQL server, one fresh connection per query.
#[derive(Clone, Debug, Default)]
pub struct PostgresExecutor {}

impl PostgresExecutor {
    pub fn new() -> PostgresExecutor {
        PostgresExecutor {}
    }

    async fn run(
        statement: &str,
        credentials: &DatabaseCredentials,
        timeout: Duration,
    ) -> Result<TabularResult, ExecutorError> {
        let (client, connection) = credentials.to_pg_config(timeout).connect(NoTls).await?;
        let database = credentials.database().to_string();
        let _guard = ConnectionGuard(tokio::spawn(async move {
            if let Err(e) = connection.await {
                debug!("Connection to {} closed with an error {}", database, e);
            }
        }));

        Self::query(&client, statement, timeout).await
    }

    /// Zero would turn the server side timeout off, so sub-millisecond timeouts round up.
    fn statement_timeout_sql(timeout: Duration) -> String {
        format!("SET statement_timeout = {}", timeout.as_millis().max(1))
    }

    async fn query(
        client: &Client,
        statement: &str,
        timeout: Duration,
    ) -> Result<TabularResult, ExecutorError> {
        //Let the server give up too, a dropped client does not cancel a running statement
        client
            .batch_execute(&Self::statement_timeout_sql(timeout))
            .await?;

        //Preparing first gives column names even when no rows come back
        let prepared = client.prepare(statement).await?;
        let columns = prepared
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let rows = client.query(&prepared, &[]).await?;
        let mut output = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            output.push(decode_row(row)?);
        }

        Ok(TabularResult::new(columns, output)?)
    }
}

impl QueryExecutor for PostgresExecutor {
    fn execute<'a>(
        &'a self,
        query: &'a str,
        credentials: &'a DatabaseCredentials,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<TabularResult, ExecutorError>> {
        async move {
            let statement = single_statement(query)?;
            debug!("Executing on {}: {}", credentials.database(), statement);

            match tokio::time::timeout(timeout, Self::run(statement, credentials, timeout)).await {
                Ok(result) => result,
                Err(_) => Err(ExecutorError::Timeout(format!(
                    "Query exceeded the {:.2}s execution timeout",
                    timeout.as_secs_f64()
                ))),
            }
        }
        .boxed()
    }
}
