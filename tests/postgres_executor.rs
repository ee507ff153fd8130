//! Runs against a live server. Set SQLEVAL_TEST_PG to a database name to enable, the
//! server comes from the usual SQLEVAL_DB_* variables or localhost defaults.
use sqlevallib::constants::Defaults;
use sqlevallib::engine::objects::{DatabaseCredentials, ResultValue};
use sqlevallib::engine::{ExecutionErrorKind, PostgresExecutor, QueryExecutor};
use std::env;
use std::time::Duration;

fn live_credentials() -> Option<DatabaseCredentials> {
    let database = env::var("SQLEVAL_TEST_PG").ok()?;
    let var = |name: &str, default: &str| env::var(name).unwrap_or_else(|_| default.to_string());
    Some(DatabaseCredentials::new(
        var("SQLEVAL_DB_HOST", Defaults::DB_HOST),
        var("SQLEVAL_DB_PORT", "5432").parse().unwrap_or(Defaults::DB_PORT),
        var("SQLEVAL_DB_USER", Defaults::DB_USER),
        var("SQLEVAL_DB_PASSWORD", Defaults::DB_PASSWORD),
        database,
    ))
}

#[tokio::test]
async fn decodes_common_types() -> Result<(), Box<dyn std::error::Error>> {
    let creds = match live_credentials() {
        Some(c) => c,
        None => return Ok(()),
    };

    let result = PostgresExecutor::new()
        .execute(
            "SELECT 7::int4 AS a, 2.50::numeric AS b, 'Hi'::text AS c, NULL::int8 AS d, \
             DATE '2024-01-02' AS e, true AS f, \
             'a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11'::uuid AS g, '{\"k\": 1}'::jsonb AS h, \
             1.5::float8 AS i;",
            &creds,
            Duration::from_secs(5),
        )
        .await?;

    assert_eq!(result.columns(), &["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
    let row = &result.rows()[0];
    assert_eq!(row[0], Some(ResultValue::Integer(7)));
    assert_eq!(row[1], Some(ResultValue::Numeric("2.50".to_string())));
    assert_eq!(row[2], Some(ResultValue::Text("Hi".to_string())));
    assert_eq!(row[3], None);
    assert_eq!(row[4].as_ref().map(|v| v.to_string()), Some("2024-01-02".to_string()));
    assert_eq!(row[5], Some(ResultValue::Bool(true)));
    assert_eq!(
        row[6].as_ref().map(|v| v.to_string()),
        Some("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11".to_string())
    );
    assert_eq!(row[7], Some(ResultValue::Text("{\"k\": 1}".to_string())));
    assert_eq!(row[8], Some(ResultValue::Float(1.5)));
    Ok(())
}

#[tokio::test]
async fn empty_result_keeps_columns() -> Result<(), Box<dyn std::error::Error>> {
    let creds = match live_credentials() {
        Some(c) => c,
        None => return Ok(()),
    };

    let result = PostgresExecutor::new()
        .execute("SELECT 1 AS one, 'x' AS two WHERE false", &creds, Duration::from_secs(5))
        .await?;
    assert_eq!(result.column_count(), 2);
    assert_eq!(result.row_count(), 0);
    Ok(())
}

#[tokio::test]
async fn classifies_failures() -> Result<(), Box<dyn std::error::Error>> {
    let creds = match live_credentials() {
        Some(c) => c,
        None => return Ok(()),
    };
    let executor = PostgresExecutor::new();

    let syntax = executor
        .execute("SELEC 1", &creds, Duration::from_secs(5))
        .await
        .err()
        .ok_or("expected a syntax error")?;
    assert_eq!(syntax.kind(), ExecutionErrorKind::Syntax);
    assert!(syntax.to_string().contains("SELEC"));

    let missing = executor
        .execute("SELECT * FROM table_that_does_not_exist", &creds, Duration::from_secs(5))
        .await
        .err()
        .ok_or("expected an error")?;
    assert_eq!(missing.kind(), ExecutionErrorKind::Other);

    let slow = executor
        .execute("SELECT pg_sleep(5)", &creds, Duration::from_millis(500))
        .await
        .err()
        .ok_or("expected a timeout")?;
    assert_eq!(slow.kind(), ExecutionErrorKind::Timeout);

    let many = executor
        .execute("SELECT 1; SELECT 2", &creds, Duration::from_secs(5))
        .await
        .err()
        .ok_or("expected a rejection")?;
    assert_eq!(many.kind(), ExecutionErrorKind::Syntax);
    Ok(())
}
