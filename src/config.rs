//! Command line and environment configuration for a benchmark run.
use crate::constants::Defaults;
use crate::engine::objects::DatabaseCredentials;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sqleval-runner",
    about = "Scores model generated SQL against golden queries on PostgreSQL"
)]
pub struct Config {
    /// CSV of questions with question, db_name, query and query_category columns
    #[arg(short = 'q', long)]
    pub questions_file: PathBuf,

    /// Prompt template, repeat to benchmark several prompts in one run
    #[arg(short = 'p', long, required = true, num_args = 1..)]
    pub prompt_file: Vec<PathBuf>,

    /// Report path, one per prompt file
    #[arg(short = 'o', long, required = true, num_args = 1..)]
    pub output_file: Vec<PathBuf>,

    /// Only use the first N questions
    #[arg(short = 'n', long)]
    pub num_questions: Option<usize>,

    #[arg(long, default_value_t = Defaults::PARALLEL_THREADS)]
    pub parallel_threads: usize,

    /// Seconds allowed for one completion request
    #[arg(long, default_value_t = Defaults::GENERATION_TIMEOUT_SECS)]
    pub timeout_gen: f64,

    /// Seconds allowed for one query execution
    #[arg(long, default_value_t = Defaults::EXECUTION_TIMEOUT_SECS)]
    pub timeout_exec: f64,

    #[arg(short = 'm', long)]
    pub model: String,

    /// Completion endpoint
    #[arg(long, env = "SQLEVAL_API_URL")]
    pub api_url: String,

    #[arg(long, env = "SQLEVAL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value_t = Defaults::RETRY_COUNT)]
    pub retry_count: u32,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    #[arg(long, default_value = Defaults::DB_HOST, env = "SQLEVAL_DB_HOST")]
    pub db_host: String,

    #[arg(long, default_value_t = Defaults::DB_PORT, env = "SQLEVAL_DB_PORT")]
    pub db_port: u16,

    #[arg(long, default_value = Defaults::DB_USER, env = "SQLEVAL_DB_USER")]
    pub db_user: String,

    #[arg(
        long,
        default_value = Defaults::DB_PASSWORD,
        env = "SQLEVAL_DB_PASSWORD",
        hide_env_values = true
    )]
    pub db_password: String,

    /// Decimal places numbers are rounded to before comparing
    #[arg(long, default_value_t = Defaults::DECIMAL_POINTS)]
    pub decimal_points: u32,

    #[arg(long, default_value_t = Defaults::TOLERANCE)]
    pub tolerance: f64,

    /// Relative tolerance for ratio and aggregation questions
    #[arg(long, default_value_t = Defaults::LOOSE_TOLERANCE)]
    pub loose_tolerance: f64,

    /// Directory of <db_name>.sql schema files for the {table_metadata_string} placeholder
    #[arg(long)]
    pub metadata_dir: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt_file.len() != self.output_file.len() {
            return Err(ConfigError::PromptOutputMismatch(
                self.prompt_file.len(),
                self.output_file.len(),
            ));
        }
        if self.parallel_threads == 0 {
            return Err(ConfigError::ZeroThreads());
        }
        for (name, value) in [
            ("tolerance", self.tolerance),
            ("loose-tolerance", self.loose_tolerance),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidTolerance(name, value));
            }
        }
        for (name, value) in [("timeout-gen", self.timeout_gen), ("timeout-exec", self.timeout_exec)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::InvalidTimeout(name, value));
            }
        }
        Ok(())
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_gen)
    }

    pub fn execution_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_exec)
    }

    /// Server credentials, each question swaps in its own database.
    pub fn credentials(&self) -> DatabaseCredentials {
        DatabaseCredentials::new(
            self.db_host.clone(),
            self.db_port,
            self.db_user.clone(),
            self.db_password.clone(),
            "postgres".to_string(),
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Got {0} prompt files but {1} output files, they must pair up")]
    PromptOutputMismatch(usize, usize),
    #[error("Parallel threads must be at least 1")]
    ZeroThreads(),
    #[error("{0} must be a non-negative number, got {1}")]
    InvalidTolerance(&'static str, f64),
    #[error("{0} must be a positive number of seconds, got {1}")]
    InvalidTimeout(&'static str, f64),
}
