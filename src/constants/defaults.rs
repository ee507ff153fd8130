//! Default settings for a benchmark run. Anything here can be overridden from the command line.

pub struct Defaults;

impl Defaults {
    /// Decimal places numbers are rounded to before comparison
    pub const DECIMAL_POINTS: u32 = 6;
    /// Past this f64 rounding stops meaning anything
    pub const MAX_DECIMAL_POINTS: u32 = 12;

    pub const TOLERANCE: f64 = 1e-6;
    /// Relative tolerance for categories that compute ratios or averages
    pub const LOOSE_TOLERANCE: f64 = 1e-3;

    pub const PARALLEL_THREADS: usize = 5;
    pub const GENERATION_TIMEOUT_SECS: f64 = 60.0;
    pub const EXECUTION_TIMEOUT_SECS: f64 = 10.0;
    /// Extra attempts after the first failed completion request
    pub const RETRY_COUNT: u32 = 2;

    pub const DB_HOST: &'static str = "localhost";
    pub const DB_PORT: u16 = 5432;
    pub const DB_USER: &'static str = "postgres";
    pub const DB_PASSWORD: &'static str = "postgres";

    /// Golden results kept in memory, keyed by database and query text
    pub const GOLDEN_CACHE_CAPACITY: u64 = 1024;
}
