mod defaults;
pub use defaults::Defaults;

mod pg_error_codes;
pub use pg_error_codes::PgErrorCodes;
