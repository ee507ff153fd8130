mod canonical_result;
pub use canonical_result::CanonicalResult;
pub use canonical_result::CanonicalRow;

mod canonical_value;
pub use canonical_value::CanonicalValue;

mod comparison_outcome;
pub use comparison_outcome::ComparisonOutcome;

mod comparison_policy;
pub use comparison_policy::ComparisonPolicy;

mod database_credentials;
pub use database_credentials::DatabaseCredentials;

mod query_category;
pub use query_category::QueryCategory;

mod result_row;
pub use result_row::ResultRow;

mod result_value;
pub use result_value::ResultValue;

mod tabular_result;
pub use tabular_result::TabularResult;
pub use tabular_result::TabularResultError;
