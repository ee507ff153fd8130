//! Constant error codes found from here: https://www.postgresql.org/docs/current/errcodes-appendix.html

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PgErrorCodes {
    SyntaxError,
    QueryCanceled,
}

impl PgErrorCodes {
    pub const fn value(self) -> &'static str {
        use PgErrorCodes::*;
        match self {
            SyntaxError => "42601",
            QueryCanceled => "57014",
        }
    }
}
