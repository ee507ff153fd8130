use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

/// Connection parameters for one reference database. Never mutated once built;
/// `for_database` hands out a copy pointed at another database on the same server.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct DatabaseCredentials {
    host: String,
    port: u16,
    user: String,
    password: String,
    database: String,
}

impl DatabaseCredentials {
    pub fn new(host: String, port: u16, user: String, password: String, database: String) -> Self {
        DatabaseCredentials {
            host,
            port,
            user,
            password,
            database,
        }
    }

    pub fn for_database(&self, database: &str) -> DatabaseCredentials {
        DatabaseCredentials {
            database: database.to_string(),
            ..self.clone()
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn to_pg_config(&self, connect_timeout: Duration) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .password(&self.password)
            .dbname(&self.database)
            .application_name("sqleval")
            .connect_timeout(connect_timeout);
        config
    }
}

//Keep the password out of logs
impl Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .finish()
    }
}
