use thiserror::Error;

/// Errors from connecting to the database or executing the query.
#[derive(Debug, Error)]
pub enum DbError {
    /// The driver rejected the statement or failed while running it
    #[error("Query execution failed: {0}")]
    Execution(#[from] rusqlite::Error),

    /// Missing or unusable connection settings
    #[error("Database config error: {0}")]
    Config(String),

    #[error("Invalid services file: {0}")]
    Services(#[from] toml::de::Error),

    /// A result column holds a value the output formats cannot carry
    #[error("Column '{0}' holds a BLOB value")]
    UnsupportedColumn(String),
}

impl DbError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
