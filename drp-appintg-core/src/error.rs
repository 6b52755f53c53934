use thiserror::Error;

/// Errors raised while building the query or reshaping its results.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Invalid or missing selection criteria, detected before any I/O
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A result row lacks a column the reshaper needs
    #[error("Malformed result row: {0}")]
    MalformedRow(String),

    /// An image is missing a file label that other images in the result set have
    #[error("Image '{filename}' has no '{label}' file but other images in the result set do")]
    ShapeMismatch { filename: String, label: String },
}

impl QueryError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn malformed_row(msg: impl Into<String>) -> Self {
        Self::MalformedRow(msg.into())
    }
}
