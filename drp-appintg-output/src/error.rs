/// Errors that can occur while converting or writing query output.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid output type '{0}'. Valid output types: wcl, json, xml")]
    UnsupportedType(String),

    #[error("Line {line} has {found} file(s) but there are {expected} file label(s)")]
    LabelCount {
        line: usize,
        expected: usize,
        found: usize,
    },
}
