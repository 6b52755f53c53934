use thiserror::Error;

use drp_appintg_core::QueryError;
use drp_appintg_db::DbError;
use drp_appintg_output::OutputError;

/// Errors that can end a `processccd-query` run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Output(#[from] OutputError),

    /// Bad command-line input that clap cannot catch on its own
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
