//! CLI support for sq-lang
//!
//! Provides programmatic access to the `sq` command for embedding in other
//! tools.

mod run;

pub use run::{RunOptions, RunResult, execute};

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Lexing, parsing or evaluation failed
    Query(crate::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Query(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Query(e) => Some(e),
        }
    }
}

impl From<crate::Error> for CliError {
    fn from(e: crate::Error) -> Self {
        CliError::Query(e)
    }
}
