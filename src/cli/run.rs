//! Run sq queries against the standard system

use super::CliError;
use crate::parser;
use crate::results::{self, ResultTree};
use crate::system;

/// Options for running a query
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The SQ query to run
    pub query: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't run
    pub syntax_only: bool,
}

/// Result of a run
#[derive(Debug)]
pub enum RunResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query ran successfully
    Success(ResultTree),
}

impl RunResult {
    /// Text to print on stdout.
    pub fn render(&self, pretty: bool) -> String {
        match self {
            RunResult::SyntaxValid => "Syntax is valid".to_string(),
            RunResult::Success(tree) if pretty => crate::output::to_json_pretty(tree),
            RunResult::Success(tree) => crate::output::to_json(tree),
        }
    }
}

/// Parse a query and, unless only the syntax is checked, run it.
pub fn execute(options: &RunOptions) -> Result<RunResult, CliError> {
    let ast = parser::parse(&options.query)?;
    if options.syntax_only {
        return Ok(RunResult::SyntaxValid);
    }

    let root = system::root();
    let tree = results::build(&ast, root.as_ref())?;
    Ok(RunResult::Success(tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(query: &str) -> RunOptions {
        RunOptions {
            query: query.to_string(),
            ..RunOptions::default()
        }
    }

    #[test]
    fn test_syntax_only_does_not_run() {
        // would fail with InvalidField if it ran
        let opts = RunOptions {
            syntax_only: true,
            ..options("no_such_field")
        };
        let result = execute(&opts).unwrap();
        assert_eq!(result.render(false), "Syntax is valid");
    }

    #[test]
    fn test_run() {
        let result = execute(&options("ints(1, 4)")).unwrap();
        assert_eq!(result.render(false), r#"{"ints":[1,2,3]}"#);
    }

    #[test]
    fn test_syntax_error() {
        let err = execute(&options("a {")).unwrap_err();
        let CliError::Query(err) = err;
        assert!(err.is_syntax_error());
    }
}
