pub mod ast;
pub mod cli;
pub mod convert;
pub mod error;
pub mod field;
pub mod filter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod range;
pub mod results;
pub mod system;
pub mod value;

pub use ast::{AccessKind, Ast, ComparisonOperator, FieldCallParams, FilterSpec, Token, TokenKind};
pub use error::{Error, LexError, ParseError, Result};
pub use field::{Field, FieldPtr, FieldResult};
pub use lexer::Lexer;
pub use output::{to_json, to_json_pretty};
pub use parser::{Parser, parse};
pub use range::{Category, FieldRange, Traversal};
pub use results::{Data, ResultTree};
pub use value::{Primitive, PrimitiveType};

/// Parse `query` and run it against the standard system.
pub fn query(query: &str) -> Result<ResultTree> {
    let ast = parse(query)?;
    results::build(&ast, system::root().as_ref())
}
