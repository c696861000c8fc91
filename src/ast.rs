//! # SQ Query Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for SQ queries. A query
//! is a tree of field accesses made against a system object graph; the AST
//! mirrors that tree exactly.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[params]** - Positional and named field call parameters
//! - **[filter_spec]** - Element access, slice and comparison filters
//! - **[node]** - The field access tree itself
//!
//! ## Quick Start
//!
//! ```text
//! path("/etc") { filename children[-2:] { filename size.KiB } }
//! ```
//!
//! This query reads the filename of `/etc` and the names and sizes of its
//! last two children.
//!
//! ## Core Concepts
//!
//! ### Dot and brace expressions
//!
//! `a.b.c` and `a { b { c } }` produce the same tree: a single chain of
//! accesses. Braces fan out several accesses under the same parent:
//!
//! ```text
//! a { b c }      // root -> a -> (b, c)
//! a b            // root -> (a, b)
//! ```
//!
//! ### Filters
//!
//! A field that yields a sequence can be narrowed with a list filter:
//!
//! - **Element access** `[i]` - negative indices count from the end
//! - **Slices** `[start:stop:step]` - Python slice semantics
//! - **Comparisons** `[> 3]`, `[size >= 1024]`
//!
//! ### Pullup
//!
//! Prefixing a field with `<` places its output directly where its parent's
//! object would go:
//!
//! ```text
//! <ints(0, 3)        // [0,1,2] instead of {"ints":[0,1,2]}
//! ```
pub mod filter_spec;
pub mod node;
pub mod params;
pub mod tokens;

pub use filter_spec::{ComparisonOperator, FilterSpec};
pub use node::{AccessKind, Ast, ROOT_NODE_NAME};
pub use params::FieldCallParams;
pub use tokens::{Token, TokenKind};
