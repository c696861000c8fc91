use std::fmt;

use crate::ast::{FieldCallParams, FilterSpec};

/// Name of the synthetic node at the top of every AST.
pub const ROOT_NODE_NAME: &str = "root";

/// How the result of a field access is placed in its parent's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessKind {
    /// Output under the field's own name
    #[default]
    Default,

    /// Output replaces the parent's object (`<name`)
    Pullup,
}

/// A field access node: one `name(params)[filter]` clause of a query.
///
/// Children are the accesses made on the result of this one. Sibling order
/// is the left to right order of the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub name: String,
    pub access: AccessKind,
    pub params: FieldCallParams,
    pub filter: FilterSpec,
    pub children: Vec<Ast>,
}

impl Ast {
    pub fn new(name: impl Into<String>, access: AccessKind) -> Self {
        Ast {
            name: name.into(),
            access,
            params: FieldCallParams::default(),
            filter: FilterSpec::None,
            children: Vec::new(),
        }
    }

    /// An empty tree: just the root node.
    pub fn root() -> Self {
        Ast::new(ROOT_NODE_NAME, AccessKind::Default)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_pullup(&self) -> bool {
        self.access == AccessKind::Pullup
    }

    /// Builder helper used mostly by tests.
    pub fn with_child(mut self, child: Ast) -> Self {
        self.children.push(child);
        self
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let prefix = if self.is_pullup() { "<" } else { "" };
        writeln!(
            f,
            "{}{}{}({})[{}]",
            "  ".repeat(depth),
            prefix,
            self.name,
            self.params,
            self.filter
        )?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
