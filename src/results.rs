//! Evaluation of a query AST against a system, producing a result tree.

use tracing::trace;

use crate::ast::Ast;
use crate::error::{Error, Result};
use crate::field::{Field, FieldResult};
use crate::filter;
use crate::value::Primitive;

/// Contents of a node of the result tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Primitive(Primitive),

    /// Field name to result, in query order
    Object(Vec<(String, ResultTree)>),

    Array(Vec<ResultTree>),
}

/// Output of a query, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTree {
    pub data: Data,
}

impl ResultTree {
    pub fn new(data: Data) -> Self {
        ResultTree { data }
    }

    pub fn into_data(self) -> Data {
        self.data
    }
}

impl From<Data> for ResultTree {
    fn from(data: Data) -> Self {
        ResultTree::new(data)
    }
}

impl From<Primitive> for ResultTree {
    fn from(value: Primitive) -> Self {
        ResultTree::new(Data::Primitive(value))
    }
}

/// Walk `ast` against `root`, which plays the part of the AST's root node.
///
/// Each field of the query is requested exactly once per object it is
/// accessed on. Any error aborts the whole build.
pub fn build(ast: &Ast, root: &dyn Field) -> Result<ResultTree> {
    Ok(ResultTree::new(data_from_field(ast, root)?))
}

fn data_from_field(ast: &Ast, field: &dyn Field) -> Result<Data> {
    if ast.is_leaf() {
        return Ok(Data::Primitive(field.to_primitive()?));
    }

    if ast.children.len() > 1 {
        if let Some(pullup) = ast.children.iter().find(|child| child.is_pullup()) {
            return Err(Error::PullupWithSiblings {
                field: pullup.name.clone(),
            });
        }
    }

    let mut object = Vec::with_capacity(ast.children.len());
    for child in &ast.children {
        trace!(field = %child.name, params = %child.params, "accessing field");
        let result = field.get(&child.name, &child.params)?;

        let filter = filter::create(&child.filter);
        let result = filter.transform_for_requirements(result)?;
        let result = filter.apply(result)?;

        let data = data_from_result(child, result)?;
        if child.is_pullup() {
            return Ok(data);
        }
        object.push((child.name.clone(), ResultTree::new(data)));
    }
    Ok(Data::Object(object))
}

fn data_from_result(ast: &Ast, result: FieldResult) -> Result<Data> {
    match result {
        FieldResult::Single(field) => data_from_field(ast, field.as_ref()),
        FieldResult::Sequence(range) => {
            if range.is_unbounded() {
                return Err(Error::out_of_range(format!(
                    "field \"{}\" yields an unbounded sequence; limit it with a slice such as [:10]",
                    ast.name
                )));
            }
            range
                .map(|field| Ok(ResultTree::new(data_from_field(ast, field?.as_ref())?)))
                .collect::<Result<Vec<_>>>()
                .map(Data::Array)
        }
    }
}
