//! The object graph a query runs against.
//!
//! A system is made of [`Field`]s. Asking a field for one of its members
//! either yields another field or a lazy sequence of fields; every field can
//! also be turned into a [`Primitive`] for output.

use std::fmt;
use std::rc::Rc;

use crate::ast::FieldCallParams;
use crate::error::Result;
use crate::range::FieldRange;
use crate::value::Primitive;

/// Shared handle to a field of the system.
pub type FieldPtr = Rc<dyn Field>;

/// A node of the object graph.
pub trait Field {
    /// Access the member called `member`.
    ///
    /// Fails with `InvalidField` when the member does not exist and with
    /// `ArgumentMissing`/`ArgumentType` when `params` do not fit.
    fn get(&self, member: &str, params: &FieldCallParams) -> Result<FieldResult>;

    /// The value of this field when it is a leaf of the query.
    fn to_primitive(&self) -> Result<Primitive>;
}

impl fmt::Debug for dyn Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Field(..)")
    }
}

/// Outcome of a field access: one object or a sequence of them.
pub enum FieldResult {
    Single(FieldPtr),
    Sequence(FieldRange),
}

impl FieldResult {
    pub fn is_sequence(&self) -> bool {
        matches!(self, FieldResult::Sequence(_))
    }
}

impl fmt::Debug for FieldResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldResult::Single(_) => f.write_str("Single(..)"),
            FieldResult::Sequence(range) => f.debug_tuple("Sequence").field(range).finish(),
        }
    }
}

impl From<FieldPtr> for FieldResult {
    fn from(field: FieldPtr) -> Self {
        FieldResult::Single(field)
    }
}

impl From<FieldRange> for FieldResult {
    fn from(range: FieldRange) -> Self {
        FieldResult::Sequence(range)
    }
}

impl From<Vec<FieldPtr>> for FieldResult {
    fn from(fields: Vec<FieldPtr>) -> Self {
        FieldResult::Sequence(FieldRange::from(fields))
    }
}
