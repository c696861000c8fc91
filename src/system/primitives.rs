//! Fields that wrap a single primitive value.

use std::rc::Rc;

use crate::ast::FieldCallParams;
use crate::error::Result;
use crate::field::{Field, FieldResult};
use crate::system::invalid_field;
use crate::value::Primitive;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqInt {
    value: i64,
}

impl SqInt {
    pub fn new(value: i64) -> Self {
        SqInt { value }
    }
}

impl Field for SqInt {
    fn get(&self, member: &str, _params: &FieldCallParams) -> Result<FieldResult> {
        Err(invalid_field("SqInt", member))
    }

    fn to_primitive(&self) -> Result<Primitive> {
        Ok(Primitive::Int(self.value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqFloat {
    value: f64,
}

impl SqFloat {
    pub fn new(value: f64) -> Self {
        SqFloat { value }
    }
}

impl Field for SqFloat {
    fn get(&self, member: &str, _params: &FieldCallParams) -> Result<FieldResult> {
        Err(invalid_field("SqFloat", member))
    }

    fn to_primitive(&self) -> Result<Primitive> {
        Ok(Primitive::Float(self.value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqBool {
    value: bool,
}

impl SqBool {
    pub fn new(value: bool) -> Self {
        SqBool { value }
    }
}

impl Field for SqBool {
    fn get(&self, member: &str, _params: &FieldCallParams) -> Result<FieldResult> {
        Err(invalid_field("SqBool", member))
    }

    fn to_primitive(&self) -> Result<Primitive> {
        Ok(Primitive::Bool(self.value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqString {
    value: String,
}

impl SqString {
    pub fn new(value: impl Into<String>) -> Self {
        SqString {
            value: value.into(),
        }
    }
}

impl Field for SqString {
    fn get(&self, member: &str, _params: &FieldCallParams) -> Result<FieldResult> {
        match member {
            "length" => {
                let length = i64::try_from(self.value.chars().count()).unwrap_or(i64::MAX);
                Ok(FieldResult::Single(Rc::new(SqInt::new(length))))
            }
            _ => Err(invalid_field("SqString", member)),
        }
    }

    fn to_primitive(&self) -> Result<Primitive> {
        Ok(Primitive::String(self.value.clone()))
    }
}
