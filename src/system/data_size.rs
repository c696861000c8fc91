use std::rc::Rc;

use crate::ast::FieldCallParams;
use crate::error::{Error, Result};
use crate::field::{Field, FieldResult};
use crate::system::{SqFloat, SqInt, invalid_field};
use crate::value::Primitive;

/// Unit names and the number of bytes in one of each.
const UNITS: [(&str, u64); 12] = [
    ("kB", 1000),
    ("KiB", 1 << 10),
    ("MB", 1000 * 1000),
    ("MiB", 1 << 20),
    ("GB", 1000 * 1000 * 1000),
    ("GiB", 1 << 30),
    ("TB", 1000 * 1000 * 1000 * 1000),
    ("TiB", 1 << 40),
    ("PB", 1000 * 1000 * 1000 * 1000 * 1000),
    ("PiB", 1 << 50),
    ("EB", 1000 * 1000 * 1000 * 1000 * 1000 * 1000),
    ("EiB", 1 << 60),
];

/// An amount of data, in bytes.
///
/// `B` gives the exact number of bytes; every other unit gives a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqDataSize {
    bytes: u64,
}

impl SqDataSize {
    pub fn new(bytes: u64) -> Self {
        SqDataSize { bytes }
    }

    fn bytes_as_int(&self) -> Result<i64> {
        i64::try_from(self.bytes).map_err(|_| {
            Error::out_of_range(format!("data size of {} bytes is too large", self.bytes))
        })
    }
}

impl Field for SqDataSize {
    fn get(&self, member: &str, _params: &FieldCallParams) -> Result<FieldResult> {
        if member == "B" {
            return Ok(FieldResult::Single(Rc::new(SqInt::new(self.bytes_as_int()?))));
        }
        match UNITS.iter().find(|(unit, _)| *unit == member) {
            Some((_, multiplier)) => {
                let value = self.bytes as f64 / *multiplier as f64;
                Ok(FieldResult::Single(Rc::new(SqFloat::new(value))))
            }
            None => Err(invalid_field("SqDataSize", member)),
        }
    }

    fn to_primitive(&self) -> Result<Primitive> {
        Ok(Primitive::Int(self.bytes_as_int()?))
    }
}
