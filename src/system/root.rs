use std::rc::Rc;

use crate::ast::FieldCallParams;
use crate::error::{Error, Result};
use crate::field::{Field, FieldPtr, FieldResult};
use crate::range::{Category, FieldRange, Traversal};
use crate::system::{SqBool, SqDataSize, SqFloat, SqInt, SqPath, SqString, cached, invalid_field};
use crate::value::Primitive;

/// Entry point of the standard system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqRoot;

impl SqRoot {
    fn path(params: &FieldCallParams) -> Result<FieldResult> {
        let path = match params.get_optional::<String>(0, "path")? {
            Some(path) => path.into(),
            None => std::env::current_dir().map_err(|source| Error::Filesystem {
                path: ".".into(),
                source,
            })?,
        };
        Ok(FieldResult::Single(cached(SqPath::new(path))))
    }

    /// `ints(start)` counts up forever; `ints(start, stop)` is the half
    /// open interval `[start, stop)`.
    fn ints(params: &FieldCallParams) -> Result<FieldResult> {
        let start = params.get_or::<i64>(0, "start", 0)?;
        let stop = params.get_optional::<i64>(1, "stop")?;

        let make = move |i: usize| {
            let offset = i64::try_from(i).unwrap_or(i64::MAX);
            Rc::new(SqInt::new(start.saturating_add(offset))) as FieldPtr
        };
        let range = match stop {
            Some(stop) => {
                let len = usize::try_from(stop.saturating_sub(start)).unwrap_or(0);
                FieldRange::generate(
                    Some(len),
                    Category::new(Traversal::RandomAccess, true),
                    make,
                )
            }
            None => FieldRange::generate(None, Category::new(Traversal::Forward, false), make),
        };
        Ok(FieldResult::Sequence(range))
    }

    fn data_size(params: &FieldCallParams) -> Result<FieldResult> {
        let bytes = params.get_or::<i64>(0, "bytes", 0)?;
        let bytes = u64::try_from(bytes).map_err(|_| {
            Error::out_of_range(format!("data size cannot be negative, got {} bytes", bytes))
        })?;
        Ok(FieldResult::Single(cached(SqDataSize::new(bytes))))
    }
}

impl Field for SqRoot {
    fn get(&self, member: &str, params: &FieldCallParams) -> Result<FieldResult> {
        let field: FieldPtr = match member {
            "path" => return Self::path(params),
            "ints" => return Self::ints(params),
            "data_size" => return Self::data_size(params),
            "int" => Rc::new(SqInt::new(params.get_or::<i64>(0, "value", 0)?)),
            "bool" => Rc::new(SqBool::new(params.get_or::<bool>(0, "value", false)?)),
            "float" => Rc::new(SqFloat::new(params.get_or::<f64>(0, "value", 0.0)?)),
            "string" => cached(SqString::new(params.get_or::<String>(
                0,
                "value",
                String::new(),
            )?)),
            _ => return Err(invalid_field("SqRoot", member)),
        };
        Ok(FieldResult::Single(field))
    }

    fn to_primitive(&self) -> Result<Primitive> {
        Ok(Primitive::from("ROOT"))
    }
}
