//! # Standard system
//!
//! The object graph the `sq` binary queries. Everything starts at
//! [`root()`]:
//!
//! ```text
//! path("/etc") { filename children[:3] }
//! ints(0, 10)[::2]
//! data_size(123456).KiB
//! string("hello").length
//! ```
//!
//! | type | primitive | fields |
//! |---|---|---|
//! | `SqRoot` | `"ROOT"` | `path`, `int`, `ints`, `bool`, `string`, `float`, `data_size` |
//! | `SqInt` | Int | |
//! | `SqFloat` | Float | |
//! | `SqBool` | Bool | |
//! | `SqString` | String | `length` |
//! | `SqPath` | String | `string`, `parent`, `filename`, `extension`, `stem`, `children`, `parts`, `absolute`, `canonical`, `is_absolute`, `exists`, `size` |
//! | `SqDataSize` | Int (bytes) | `B`, `kB`, `KiB`, `MB`, `MiB`, ... `EB`, `EiB` |
pub mod caching;
pub mod data_size;
pub mod path;
pub mod primitives;
pub mod root;

use std::rc::Rc;

pub use caching::CachingField;
pub use data_size::SqDataSize;
pub use path::SqPath;
pub use primitives::{SqBool, SqFloat, SqInt, SqString};
pub use root::SqRoot;

use crate::error::Error;
use crate::field::{Field, FieldPtr};

/// The root of the standard system.
pub fn root() -> FieldPtr {
    cached(SqRoot)
}

/// Wrap `field` so that repeated accesses reuse earlier results.
pub(crate) fn cached<T: Field + 'static>(field: T) -> FieldPtr {
    Rc::new(CachingField::new(field))
}

pub(crate) fn invalid_field(type_name: &str, member: &str) -> Error {
    Error::InvalidField {
        type_name: type_name.to_string(),
        field: member.to_string(),
    }
}
