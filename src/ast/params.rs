use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::value::{Primitive, PrimitiveType};

/// Parameters given when accessing a field of a system object.
///
/// # Examples
/// ```text
/// ints(1, 10)          // positional: [1, 10]
/// path(path="/tmp")    // named: {path: "/tmp"}
/// ints(1, stop=10)     // positional: [1], named: {stop: 10}
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldCallParams {
    pub positional: Vec<Primitive>,
    pub named: BTreeMap<String, Primitive>,
}

impl FieldCallParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    fn lookup(&self, index: usize, name: &str) -> Option<&Primitive> {
        self.positional.get(index).or_else(|| self.named.get(name))
    }

    /// Get a required parameter by position, falling back to its name.
    pub fn get<T: PrimitiveType>(&self, index: usize, name: &str) -> Result<T> {
        self.get_optional(index, name)?
            .ok_or_else(|| Error::ArgumentMissing {
                name: name.to_string(),
                type_name: T::TYPE_NAME,
            })
    }

    /// Get a parameter that may be absent.
    ///
    /// A parameter that is present with the wrong type is still an error.
    pub fn get_optional<T: PrimitiveType>(&self, index: usize, name: &str) -> Result<Option<T>> {
        let Some(value) = self.lookup(index, name) else {
            return Ok(None);
        };
        match value.convert::<T>() {
            Ok(v) => Ok(Some(v)),
            Err(Error::InvalidConversion { .. }) => Err(Error::ArgumentType {
                received: value.to_string(),
                received_type: value.type_name(),
                expected: T::TYPE_NAME,
            }),
            Err(e) => Err(e),
        }
    }

    pub fn get_or<T: PrimitiveType>(&self, index: usize, name: &str, default: T) -> Result<T> {
        Ok(self.get_optional(index, name)?.unwrap_or(default))
    }
}

impl fmt::Display for FieldCallParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positional = self.positional.iter().map(|p| p.to_string());
        let named = self.named.iter().map(|(k, v)| format!("{}={}", k, v));
        let all: Vec<String> = positional.chain(named).collect();
        write!(f, "{}", all.join(", "))
    }
}
