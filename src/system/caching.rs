use std::cell::RefCell;
use std::collections::HashMap;

use crate::ast::FieldCallParams;
use crate::error::Result;
use crate::field::{Field, FieldPtr, FieldResult};
use crate::value::Primitive;

/// Memoizes the single-object results of another field.
///
/// Results are keyed by member name and parameters, so `int(1) int(2)`
/// still makes two accesses. Sequences are never cached: they are consumed
/// when iterated.
pub struct CachingField<T> {
    inner: T,
    cache: RefCell<HashMap<(String, String), FieldPtr>>,
}

impl<T> CachingField<T> {
    pub fn new(inner: T) -> Self {
        CachingField {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Field> Field for CachingField<T> {
    fn get(&self, member: &str, params: &FieldCallParams) -> Result<FieldResult> {
        let key = (member.to_string(), params.to_string());
        if let Some(field) = self.cache.borrow().get(&key) {
            tracing::trace!(member, "field cache hit");
            return Ok(FieldResult::Single(field.clone()));
        }

        let result = self.inner.get(member, params)?;
        if let FieldResult::Single(field) = &result {
            self.cache.borrow_mut().insert(key, field.clone());
        }
        Ok(result)
    }

    fn to_primitive(&self) -> Result<Primitive> {
        self.inner.to_primitive()
    }
}
