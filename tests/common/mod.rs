// tests/common/mod.rs
//
// Fake object graphs shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sq_lang::{
    Category, FieldCallParams, FieldPtr, FieldRange, FieldResult, Primitive, Result, Traversal,
    Field,
};
use sq_lang::system::SqInt;

/// One recorded `get` call: the path of the object it was made on, the
/// member name and the parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub on: String,
    pub member: String,
    pub params: FieldCallParams,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// A field that answers any member.
///
/// Members whose name starts with `list` yield a random access sequence of
/// three fields; every other member yields a single field. The primitive
/// of a field is its path from the root, such as `"a.list[1].b"`.
pub struct FakeField {
    path: String,
    log: CallLog,
}

impl FakeField {
    pub fn root(log: &CallLog) -> Self {
        FakeField {
            path: "root".to_string(),
            log: log.clone(),
        }
    }

    fn child(&self, path: String) -> FieldPtr {
        Rc::new(FakeField {
            path,
            log: self.log.clone(),
        })
    }
}

impl Field for FakeField {
    fn get(&self, member: &str, params: &FieldCallParams) -> Result<FieldResult> {
        self.log.borrow_mut().push(Call {
            on: self.path.clone(),
            member: member.to_string(),
            params: params.clone(),
        });

        let path = if self.path == "root" {
            member.to_string()
        } else {
            format!("{}.{}", self.path, member)
        };
        if member.starts_with("list") {
            let fields: Vec<FieldPtr> = (0..3)
                .map(|i| self.child(format!("{}[{}]", path, i)))
                .collect();
            return Ok(FieldResult::from(fields));
        }
        Ok(FieldResult::Single(self.child(path)))
    }

    fn to_primitive(&self) -> Result<Primitive> {
        Ok(Primitive::String(self.path.clone()))
    }
}

pub fn new_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// A range of `len` integers `0..len` with the given capabilities, counting
/// how many elements get generated.
pub fn counted_ints(len: usize, category: Category, generated: &Rc<Cell<usize>>) -> FieldRange {
    let generated = generated.clone();
    FieldRange::generate(Some(len), category, move |i| {
        generated.set(generated.get() + 1);
        Rc::new(SqInt::new(i as i64)) as FieldPtr
    })
}

pub fn ints(len: usize, category: Category) -> FieldRange {
    counted_ints(len, category, &Rc::new(Cell::new(0)))
}

/// Integer values of the remaining elements of `result`.
pub fn int_values(result: FieldResult) -> Vec<i64> {
    let fields = match result {
        FieldResult::Single(field) => vec![field],
        FieldResult::Sequence(range) => range.into_fields().unwrap(),
    };
    fields
        .iter()
        .map(|field| match field.to_primitive().unwrap() {
            Primitive::Int(n) => n,
            other => panic!("expected an int, got {:?}", other),
        })
        .collect()
}

/// Python's `list(range(len))[start:stop:step]`.
pub fn python_slice(len: i64, start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Vec<i64> {
    let step = step.unwrap_or(1);
    assert_ne!(step, 0);
    let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
    let clamp = |index: i64| {
        if index < 0 {
            (index + len).max(lower)
        } else {
            index.min(upper)
        }
    };
    let start = start.map(clamp).unwrap_or(if step < 0 { upper } else { lower });
    let stop = stop.map(clamp).unwrap_or(if step < 0 { lower } else { upper });

    let mut out = Vec::new();
    let mut i = start;
    while (step > 0 && i < stop) || (step < 0 && i > stop) {
        out.push(i);
        i += step;
    }
    out
}

/// Python's `list(range(len))[index]`, `None` for an IndexError.
pub fn python_index(len: i64, index: i64) -> Option<i64> {
    let resolved = if index < 0 { index + len } else { index };
    (0..len).contains(&resolved).then_some(resolved)
}

pub const RANDOM_ACCESS_SIZED: Category = Category::new(Traversal::RandomAccess, true);
