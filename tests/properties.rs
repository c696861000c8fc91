// tests/properties.rs
//
// Property tests: list filters agree with Python's list semantics for any
// bounds and any sequence capabilities.

mod common;

use common::{int_values, ints, python_index, python_slice};
use proptest::prelude::*;
use sq_lang::filter;
use sq_lang::{Category, Error, FieldResult, FilterSpec, Result, parse};

fn run(spec: &FilterSpec, result: FieldResult) -> Result<FieldResult> {
    let filter = filter::create(spec);
    let result = filter.transform_for_requirements(result)?;
    filter.apply(result)
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn bound() -> impl Strategy<Value = Option<i64>> {
    prop::option::of(-40i64..40)
}

fn step() -> impl Strategy<Value = Option<i64>> {
    prop::option::of(prop_oneof![-8i64..=-1, 1i64..=8])
}

proptest! {
    #[test]
    fn slice_matches_python(
        len in 0usize..30,
        start in bound(),
        stop in bound(),
        step in step(),
        category in category(),
    ) {
        let spec = FilterSpec::Slice { start, stop, step };
        let result = run(&spec, ints(len, category).into()).unwrap();
        prop_assert_eq!(int_values(result), python_slice(len as i64, start, stop, step));
    }

    #[test]
    fn element_access_matches_python(
        len in 0usize..30,
        index in -40i64..40,
        category in category(),
    ) {
        let spec = FilterSpec::ElementAccess { index };
        let result = run(&spec, ints(len, category).into());
        match python_index(len as i64, index) {
            Some(expected) => prop_assert_eq!(int_values(result.unwrap()), vec![expected]),
            None => prop_assert!(matches!(result, Err(Error::OutOfRange(_)))),
        }
    }

    #[test]
    fn parsed_slice_keeps_its_bounds(
        start in prop::option::of(any::<i64>()),
        stop in prop::option::of(any::<i64>()),
        step in prop::option::of(any::<i64>().prop_filter("non-zero", |s| *s != 0)),
    ) {
        let text = |b: Option<i64>| b.map(|v| v.to_string()).unwrap_or_default();
        let query = match step {
            Some(_) => format!("a[{}:{}:{}]", text(start), text(stop), text(step)),
            None => format!("a[{}:{}]", text(start), text(stop)),
        };
        let ast = parse(&query).unwrap();
        prop_assert_eq!(&ast.children[0].filter, &FilterSpec::Slice { start, stop, step });
    }

    #[test]
    fn arbitrary_text_never_panics(query in "[a-z0-9(){}\\[\\]<>=:,. \"-]{0,24}") {
        let _ = parse(&query);
    }
}
