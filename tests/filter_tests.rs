// tests/filter_tests.rs

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{
    FakeField, RANDOM_ACCESS_SIZED, counted_ints, int_values, ints, new_log, python_index,
    python_slice,
};
use sq_lang::filter;
use sq_lang::system::{SqInt, SqString};
use sq_lang::{
    Category, ComparisonOperator, Error, Field, FieldCallParams, FieldPtr, FieldRange, FieldResult,
    FilterSpec, Primitive, Result, Traversal,
};

fn run(spec: &FilterSpec, result: FieldResult) -> Result<FieldResult> {
    let filter = filter::create(spec);
    let result = filter.transform_for_requirements(result)?;
    filter.apply(result)
}

fn slice(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> FilterSpec {
    FilterSpec::Slice { start, stop, step }
}

fn bounds() -> Vec<Option<i64>> {
    std::iter::once(None).chain((-7..=7).map(Some)).collect()
}

// ============================================================================
// Slices
// ============================================================================

#[test]
fn test_slices_match_python_for_every_category() {
    let steps = [None, Some(1), Some(2), Some(3), Some(-1), Some(-2), Some(-3)];
    for category in Category::ALL {
        for len in 0..6 {
            for start in bounds() {
                for stop in bounds() {
                    for step in steps {
                        let spec = slice(start, stop, step);
                        let result = run(&spec, ints(len, category).into()).unwrap_or_else(|e| {
                            panic!("[{}] on {} len {}: {}", spec, category, len, e)
                        });
                        assert_eq!(
                            int_values(result),
                            python_slice(len as i64, start, stop, step),
                            "[{}] on {} len {}",
                            spec,
                            category,
                            len
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_slice_keeps_laziness_when_possible() {
    let input = Category::new(Traversal::Input, false);
    let result = run(&slice(Some(1), Some(4), None), ints(10, input).into()).unwrap();
    let FieldResult::Sequence(range) = result else {
        panic!("expected a sequence");
    };
    assert_eq!(range.category().traversal, Traversal::Input);

    let result = run(&slice(None, None, Some(-1)), ints(3, input).into()).unwrap();
    let FieldResult::Sequence(range) = result else {
        panic!("expected a sequence");
    };
    assert!(range.is_random_access());
}

#[test]
fn test_positive_slice_generates_only_kept_elements() {
    for category in Category::ALL {
        let generated = Rc::new(Cell::new(0));
        let range = counted_ints(100, category, &generated);
        let result = run(&slice(Some(90), Some(95), None), range.into()).unwrap();
        assert_eq!(int_values(result), vec![90, 91, 92, 93, 94]);
        assert_eq!(generated.get(), 5, "category {}", category);
    }
}

#[test]
fn test_strided_slice_generates_only_kept_elements() {
    let generated = Rc::new(Cell::new(0));
    let range = counted_ints(100, RANDOM_ACCESS_SIZED, &generated);
    let result = run(&slice(None, None, Some(25)), range.into()).unwrap();
    assert_eq!(int_values(result), vec![0, 25, 50, 75]);
    assert_eq!(generated.get(), 4);
}

#[test]
fn test_negative_slice_on_bidirectional_does_not_materialize() {
    for traversal in [Traversal::Bidirectional, Traversal::RandomAccess] {
        let generated = Rc::new(Cell::new(0));
        let range = counted_ints(100, Category::new(traversal, false), &generated);
        let result = run(&slice(Some(-3), None, None), range.into()).unwrap();
        assert_eq!(int_values(result), vec![97, 98, 99]);
        assert_eq!(generated.get(), 3);

        let generated = Rc::new(Cell::new(0));
        let range = counted_ints(100, Category::new(traversal, true), &generated);
        let result = run(&slice(Some(-2), Some(-5), Some(-1)), range.into()).unwrap();
        assert_eq!(int_values(result), vec![98, 97, 96]);
        assert_eq!(generated.get(), 3);
    }
}

#[test]
fn test_negative_slice_on_input_materializes() {
    let generated = Rc::new(Cell::new(0));
    let range = counted_ints(10, Category::new(Traversal::Input, false), &generated);
    let result = run(&slice(Some(-2), None, None), range.into()).unwrap();
    assert_eq!(int_values(result), vec![8, 9]);
    assert_eq!(generated.get(), 10);
}

#[test]
fn test_slice_of_unbounded_sequence() {
    let unbounded = || {
        FieldRange::generate(None, Category::new(Traversal::Forward, false), |i| {
            Rc::new(SqInt::new(i as i64)) as FieldPtr
        })
    };
    let result = run(&slice(Some(5), Some(8), None), unbounded().into()).unwrap();
    assert_eq!(int_values(result), vec![5, 6, 7]);

    let result = run(&slice(None, Some(9), Some(4)), unbounded().into()).unwrap();
    assert_eq!(int_values(result), vec![0, 4, 8]);

    let err = run(&slice(Some(-1), None, None), unbounded().into()).unwrap_err();
    assert!(matches!(err, Error::OutOfRange(_)));
}

#[test]
fn test_negative_step_on_unbounded_bidirectional_is_out_of_range() {
    for sized in [false, true] {
        let range = FieldRange::generate(None, Category::new(Traversal::Bidirectional, sized), |i| {
            Rc::new(SqInt::new(i as i64)) as FieldPtr
        });
        let err = run(&slice(None, None, Some(-1)), range.into()).unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)), "sized {} gave {:?}", sized, err);
    }
}

#[test]
fn test_slice_step_zero() {
    let err = run(&slice(None, None, Some(0)), ints(3, RANDOM_ACCESS_SIZED).into()).unwrap_err();
    assert!(matches!(err, Error::OutOfRange(_)));
}

#[test]
fn test_extreme_bounds() {
    let cases = [
        slice(Some(i64::MIN), Some(i64::MAX), None),
        slice(Some(i64::MAX), Some(i64::MIN), Some(-1)),
        slice(Some(i64::MIN), None, Some(i64::MAX)),
        slice(None, None, Some(i64::MIN)),
        slice(Some(i64::MAX), None, Some(i64::MIN)),
    ];
    for spec in cases {
        let FilterSpec::Slice { start, stop, step } = spec else {
            unreachable!();
        };
        let result = run(&spec, ints(5, RANDOM_ACCESS_SIZED).into()).unwrap();
        assert_eq!(
            int_values(result),
            python_slice(5, start, stop, step),
            "[{}]",
            spec
        );
    }
}

// ============================================================================
// Element access
// ============================================================================

#[test]
fn test_element_access_matches_python_for_every_category() {
    for category in Category::ALL {
        for len in 0..5 {
            for index in -6..6 {
                let spec = FilterSpec::ElementAccess { index };
                let result = run(&spec, ints(len, category).into());
                match python_index(len as i64, index) {
                    Some(expected) => {
                        let result = result.unwrap();
                        assert!(!result.is_sequence());
                        assert_eq!(int_values(result), vec![expected]);
                    }
                    None => assert!(
                        matches!(result, Err(Error::OutOfRange(_))),
                        "[{}] on {} len {} gave {:?}",
                        index,
                        category,
                        len,
                        result
                    ),
                }
            }
        }
    }
}

#[test]
fn test_element_access_generates_one_element() {
    for category in Category::ALL {
        let generated = Rc::new(Cell::new(0));
        let range = counted_ints(50, category, &generated);
        let result = run(&FilterSpec::ElementAccess { index: 42 }, range.into()).unwrap();
        assert_eq!(int_values(result), vec![42]);
        assert_eq!(generated.get(), 1, "category {}", category);
    }

    let generated = Rc::new(Cell::new(0));
    let range = counted_ints(50, RANDOM_ACCESS_SIZED, &generated);
    let result = run(&FilterSpec::ElementAccess { index: -1 }, range.into()).unwrap();
    assert_eq!(int_values(result), vec![49]);
    assert_eq!(generated.get(), 1);
}

#[test]
fn test_element_access_out_of_range_message() {
    let err = run(
        &FilterSpec::ElementAccess { index: 3 },
        ints(3, RANDOM_ACCESS_SIZED).into(),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "array element access (\"[3]\"): out of range (size=3)"
    );
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_comparison_on_values() {
    let spec = FilterSpec::Comparison {
        member: None,
        op: ComparisonOperator::LessThan,
        value: Primitive::Int(3),
    };
    let result = run(&spec, ints(6, RANDOM_ACCESS_SIZED).into()).unwrap();
    assert_eq!(int_values(result), vec![0, 1, 2]);
}

#[test]
fn test_comparison_with_mismatched_type_keeps_nothing() {
    let spec = FilterSpec::Comparison {
        member: None,
        op: ComparisonOperator::Equals,
        value: Primitive::from("1"),
    };
    let result = run(&spec, ints(3, RANDOM_ACCESS_SIZED).into()).unwrap();
    assert!(int_values(result).is_empty());
}

#[test]
fn test_comparison_on_member() {
    let words: Vec<FieldPtr> = ["a", "abc", "ab", "abcd"]
        .into_iter()
        .map(|w| Rc::new(SqString::new(w)) as FieldPtr)
        .collect();
    let spec = FilterSpec::Comparison {
        member: Some("length".to_string()),
        op: ComparisonOperator::GreaterThanOrEqualTo,
        value: Primitive::Int(3),
    };
    let FieldResult::Sequence(range) = run(&spec, words.into()).unwrap() else {
        panic!("expected a sequence");
    };
    let kept: Vec<Primitive> = range
        .map(|f| f.unwrap().to_primitive().unwrap())
        .collect();
    assert_eq!(kept, vec![Primitive::from("abc"), Primitive::from("abcd")]);
}

#[test]
fn test_comparison_on_unknown_member_fails_when_consumed() {
    let spec = FilterSpec::Comparison {
        member: Some("nope".to_string()),
        op: ComparisonOperator::Equals,
        value: Primitive::Int(0),
    };
    let FieldResult::Sequence(mut range) = run(&spec, ints(3, RANDOM_ACCESS_SIZED).into()).unwrap()
    else {
        panic!("expected a sequence");
    };
    assert!(matches!(range.next(), Some(Err(Error::InvalidField { .. }))));
}

#[test]
fn test_comparison_on_sequence_member_is_not_a_scalar() {
    let log = new_log();
    let FieldResult::Sequence(list) = FakeField::root(&log)
        .get("list", &FieldCallParams::new())
        .unwrap()
    else {
        panic!("expected a sequence");
    };
    let spec = FilterSpec::Comparison {
        member: Some("list_inner".to_string()),
        op: ComparisonOperator::Equals,
        value: Primitive::Int(1),
    };
    let FieldResult::Sequence(mut range) = run(&spec, list.into()).unwrap() else {
        panic!("expected a sequence");
    };
    let err = range.next().unwrap().unwrap_err();
    assert!(matches!(err, Error::NotAScalar(_)));
    assert_eq!(
        err.to_string(),
        "comparison on field \"list_inner\" which is not a single value"
    );
}

#[test]
fn test_comparison_then_slice() {
    let spec = FilterSpec::Comparison {
        member: None,
        op: ComparisonOperator::GreaterThan,
        value: Primitive::Int(4),
    };
    let filtered = run(&spec, ints(10, RANDOM_ACCESS_SIZED).into()).unwrap();
    let result = run(&slice(Some(-2), None, None), filtered).unwrap();
    assert_eq!(int_values(result), vec![8, 9]);
}

// ============================================================================
// Single values
// ============================================================================

#[test]
fn test_list_filters_reject_single_values() {
    let specs = [
        FilterSpec::ElementAccess { index: 0 },
        slice(None, None, None),
        FilterSpec::Comparison {
            member: None,
            op: ComparisonOperator::Equals,
            value: Primitive::Int(1),
        },
    ];
    for spec in specs {
        let single = FieldResult::Single(Rc::new(SqInt::new(1)));
        let err = run(&spec, single).unwrap_err();
        assert!(matches!(err, Error::NotAnArray(_)), "[{}] gave {:?}", spec, err);
        assert_eq!(err.to_string(), "cannot apply array filter to non-array field");
    }
}

#[test]
fn test_no_filter_passes_through() {
    let single = FieldResult::Single(Rc::new(SqInt::new(7)));
    assert_eq!(int_values(run(&FilterSpec::None, single).unwrap()), vec![7]);
    let seq = ints(3, RANDOM_ACCESS_SIZED).into();
    assert_eq!(int_values(run(&FilterSpec::None, seq).unwrap()), vec![0, 1, 2]);
}
