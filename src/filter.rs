//! List filters applied to the result of a field access.
//!
//! Filtering runs in two steps. [`Filter::transform_for_requirements`]
//! looks at the capabilities of a sequence and copies it into memory only
//! when the filter cannot run on it as it is (for example a negative index
//! on a single pass sequence). [`Filter::apply`] then does the filtering,
//! lazily where possible.

use crate::ast::{ComparisonOperator, FieldCallParams, FilterSpec};
use crate::error::{Error, Result};
use crate::field::{FieldPtr, FieldResult};
use crate::range::FieldRange;
use crate::value::Primitive;

pub trait Filter {
    /// Make sure `result` has the capabilities the filter needs,
    /// materializing it if it does not.
    fn transform_for_requirements(&self, result: FieldResult) -> Result<FieldResult>;

    fn apply(&self, result: FieldResult) -> Result<FieldResult>;
}

/// Build the filter described by `spec`.
pub fn create(spec: &FilterSpec) -> Box<dyn Filter> {
    match spec {
        FilterSpec::None => Box::new(NoFilter),
        FilterSpec::ElementAccess { index } => Box::new(ElementAccess { index: *index }),
        FilterSpec::Slice { start, stop, step } => Box::new(Slice {
            start: *start,
            stop: *stop,
            step: *step,
        }),
        FilterSpec::Comparison { member, op, value } => Box::new(Comparison {
            member: member.clone(),
            op: *op,
            value: value.clone(),
        }),
    }
}

fn expect_sequence(result: FieldResult) -> Result<FieldRange> {
    match result {
        FieldResult::Sequence(range) => Ok(range),
        FieldResult::Single(_) => Err(Error::not_an_array()),
    }
}

/// Materialize `range` unless `satisfied` holds.
fn require(range: FieldRange, satisfied: bool) -> Result<FieldResult> {
    if satisfied {
        Ok(range.into())
    } else {
        Ok(range.materialize()?.into())
    }
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

struct NoFilter;

impl Filter for NoFilter {
    fn transform_for_requirements(&self, result: FieldResult) -> Result<FieldResult> {
        Ok(result)
    }

    fn apply(&self, result: FieldResult) -> Result<FieldResult> {
        Ok(result)
    }
}

/// `[i]`: a single element, counting from the back when `i` is negative.
struct ElementAccess {
    index: i64,
}

impl ElementAccess {
    fn out_of_range(&self, size: Option<usize>) -> Error {
        let mut message = format!("array element access (\"[{}]\"): out of range", self.index);
        if let Some(size) = size {
            message.push_str(&format!(" (size={})", size));
        }
        Error::out_of_range(message)
    }
}

impl Filter for ElementAccess {
    fn transform_for_requirements(&self, result: FieldResult) -> Result<FieldResult> {
        let range = expect_sequence(result)?;
        let satisfied = self.index >= 0 || range.category().has_len();
        require(range, satisfied)
    }

    fn apply(&self, result: FieldResult) -> Result<FieldResult> {
        let mut range = expect_sequence(result)?;

        let size = if range.category().has_len() && !range.is_unbounded() {
            Some(range.len()?)
        } else {
            None
        };

        let index = if self.index >= 0 {
            to_usize(self.index)
        } else {
            let size = match size {
                Some(size) => size,
                None => range.len()?,
            };
            let from_front = to_i64(size) + self.index;
            if from_front < 0 {
                return Err(self.out_of_range(Some(size)));
            }
            to_usize(from_front)
        };

        if size.is_some_and(|size| index >= size) {
            return Err(self.out_of_range(size));
        }
        match range.nth_field(index)? {
            Some(field) => Ok(FieldResult::Single(field)),
            None => Err(self.out_of_range(size)),
        }
    }
}

/// `[start:stop:step]` with the semantics of Python slices.
struct Slice {
    start: Option<i64>,
    stop: Option<i64>,
    step: Option<i64>,
}

impl Filter for Slice {
    fn transform_for_requirements(&self, result: FieldResult) -> Result<FieldResult> {
        let range = expect_sequence(result)?;
        let category = range.category();
        let satisfied = if self.step.unwrap_or(1) < 0 {
            category.is_bidirectional() && !range.is_unbounded()
        } else if self.start.unwrap_or(0) < 0 || self.stop.unwrap_or(0) < 0 {
            category.has_len()
        } else {
            true
        };
        require(range, satisfied)
    }

    fn apply(&self, result: FieldResult) -> Result<FieldResult> {
        let range = expect_sequence(result)?;
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(Error::out_of_range("slice step cannot be zero"));
        }

        let sliced = if step > 0 {
            let start = self.start.unwrap_or(0);
            match self.stop {
                Some(stop) if start < 0 || stop < 0 => {
                    mixed_index_pos_step(range, start, stop, step)?
                }
                Some(stop) => pos_index_pos_step(range, start, stop, step)?,
                None if start < 0 => neg_index_no_stop_pos_step(range, start, step)?,
                None => pos_index_no_stop_pos_step(range, start, step)?,
            }
        } else {
            let start = self.start.unwrap_or(-1);
            match self.stop {
                Some(stop) if start >= 0 && stop >= 0 => {
                    pos_index_neg_step(range, start, stop, step)?
                }
                Some(stop) if start >= 0 || stop >= 0 => {
                    mixed_index_neg_step(range, start, stop, step)?
                }
                Some(stop) => neg_index_neg_step(range, start, stop, step)?,
                None if start >= 0 => pos_index_no_stop_neg_step(range, start, step)?,
                None => neg_index_no_stop_neg_step(range, start, step)?,
            }
        };
        Ok(sliced.into())
    }
}

fn pos_index_pos_step(range: FieldRange, start: i64, stop: i64, step: i64) -> Result<FieldRange> {
    let stop = stop.max(start);
    range
        .drop_front(to_usize(start))
        .take_front(to_usize(stop - start))
        .stride(to_usize(step))
}

fn pos_index_no_stop_pos_step(range: FieldRange, start: i64, step: i64) -> Result<FieldRange> {
    range.drop_front(to_usize(start)).stride(to_usize(step))
}

fn mixed_index_pos_step(range: FieldRange, start: i64, stop: i64, step: i64) -> Result<FieldRange> {
    let size = to_i64(range.len()?);
    let mut start = start;
    let mut stop = stop;
    if start < 0 {
        start = (start + size).max(0);
    }
    if stop < 0 {
        stop += size;
        if stop < 0 {
            stop = start;
        }
    }
    pos_index_pos_step(range, start, stop, step)
}

fn neg_index_no_stop_pos_step(range: FieldRange, start: i64, step: i64) -> Result<FieldRange> {
    let size = to_i64(range.len()?);
    let start = (start + size).max(0);
    pos_index_no_stop_pos_step(range, start, step)
}

fn neg_index_neg_step(range: FieldRange, start: i64, stop: i64, step: i64) -> Result<FieldRange> {
    pos_index_pos_step(range.reversed()?, -(start + 1), -(stop + 1), step.saturating_neg())
}

fn neg_index_no_stop_neg_step(range: FieldRange, start: i64, step: i64) -> Result<FieldRange> {
    pos_index_no_stop_pos_step(range.reversed()?, -(start + 1), step.saturating_neg())
}

fn mixed_index_neg_step(range: FieldRange, start: i64, stop: i64, step: i64) -> Result<FieldRange> {
    let size = to_i64(range.len()?);
    let mut start = start;
    let mut stop = stop;
    if start >= 0 {
        start -= size;
        if start >= 0 {
            start = -1;
        }
    }
    if stop >= 0 {
        stop -= size;
        if stop >= 0 {
            stop = start;
        }
    }
    neg_index_neg_step(range, start, stop, step)
}

fn pos_index_neg_step(range: FieldRange, start: i64, stop: i64, step: i64) -> Result<FieldRange> {
    let stop = stop.min(start);
    range
        .drop_front(to_usize(stop.saturating_add(1)))
        .take_front(to_usize(start - stop))
        .reversed()?
        .stride(to_usize(step.saturating_neg()))
}

fn pos_index_no_stop_neg_step(range: FieldRange, start: i64, step: i64) -> Result<FieldRange> {
    range
        .take_front(to_usize(start.saturating_add(1)))
        .reversed()?
        .stride(to_usize(step.saturating_neg()))
}

/// `[member? op value]`: keeps the elements whose value (or whose
/// `member` field's value) satisfies the comparison.
struct Comparison {
    member: Option<String>,
    op: ComparisonOperator,
    value: Primitive,
}

impl Filter for Comparison {
    fn transform_for_requirements(&self, result: FieldResult) -> Result<FieldResult> {
        Ok(expect_sequence(result)?.into())
    }

    fn apply(&self, result: FieldResult) -> Result<FieldResult> {
        let range = expect_sequence(result)?;
        let member = self.member.clone();
        let op = self.op;
        let value = self.value.clone();
        let params = FieldCallParams::new();

        let filtered = range.retain(move |field: &FieldPtr| {
            let lhs = match &member {
                None => field.to_primitive()?,
                Some(name) => match field.get(name, &params)? {
                    FieldResult::Single(member_field) => member_field.to_primitive()?,
                    FieldResult::Sequence(_) => {
                        return Err(Error::NotAScalar(format!(
                            "comparison on field \"{}\" which is not a single value",
                            name
                        )));
                    }
                },
            };
            Ok(lhs.compare(op, &value))
        });
        Ok(filtered.into())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::range::{Category, Traversal};
    use crate::system::SqInt;

    fn ints(len: usize, category: Category) -> FieldResult {
        FieldRange::generate(Some(len), category, |i| Rc::new(SqInt::new(i as i64)) as FieldPtr)
            .into()
    }

    fn run(spec: &FilterSpec, result: FieldResult) -> Result<FieldResult> {
        let filter = create(spec);
        let result = filter.transform_for_requirements(result)?;
        filter.apply(result)
    }

    fn values(result: FieldResult) -> Vec<Primitive> {
        match result {
            FieldResult::Sequence(range) => range
                .map(|f| f.unwrap().to_primitive().unwrap())
                .collect(),
            FieldResult::Single(field) => vec![field.to_primitive().unwrap()],
        }
    }

    #[test]
    fn test_negative_step_on_input_materializes() {
        let spec = FilterSpec::Slice {
            start: None,
            stop: None,
            step: Some(-2),
        };
        let result = run(&spec, ints(5, Category::new(Traversal::Input, false))).unwrap();
        assert_eq!(
            values(result),
            vec![Primitive::Int(4), Primitive::Int(2), Primitive::Int(0)]
        );
    }

    #[test]
    fn test_zero_step_is_out_of_range() {
        let spec = FilterSpec::Slice {
            start: None,
            stop: None,
            step: Some(0),
        };
        let err = run(&spec, ints(5, Category::new(Traversal::RandomAccess, true))).unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)));
    }

    #[test]
    fn test_element_access_message() {
        let spec = FilterSpec::ElementAccess { index: -6 };
        let err = run(&spec, ints(5, Category::new(Traversal::Forward, false))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "array element access (\"[-6]\"): out of range (size=5)"
        );

        let spec = FilterSpec::ElementAccess { index: 5 };
        let err = run(&spec, ints(5, Category::new(Traversal::Input, false))).unwrap_err();
        assert_eq!(err.to_string(), "array element access (\"[5]\"): out of range");
    }

    #[test]
    fn test_comparison_is_lazy_input() {
        let spec = FilterSpec::Comparison {
            member: None,
            op: ComparisonOperator::GreaterThanOrEqualTo,
            value: Primitive::Float(2.5),
        };
        let result = run(&spec, ints(5, Category::new(Traversal::RandomAccess, true))).unwrap();
        let FieldResult::Sequence(range) = result else {
            panic!("expected a sequence");
        };
        assert_eq!(range.category(), Category::new(Traversal::Input, false));
        assert_eq!(
            values(range.into()),
            vec![Primitive::Int(3), Primitive::Int(4)]
        );
    }
}
