use std::fmt;

use crate::value::Primitive;

/// Relational operator of a comparison filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// `>=`
    GreaterThanOrEqualTo,
    /// `>`
    GreaterThan,
    /// `<=`
    LessThanOrEqualTo,
    /// `<`
    LessThan,
    /// `==` or `=`
    Equals,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            ComparisonOperator::GreaterThanOrEqualTo => ">=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessThanOrEqualTo => "<=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::Equals => "==",
        };
        f.write_str(op)
    }
}

/// Filter applied to the result of a field access.
///
/// # Examples
/// ```text
/// ints(0, 10)          // None
/// ints(0, 10)[3]       // ElementAccess { index: 3 }
/// ints(0, 10)[-2:]     // Slice { start: Some(-2), stop: None, step: None }
/// ints(0, 10)[::-1]    // Slice { start: None, stop: None, step: Some(-1) }
/// ints(0, 10)[>= 5]    // Comparison { member: None, .. }
/// path.children[size > 0]
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FilterSpec {
    #[default]
    None,

    ElementAccess {
        index: i64,
    },

    /// Python style slice. `step` is never zero.
    Slice {
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    },

    Comparison {
        /// Field of each element to compare instead of the element itself
        member: Option<String>,
        op: ComparisonOperator,
        value: Primitive,
    },
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn bound(b: &Option<i64>) -> String {
            b.map(|v| v.to_string()).unwrap_or_default()
        }

        match self {
            FilterSpec::None => Ok(()),
            FilterSpec::ElementAccess { index } => write!(f, "{}", index),
            FilterSpec::Slice { start, stop, step } => {
                write!(f, "{}:{}", bound(start), bound(stop))?;
                if step.is_some() {
                    write!(f, ":{}", bound(step))?;
                }
                Ok(())
            }
            FilterSpec::Comparison { member, op, value } => {
                if let Some(member) = member {
                    write!(f, "{} ", member)?;
                }
                write!(f, "{} {}", op, value)
            }
        }
    }
}
