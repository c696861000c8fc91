use std::cmp::Ordering;
use std::fmt;

use crate::ast::ComparisonOperator;
use crate::error::{Error, Result};

/// A primitive value produced by a system object or written in a query.
///
/// Primitives are the leaves of every result tree. They are also the values
/// that can be passed as field call parameters and compared against in
/// comparison filters.
///
/// # Conversions
///
/// The only implicit conversion is the widening of an integer into a float:
///
/// ```
/// use sq_lang::Primitive;
///
/// let value = Primitive::Int(3);
/// assert_eq!(value.convert::<f64>().unwrap(), 3.0);
/// assert!(value.convert::<String>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Primitive {
    /// JSON null
    Null,

    /// Boolean (`true`/`false`)
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point number
    Float(f64),

    /// UTF-8 string
    String(String),
}

impl Primitive {
    /// Name of the variant, as used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Null => <() as PrimitiveType>::TYPE_NAME,
            Primitive::Bool(_) => <bool as PrimitiveType>::TYPE_NAME,
            Primitive::Int(_) => <i64 as PrimitiveType>::TYPE_NAME,
            Primitive::Float(_) => <f64 as PrimitiveType>::TYPE_NAME,
            Primitive::String(_) => <String as PrimitiveType>::TYPE_NAME,
        }
    }

    /// Extract a value of type `T`, applying the int to float widening.
    pub fn convert<T: PrimitiveType>(&self) -> Result<T> {
        T::from_primitive(self)
    }

    /// Evaluate `self <op> rhs`.
    ///
    /// Integers and floats compare numerically. Other values only compare
    /// with values of the same variant; mismatched variants satisfy no
    /// operator.
    pub fn compare(&self, op: ComparisonOperator, rhs: &Primitive) -> bool {
        let ordering = match (self, rhs) {
            (Primitive::Int(l), Primitive::Float(r)) => (*l as f64).partial_cmp(r),
            (Primitive::Float(l), Primitive::Int(r)) => l.partial_cmp(&(*r as f64)),
            (l, r) if std::mem::discriminant(l) == std::mem::discriminant(r) => l.partial_cmp(r),
            _ => None,
        };

        match ordering {
            Some(ordering) => op.accepts(ordering),
            None => false,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Null => write!(f, "null"),
            Primitive::Bool(b) => write!(f, "{}", b),
            Primitive::Int(n) => write!(f, "{}", n),
            Primitive::Float(n) => write!(f, "{:?}", n),
            Primitive::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::Int(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Float(value)
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_string())
    }
}

/// Rust types that correspond to a [`Primitive`] variant.
pub trait PrimitiveType: Sized {
    /// Name used in diagnostics (`PrimitiveInt`, `PrimitiveString`, ...).
    const TYPE_NAME: &'static str;

    fn from_primitive(value: &Primitive) -> Result<Self>;
}

fn invalid_conversion<T: PrimitiveType>(value: &Primitive) -> Error {
    Error::InvalidConversion {
        from: value.type_name(),
        to: T::TYPE_NAME,
    }
}

impl PrimitiveType for String {
    const TYPE_NAME: &'static str = "PrimitiveString";

    fn from_primitive(value: &Primitive) -> Result<Self> {
        match value {
            Primitive::String(s) => Ok(s.clone()),
            _ => Err(invalid_conversion::<Self>(value)),
        }
    }
}

impl PrimitiveType for i64 {
    const TYPE_NAME: &'static str = "PrimitiveInt";

    fn from_primitive(value: &Primitive) -> Result<Self> {
        match value {
            Primitive::Int(n) => Ok(*n),
            _ => Err(invalid_conversion::<Self>(value)),
        }
    }
}

impl PrimitiveType for f64 {
    const TYPE_NAME: &'static str = "PrimitiveFloat";

    fn from_primitive(value: &Primitive) -> Result<Self> {
        match value {
            Primitive::Float(n) => Ok(*n),
            Primitive::Int(n) => Ok(*n as f64),
            _ => Err(invalid_conversion::<Self>(value)),
        }
    }
}

impl PrimitiveType for bool {
    const TYPE_NAME: &'static str = "PrimitiveBool";

    fn from_primitive(value: &Primitive) -> Result<Self> {
        match value {
            Primitive::Bool(b) => Ok(*b),
            _ => Err(invalid_conversion::<Self>(value)),
        }
    }
}

impl PrimitiveType for () {
    const TYPE_NAME: &'static str = "PrimitiveNull";

    fn from_primitive(value: &Primitive) -> Result<Self> {
        match value {
            Primitive::Null => Ok(()),
            _ => Err(invalid_conversion::<Self>(value)),
        }
    }
}

impl ComparisonOperator {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            ComparisonOperator::LessThan => ordering == Ordering::Less,
            ComparisonOperator::LessThanOrEqualTo => ordering != Ordering::Greater,
            ComparisonOperator::GreaterThan => ordering == Ordering::Greater,
            ComparisonOperator::GreaterThanOrEqualTo => ordering != Ordering::Less,
            ComparisonOperator::Equals => ordering == Ordering::Equal,
        }
    }
}
