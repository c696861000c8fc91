//! Result tree to `serde_json::Value` conversion.

use crate::results::{Data, ResultTree};
use crate::value::Primitive;

impl From<Primitive> for serde_json::Value {
    fn from(value: Primitive) -> Self {
        match value {
            Primitive::Null => serde_json::Value::Null,
            Primitive::Bool(b) => serde_json::Value::Bool(b),
            Primitive::Int(i) => serde_json::Value::Number(i.into()),
            Primitive::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Primitive::String(s) => serde_json::Value::String(s),
        }
    }
}

/// Object members keep their query order.
impl From<ResultTree> for serde_json::Value {
    fn from(tree: ResultTree) -> Self {
        match tree.data {
            Data::Primitive(value) => value.into(),
            Data::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Data::Object(members) => serde_json::Value::Object(
                members
                    .into_iter()
                    .map(|(key, value)| (key, serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}
