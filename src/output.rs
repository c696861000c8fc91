//! JSON output for result trees.
//!
//! This module provides JSON serialization with support for both compact and
//! pretty-printed output formats. Object members keep the order in which the
//! query named them.
//!
//! # Features
//!
//! - **Compact output** via [`to_json()`] - no whitespace at all
//! - **Pretty output** via [`to_json_pretty()`] - 2-space indentation
//! - **Float marking** - floats always carry a `.` or an exponent, so `2.0`
//!   is never printed as `2`
//! - **Non-finite floats** - `NaN` and infinities are written as `null`
//!
//! # Examples
//!
//! ```
//! use sq_lang::output::{to_json, to_json_pretty};
//! use sq_lang::results::{Data, ResultTree};
//! use sq_lang::Primitive;
//!
//! let tree = ResultTree::new(Data::Object(vec![
//!     ("b".to_string(), Primitive::Int(1).into()),
//!     ("a".to_string(), Primitive::Float(2.0).into()),
//! ]));
//!
//! assert_eq!(to_json(&tree), r#"{"b":1,"a":2.0}"#);
//! assert_eq!(to_json_pretty(&tree), "{\n  \"b\": 1,\n  \"a\": 2.0\n}");
//! ```

use std::fmt::Write;

use crate::results::{Data, ResultTree};
use crate::value::Primitive;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, tree: &ResultTree) -> String {
        let mut out = String::new();
        self.print_data(&tree.data, 0, &mut out);
        out
    }

    fn print_data(&self, data: &Data, indent: usize, out: &mut String) {
        match data {
            Data::Primitive(value) => print_primitive(value, out),
            Data::Array(items) => {
                self.print_container(out, indent, '[', ']', items, |item, indent, out| {
                    self.print_data(&item.data, indent, out)
                })
            }
            Data::Object(members) => {
                self.print_container(out, indent, '{', '}', members, |(key, value), indent, out| {
                    print_string(key, out);
                    out.push(':');
                    if self.pretty {
                        out.push(' ');
                    }
                    self.print_data(&value.data, indent, out);
                })
            }
        }
    }

    fn print_container<T>(
        &self,
        out: &mut String,
        indent: usize,
        open: char,
        close: char,
        items: &[T],
        mut print_item: impl FnMut(&T, usize, &mut String),
    ) {
        out.push(open);
        if items.is_empty() {
            out.push(close);
            return;
        }
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if self.pretty {
                out.push('\n');
                out.push_str(&"  ".repeat(indent + 1));
            }
            print_item(item, indent + 1, out);
        }
        if self.pretty {
            out.push('\n');
            out.push_str(&"  ".repeat(indent));
        }
        out.push(close);
    }
}

fn print_primitive(value: &Primitive, out: &mut String) {
    match value {
        Primitive::Null => out.push_str("null"),
        Primitive::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Primitive::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        Primitive::Float(n) if n.is_finite() => {
            // Debug formatting keeps a `.0` on whole numbers
            let _ = write!(out, "{:?}", n);
        }
        Primitive::Float(_) => out.push_str("null"),
        Primitive::String(s) => print_string(s, out),
    }
}

fn print_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{20}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Converts a result tree to compact JSON.
pub fn to_json(tree: &ResultTree) -> String {
    JsonPrinter::new(false).print(tree)
}

/// Converts a result tree to JSON with one element or member per line.
pub fn to_json_pretty(tree: &ResultTree) -> String {
    JsonPrinter::new(true).print(tree)
}
