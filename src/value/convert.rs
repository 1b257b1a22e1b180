//! Conversions between [`NodeRef`] and [`Value`] types.

use super::{Number, TaggedValue, Value};
use crate::error::{Error, Result};
use crate::node_ref::NodeRef;
use indexmap::IndexMap;

impl Value {
    /// Creates an owned [`Value`] from a borrowed [`NodeRef`].
    ///
    /// This walks the node tree recursively and converts it to a pure Rust
    /// `Value`, copying all scalar and structural data out of libfyaml's
    /// buffers. Scalar type inference (null, bool, number, string) follows
    /// the same rules as [`ValueRef`](crate::ValueRef).
    ///
    /// # Example
    ///
    /// ```
    /// use fyaml::Document;
    /// use fyaml::value::Value;
    ///
    /// let doc = Document::parse_str("foo: 42").unwrap();
    /// let value = Value::from_node_ref(doc.root().unwrap()).unwrap();
    /// assert!(value.is_mapping());
    /// ```
    pub fn from_node_ref(node: NodeRef<'_>) -> Result<Value> {
        let tag = node.tag_str()?.map(|t| t.to_string());

        let value = if node.is_scalar() {
            infer_scalar_type(node.scalar_str()?)
        } else if node.is_sequence() {
            let mut items = Vec::new();
            for item in node.seq_iter() {
                items.push(Self::from_node_ref(item)?);
            }
            Value::Sequence(items)
        } else if node.is_mapping() {
            let mut map = IndexMap::new();
            for (key_node, value_node) in node.map_iter() {
                let key = Self::from_node_ref(key_node)?;
                let value = Self::from_node_ref(value_node)?;
                map.insert(key, value);
            }
            Value::Mapping(map)
        } else {
            return Err(Error::TypeMismatch {
                expected: "scalar, sequence or mapping",
                got: "unknown node kind",
            });
        };

        match tag {
            Some(t) => Ok(Value::Tagged(Box::new(TaggedValue { tag: t, value }))),
            None => Ok(value),
        }
    }
}

/// Infers the type of a YAML scalar value.
///
/// YAML scalars can represent null, bool, numbers, or strings.
/// This follows YAML 1.1/1.2 core schema conventions.
fn infer_scalar_type(s: &str) -> Value {
    // Check for null
    if is_null(s) {
        return Value::Null;
    }

    // Check for boolean
    if let Some(b) = parse_bool(s) {
        return Value::Bool(b);
    }

    // Check for integer (including hex, octal, binary)
    if let Some(n) = parse_integer(s) {
        return Value::Number(n);
    }

    // Check for float (including special values)
    if let Some(n) = parse_float(s) {
        return Value::Number(n);
    }

    // Default to string
    Value::String(s.to_string())
}

fn is_null(s: &str) -> bool {
    matches!(
        s.to_lowercase().as_str(),
        "" | "~" | "null" | "Null" | "NULL"
    ) || s == "~"
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Some(true),
        "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => Some(false),
        _ => None,
    }
}

fn parse_integer(s: &str) -> Option<Number> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Handle sign
    let (neg, s) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    };

    // Try different bases
    let result = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        i64::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2).ok()
    } else {
        s.parse::<i64>().ok()
    };

    result.map(|n| {
        let n = if neg { -n } else { n };
        if n >= 0 {
            Number::UInt(n as u64)
        } else {
            Number::Int(n)
        }
    })
}

fn parse_float(s: &str) -> Option<Number> {
    let s_lower = s.to_lowercase();

    // Special float values
    match s_lower.as_str() {
        ".inf" | "+.inf" => return Some(Number::Float(f64::INFINITY)),
        "-.inf" => return Some(Number::Float(f64::NEG_INFINITY)),
        ".nan" => return Some(Number::Float(f64::NAN)),
        _ => {}
    }

    // Regular float
    // Must contain a decimal point or exponent to be considered a float
    if s.contains('.') || s.to_lowercase().contains('e') {
        if let Ok(f) = s.parse::<f64>() {
            return Some(Number::Float(f));
        }
    }

    None
}
