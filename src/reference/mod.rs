//! Back-reference tokens and the parameter value model.
//!
//! A node may consume the output of the node immediately before it in the
//! chain. That dependency travels inside parameter values as a single
//! embedded token of the form `{{$node('NAME')PATH}}`, where `PATH` is an
//! arbitrary output-path expression that must survive every rewrite
//! byte-for-byte.
//!
//! Parameter values are modeled as a tagged union rather than raw strings:
//! a string either parses as a complete token (and becomes a
//! [`ParamValue::Reference`]) or it is an opaque literal. Strings that only
//! partially resemble the grammar are never rewritten.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opening delimiter of an embedded token.
pub const TOKEN_OPEN: &str = "{{";
/// Closing delimiter of an embedded token.
pub const TOKEN_CLOSE: &str = "}}";
/// Marker introducing the quoted node name inside the delimiters.
const NODE_MARKER: &str = "$node('";
/// Quote-and-parenthesis sequence terminating the node name.
const NAME_END: &str = "')";

/// Output path used when a parameter is auto-populated at insert time.
pub const DEFAULT_OUTPUT_PATH: &str = ".output";

/// Parses a complete back-reference token, returning the referenced node
/// name and the untouched path suffix.
///
/// The entire string must match: delimiters at both ends, the node marker
/// immediately inside, and a quoted name. Anything else returns `None` and
/// is treated as ordinary literal text.
pub fn parse_reference(raw: &str) -> Option<(&str, &str)> {
    let inner = raw.strip_prefix(TOKEN_OPEN)?.strip_suffix(TOKEN_CLOSE)?;
    let rest = inner.strip_prefix(NODE_MARKER)?;
    let name_end = rest.find(NAME_END)?;
    Some((&rest[..name_end], &rest[name_end + NAME_END.len()..]))
}

/// Renders a node name and output path back into the token wire form.
pub fn render_reference(node: &str, path: &str) -> String {
    format!("{}{}{}{}{}{}", TOKEN_OPEN, NODE_MARKER, node, NAME_END, path, TOKEN_CLOSE)
}

/// A literal parameter value: a scalar, a list, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<LiteralValue>),
}

impl LiteralValue {
    /// Converts a JSON value into a literal. Objects are not part of the
    /// parameter model and collapse to `Null`.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null | serde_json::Value::Object(_) => LiteralValue::Null,
            serde_json::Value::Bool(b) => LiteralValue::Bool(b),
            serde_json::Value::Number(n) => LiteralValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => LiteralValue::String(s),
            serde_json::Value::Array(items) => {
                LiteralValue::List(items.into_iter().map(LiteralValue::from_json).collect())
            }
        }
    }

    /// Converts the literal back into a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            LiteralValue::Null => serde_json::Value::Null,
            LiteralValue::Bool(b) => serde_json::Value::Bool(*b),
            LiteralValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            LiteralValue::String(s) => serde_json::Value::String(s.clone()),
            LiteralValue::List(items) => {
                serde_json::Value::Array(items.iter().map(LiteralValue::to_json).collect())
            }
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "null"),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            LiteralValue::String(s) => write!(f, "\"{}\"", s),
            LiteralValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

/// One parameter value: either an opaque literal or a back-reference to the
/// predecessor's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Literal(LiteralValue),
    Reference { node: String, path: String },
}

impl ParamValue {
    /// Builds a reference value pointing at `node` with the given path.
    pub fn reference(node: &str, path: &str) -> Self {
        ParamValue::Reference {
            node: node.to_string(),
            path: path.to_string(),
        }
    }

    /// Converts a JSON wire value into a parameter value. A string that is
    /// exactly one well-formed token becomes a `Reference`; everything else
    /// stays literal.
    pub fn from_json(value: serde_json::Value) -> Self {
        if let serde_json::Value::String(raw) = &value {
            if let Some((node, path)) = parse_reference(raw) {
                return ParamValue::reference(node, path);
            }
        }
        ParamValue::Literal(LiteralValue::from_json(value))
    }

    /// Converts the parameter value into its JSON wire form. References
    /// serialize as their single-string token, verbatim.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ParamValue::Literal(lit) => lit.to_json(),
            ParamValue::Reference { node, path } => {
                serde_json::Value::String(render_reference(node, path))
            }
        }
    }

    /// Returns the referenced node name, if this value is a reference.
    pub fn referenced_node(&self) -> Option<&str> {
        match self {
            ParamValue::Reference { node, .. } => Some(node),
            ParamValue::Literal(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Literal(lit) => write!(f, "{}", lit),
            ParamValue::Reference { node, path } => write!(f, "{}", render_reference(node, path)),
        }
    }
}

/// Repoints every reference value in `parameters` at `new_previous`,
/// preserving each output path untouched.
///
/// Literal values pass through unchanged, so the operation is idempotent
/// and safe to run on any committed parameter map.
pub fn rewrite_references(parameters: &mut AHashMap<String, ParamValue>, new_previous: &str) {
    for value in parameters.values_mut() {
        if let ParamValue::Reference { node, .. } = value {
            if node != new_previous {
                *node = new_previous.to_string();
            }
        }
    }
}
