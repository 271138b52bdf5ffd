//! Opaque log message values.
//!
//! A message may be ordinary text or a structured payload. Its string form
//! is only produced when a caller asks for it, preserving the laziness
//! contract of the producing logger: a message that is never inspected is
//! never stringified.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::Value;

/// The message attached to a captured log event.
///
/// Equality is structural: two text messages are equal iff their strings are
/// equal, two structured messages iff their values are equal, and the two
/// variants never compare equal to one another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Plain text, the common case.
    Text(String),
    /// A structured payload; its string form is the JSON rendering.
    Structured(Value),
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Structured(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl Hash for Message {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Text(text) => {
                state.write_u8(0);
                text.hash(state);
            }
            Self::Structured(value) => {
                state.write_u8(1);
                hash_value(value, state);
            }
        }
    }
}

/// Hash a JSON value structurally.
///
/// Objects combine entry hashes with XOR so that maps which compare equal
/// regardless of key insertion order also hash equally.
fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => state.write_u8(0),
        Value::Bool(flag) => {
            state.write_u8(1);
            flag.hash(state);
        }
        Value::Number(number) => {
            state.write_u8(2);
            number.to_string().hash(state);
        }
        Value::String(text) => {
            state.write_u8(3);
            text.hash(state);
        }
        Value::Array(items) => {
            state.write_u8(4);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(entries) => {
            state.write_u8(5);
            state.write_usize(entries.len());
            let mut combined = 0u64;
            for (key, entry) in entries {
                let mut entry_state = DefaultHasher::new();
                key.hash(&mut entry_state);
                hash_value(entry, &mut entry_state);
                combined ^= entry_state.finish();
            }
            state.write_u64(combined);
        }
    }
}
