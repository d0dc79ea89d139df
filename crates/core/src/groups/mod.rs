//! Group-scoped endpoints
//!
//! Each function maps onto exactly one remote endpoint and returns the
//! [`Request`](crate::request::Request) to send. Listing endpoints resolve
//! their parameters against a schema first; everything else only builds a
//! path.

pub mod issues;
pub mod merge_requests;

use crate::options::{OptionValue, Params};
use crate::paths::Id;

/// Body of a note or discussion
///
/// Most callers only send text, but the endpoints also accept extra fields
/// (`created_at`, `confidential`, ...), in which case the whole map is sent.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteBody {
    Text(String),
    Params(Params),
}

impl NoteBody {
    pub fn into_params(self) -> Params {
        match self {
            NoteBody::Text(text) => body_param(text),
            NoteBody::Params(params) => params,
        }
    }
}

impl From<&str> for NoteBody {
    fn from(value: &str) -> Self {
        NoteBody::Text(value.to_string())
    }
}

impl From<String> for NoteBody {
    fn from(value: String) -> Self {
        NoteBody::Text(value)
    }
}

impl From<Params> for NoteBody {
    fn from(value: Params) -> Self {
        NoteBody::Params(value)
    }
}

/// `{"body": text}`
fn body_param(text: impl Into<String>) -> Params {
    single_param("body", OptionValue::String(text.into()))
}

fn single_param(key: &str, value: OptionValue) -> Params {
    let mut params = Params::new();
    params.insert(key.to_string(), value);
    params
}

/// Canonical decimal ids that fit an `i64` go out as integers; anything
/// else (`"007"`, `"+7"`, overflowing digits, paths) is sent as a string.
fn id_value(id: &Id) -> OptionValue {
    match id.as_str().parse::<i64>() {
        Ok(n) if n.to_string() == id.as_str() => OptionValue::Integer(n),
        _ => OptionValue::String(id.to_string()),
    }
}
