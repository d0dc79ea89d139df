//! Transport-agnostic request descriptions
//!
//! Endpoint builders return a [`Request`] rather than performing I/O, so the
//! exact method, path and parameters of every call can be asserted on
//! without a network.

use crate::options::Params;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A single API call: parameters are sent as the query string for
/// `GET`/`DELETE` and as a JSON body for `POST`/`PUT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Params,
}

impl Request {
    pub fn get(path: impl Into<String>, query: Params) -> Self {
        Self::new(Method::Get, path, query)
    }

    pub fn post(path: impl Into<String>, body: Params) -> Self {
        Self::new(Method::Post, path, body)
    }

    pub fn put(path: impl Into<String>, body: Params) -> Self {
        Self::new(Method::Put, path, body)
    }

    pub fn delete(path: impl Into<String>, query: Params) -> Self {
        Self::new(Method::Delete, path, query)
    }

    fn new(method: Method, path: impl Into<String>, params: Params) -> Self {
        Self {
            method,
            path: path.into(),
            params,
        }
    }
}
