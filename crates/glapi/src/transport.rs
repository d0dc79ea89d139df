//! HTTP transport seam
//!
//! API handles only speak to a [`Transport`]. [`HttpTransport`] is the
//! reqwest-backed implementation; tests swap in an in-memory recorder.

use crate::config::{create_gitlab_client, GitlabConfig};
use crate::error::{Error, Result};
use glapi_core::options::{query_pairs, to_json, Params};
use glapi_core::request::{Method, Request};
use serde_json::Value;

/// Performs the network call for a resolved request.
///
/// Implementations raise [`Error::Api`] on non-success statuses and
/// [`Error::Network`] when the request could not be sent.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &Params) -> Result<Value>;

    async fn post(&self, path: &str, body: &Params) -> Result<Value>;

    async fn put(&self, path: &str, body: &Params) -> Result<Value>;

    async fn delete(&self, path: &str, query: &Params) -> Result<Value>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        (**self).get(path, query).await
    }

    async fn post(&self, path: &str, body: &Params) -> Result<Value> {
        (**self).post(path, body).await
    }

    async fn put(&self, path: &str, body: &Params) -> Result<Value> {
        (**self).put(path, body).await
    }

    async fn delete(&self, path: &str, query: &Params) -> Result<Value> {
        (**self).delete(path, query).await
    }
}

/// Dispatch a [`Request`] to the matching transport method.
pub async fn execute<T: Transport + ?Sized>(transport: &T, request: Request) -> Result<Value> {
    let Request {
        method,
        path,
        params,
    } = request;
    log::trace!("{} {} with {:?}", method, path, params);

    match method {
        Method::Get => transport.get(&path, &params).await,
        Method::Post => transport.post(&path, &params).await,
        Method::Put => transport.put(&path, &params).await,
        Method::Delete => transport.delete(&path, &params).await,
    }
}

/// Transport talking to a GitLab instance over HTTP
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &GitlabConfig) -> Result<Self> {
        Ok(Self {
            client: create_gitlab_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, method: Method, path: &str, params: &Params) -> Result<Value> {
        let url = endpoint_url(&self.base_url, path);
        log::debug!("{} {}", method, url);

        let builder = match method {
            Method::Get => self.client.get(&url).query(&query_pairs(params)),
            Method::Delete => self.client.delete(&url).query(&query_pairs(params)),
            Method::Post => self.client.post(&url).json(&to_json(params)),
            Method::Put => self.client.put(&url).json(&to_json(params)),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to send request to GitLab: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::debug!("{} {} failed with {}", method, url, status);
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read GitLab response: {}", e)))?;

        decode_body(&text)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        self.send(Method::Get, path, query).await
    }

    async fn post(&self, path: &str, body: &Params) -> Result<Value> {
        self.send(Method::Post, path, body).await
    }

    async fn put(&self, path: &str, body: &Params) -> Result<Value> {
        self.send(Method::Put, path, body).await
    }

    async fn delete(&self, path: &str, query: &Params) -> Result<Value> {
        self.send(Method::Delete, path, query).await
    }
}

/// Join the base URL and an API path.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Decode a response body; `DELETE` and some `POST` endpoints return nothing.
pub fn decode_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| Error::Decode(e.to_string()))
}
