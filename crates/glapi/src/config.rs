use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};

/// GitLab configuration from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct GitlabConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl GitlabConfig {
    /// Default GitLab API base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://gitlab.com/api/v4";

    /// Load configuration from environment variables
    /// Uses GITLAB_URL with default fallback
    /// Uses GITLAB_TOKEN if set; anonymous requests only see public groups
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var("GITLAB_URL").ok(),
            std::env::var("GITLAB_TOKEN").ok(),
        )
    }

    pub fn from_values(base_url: Option<String>, token: Option<String>) -> Result<Self> {
        let base_url = base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "GITLAB_URL must start with http:// or https://, got {}",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Load configuration with CLI values taking precedence over the environment
    pub fn with_overrides(base_url: Option<String>, token: Option<String>) -> Result<Self> {
        Self::layered(
            (std::env::var("GITLAB_URL").ok(), std::env::var("GITLAB_TOKEN").ok()),
            (base_url, token),
        )
    }

    /// Only the merged values are validated; a bad environment URL is fine
    /// when an override replaces it.
    fn layered(
        env: (Option<String>, Option<String>),
        overrides: (Option<String>, Option<String>),
    ) -> Result<Self> {
        Self::from_values(
            non_empty(overrides.0).or(non_empty(env.0)),
            non_empty(overrides.1).or(non_empty(env.1)),
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Create an HTTP client sending the private token on every request
pub fn create_gitlab_client(config: &GitlabConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("glapi/", env!("CARGO_PKG_VERSION"))),
    );

    if let Some(token) = &config.token {
        let mut value = HeaderValue::from_str(token)
            .map_err(|e| Error::Config(format!("Invalid token header value: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static("private-token"), value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}
