//! Client for GitLab group issues and merge requests
//!
//! This crate is the Imperative Shell around [`glapi_core`]: the core builds
//! and validates every request, this crate sends it.
//!
//! ```rust,no_run
//! use glapi::api::Gitlab;
//! use glapi::config::GitlabConfig;
//! use glapi_core::params;
//!
//! # async fn run() -> glapi::error::Result<()> {
//! let gitlab = Gitlab::from_config(&GitlabConfig::from_env()?)?;
//! let merge_requests = gitlab
//!     .group_merge_requests()
//!     .all("my-group", &params! { "state" => "opened", "per_page" => 20 })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod transport;

pub use error::{Error, Result};
