//! Core library for glapi
//!
//! This crate implements the **Functional Core** of glapi: everything needed
//! to describe a GitLab API call without performing it.
//!
//! - **`glapi_core`** (this crate): pure functions, no I/O
//! - **`glapi`**: the HTTP transport, API handles and CLI (the Imperative Shell)
//!
//! # Module Organization
//!
//! - [`options`]: declarative option schemas and the resolver that validates
//!   and normalizes caller parameters
//! - [`pagination`]: the `page` / `per_page` options shared by listings
//! - [`paths`]: identifier encoding and group path construction
//! - [`request`]: the `Request` value handed to a transport
//! - [`groups`]: one builder function per group issue / merge request endpoint
//!
//! # Example Usage
//!
//! ```rust
//! use glapi_core::groups::merge_requests;
//! use glapi_core::params;
//! use glapi_core::paths::Id;
//!
//! let request = merge_requests::all(&Id::from(1u64), &params! { "state" => "merged" }).unwrap();
//!
//! assert_eq!(request.path, "groups/1/merge_requests");
//! assert_eq!(request.params, params! { "state" => "merged" });
//! ```

pub mod groups;
pub mod options;
pub mod pagination;
pub mod paths;
pub mod request;
