//! # Request Module
//!
//! Turns a raw HTTP method, URL path, headers and query string into a
//! classified [`Request`].
//!
//! ## Overview
//!
//! The resolver is responsible for:
//! - Applying `X-HTTP-Method-Override` and rejecting unsupported methods
//! - Stripping the configured URL prefix and splitting the path into segments
//! - Matching registered collection and resource actions
//! - Mapping (method, URL level) to an [`Intent`]
//! - Negotiating `Content-Type` and `Accept` against the JSON:API media type
//! - Decoding `include`, `sort`, `page[...]`, `fields[...]` and `filter[...]`
//! - Cross-validating pagination members
//!
//! ## URL Grammar
//!
//! ```text
//! /<prefix>/<type>                               level 1
//! /<prefix>/<type>/<id>                          level 2
//! /<prefix>/<type>/<id>/<related>                level 3
//! /<prefix>/<type>/<id>/relationships/<name>     level 4
//! /<prefix>/<type>/<collection-action>           action
//! /<prefix>/<type>/<id>/<resource-action>        action
//! ```
//!
//! Action matches return immediately: header negotiation and query decoding do
//! not apply to them.
//!
//! ## Example
//!
//! ```rust
//! use http::{HeaderMap, Method};
//! use jsonapi_router::config::ResolverConfig;
//! use jsonapi_router::request::{resolve, Intent};
//!
//! let config = ResolverConfig::new().with_prefix("api");
//! let req = resolve(&Method::GET, "/api/posts", &HeaderMap::new(), "include=author&sort=-date", &config)
//!     .unwrap();
//!
//! assert_eq!(req.intent, Intent::ListResources);
//! assert_eq!(req.include, vec!["author"]);
//! assert_eq!(req.sorting, vec!["-date"]);
//! ```
//!
//! ## Failures
//!
//! Resolution either fully succeeds or fails with exactly one
//! [`crate::error::Error`]: 400 for grammar, header and parameter problems
//! (parameter problems carry `source.parameter`), 406 for an unacceptable
//! `Accept` header.

mod core;
mod intent;
mod query;
mod resolve;
#[cfg(test)]
mod tests;

pub use core::Request;
pub use intent::Intent;
pub use query::{decode_query, validate_pagination, QueryParams};
pub use resolve::{resolve, resolve_http, MAX_SEGMENTS, METHOD_OVERRIDE_HEADER};
