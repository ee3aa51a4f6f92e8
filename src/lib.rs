//! # jsonapi-router
//!
//! **jsonapi-router** classifies HTTP requests against the
//! [JSON:API](https://jsonapi.org/format/) URL grammar and encodes/decodes the
//! JSON:API document envelope.
//!
//! ## Overview
//!
//! The crate is the transport-independent core of a JSON:API server or client.
//! A thin adapter for any web framework hands it the method, path, headers,
//! query string and body bytes, and gets back strongly typed values:
//!
//! - A [`Request`] describing what the client wants (the [`Intent`], the
//!   addressed type, id, relationship or action, plus include, sort,
//!   pagination, sparse fieldsets and filters)
//! - A [`Document`] holding primary data, included resources, links, errors
//!   and meta
//! - An `http::Response` carrying an encoded document with the
//!   `application/vnd.api+json` content type
//!
//! Every failure is a JSON:API [`Error`] value that can be written back to the
//! client as it is.
//!
//! ## Architecture
//!
//! - **[`request`]** - Intent resolution and query-string decoding
//! - **[`document`]** - Document and resource model, one-or-many data, links
//! - **[`error`]** - JSON:API error objects
//! - **[`response`]** - Error composition, common status and response writing
//! - **[`config`]** - URL prefix and registered actions
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Adapter as Framework Adapter
//!     participant Resolver as request::resolve
//!     participant Codec as document::parse_request_document
//!     participant App as Application
//!     participant Writer as response
//!
//!     Adapter->>Resolver: method, path, headers, query
//!     alt Invalid request
//!         Resolver-->>Adapter: Error (400 / 406)
//!         Adapter->>Writer: write_error_response(&err)
//!     else Valid request
//!         Resolver-->>Adapter: Request { intent, ... }
//!         Adapter->>Codec: body bytes (document-expecting intents)
//!         Codec-->>Adapter: Document or ErrorList
//!         Adapter->>App: Request + Document
//!         App-->>Adapter: Resource(s) or Error(s)
//!         Adapter->>Writer: write_resource / write_errors_response
//!     end
//!     Writer-->>Adapter: http::Response<Vec<u8>>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::{HeaderMap, Method, StatusCode};
//! use jsonapi_router::{resolve, write_resource, Intent, Resource, ResolverConfig};
//!
//! let config = ResolverConfig::new().with_prefix("api");
//! let req = resolve(&Method::GET, "/api/posts/1", &HeaderMap::new(), "", &config).unwrap();
//! assert_eq!(req.intent, Intent::FindResource);
//!
//! let post = Resource::new("posts", req.resource_id.clone().unwrap_or_default());
//! let resp = write_resource(StatusCode::OK, post, None, vec![]).unwrap();
//! assert_eq!(resp.body().as_slice(), br#"{"data":{"type":"posts","id":"1"}}"#);
//! ```
//!
//! ## Numbers
//!
//! Attribute and meta values are held as `serde_json::Value` with arbitrary
//! precision enabled, so numbers such as `12345678901234567890123` survive a
//! decode/encode cycle with their original text.

pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod request;
pub mod response;

/// The JSON:API media type.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

pub use config::{ActionTable, ResolverConfig};
pub use document::{
    encode_document, parse_document, parse_request_document, Document, DocumentLinks, Hybrid,
    HybridDocument, HybridResource, Link, Resource,
};
pub use error::{Error, ErrorList};
pub use request::{resolve, resolve_http, Intent, Request};
pub use response::{
    common_status, write_error, write_error_response, write_errors, write_errors_response,
    write_resource, write_resources, write_response,
};
