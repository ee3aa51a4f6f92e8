//! # Document Module
//!
//! The JSON:API data model and its codec.
//!
//! ## Overview
//!
//! - [`Document`] - the top-level envelope (`data`, `included`, `links`, `errors`, `meta`)
//! - [`Resource`] - a typed, identified unit of primary data
//! - [`Hybrid`] - one-or-many container used for `data` and other members that
//!   may be singular or plural on the wire
//! - [`Link`] / [`DocumentLinks`] - link members with an explicit `null` state
//!
//! ## Decoding
//!
//! Attribute and meta maps are plain `serde_json` maps. The crate enables the
//! `arbitrary_precision` feature of `serde_json`, so a number such as
//! `12345678901234567890123` survives a decode/encode cycle digit for digit.
//! Conversion to a concrete numeric type happens only in
//! [`Resource::assign_attributes`].
//!
//! The one-or-many rule is applied by [`peek_shape`]: the first significant
//! byte of the member decides between a single object (`{`) and a list (`[`).
//!
//! ```rust
//! use jsonapi_router::document::{parse_document, Hybrid};
//!
//! let doc = parse_document(br#"{"data":[{"type":"foo","id":"1"}]}"#).unwrap();
//! assert!(matches!(doc.data, Some(Hybrid::Many(ref list)) if list.len() == 1));
//! ```

mod core;
mod hybrid;
mod link;
mod resource;

pub use core::{encode_document, parse_document, parse_request_document, Document};
pub use hybrid::{peek_shape, Hybrid, HybridDocument, HybridResource, Shape};
pub use link::{DocumentLinks, Link};
pub use resource::Resource;

/// Open key-value map used for `attributes` and `meta`.
pub type Map = serde_json::Map<String, serde_json::Value>;
