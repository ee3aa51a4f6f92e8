use super::hybrid::{deserialize_nullable, peek_shape, Hybrid, HybridResource, Shape};
use super::{DocumentLinks, Map, Resource};
use crate::error::{Error, ErrorList};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The top-level JSON:API document, also used as relationship linkage.
///
/// See: <https://jsonapi.org/format/#document-top-level>.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Primary data. `Some(Hybrid::One(None))` is written as `"data": null`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_nullable"
    )]
    pub data: Option<HybridResource>,

    /// Resources related to the primary data and/or to other included resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Resource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<DocumentLinks>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Error>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map,
}

impl Document {
    /// Document with a single primary resource.
    #[must_use]
    pub fn with_resource(resource: Resource) -> Self {
        Self {
            data: Some(Hybrid::one(resource)),
            ..Self::default()
        }
    }

    /// Document with a list of primary resources. An empty list is written as `[]`.
    #[must_use]
    pub fn with_resources(resources: Vec<Resource>) -> Self {
        Self {
            data: Some(Hybrid::Many(resources)),
            ..Self::default()
        }
    }

    /// Document carrying only errors.
    #[must_use]
    pub fn with_errors(errors: Vec<Error>) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }

    /// `true` when `data` holds at least one resource.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(|data| !data.is_empty())
    }
}

/// Decode a document from raw body bytes.
///
/// Malformed JSON and shape violations fail with a Bad Request. A well formed
/// document that carries `errors` fails with all of those errors.
pub fn parse_document(bytes: &[u8]) -> Result<Document, ErrorList> {
    let text = std::str::from_utf8(bytes).map_err(|e| Error::bad_request(e.to_string()))?;

    // serde accepts a sequence for a struct; a top-level array is never a document.
    if peek_shape(text) == Some(Shape::Array) {
        debug!(body_size_bytes = bytes.len(), "Document is an array");
        return Err(Error::bad_request("expected document to be an object").into());
    }

    let doc: Document = serde_json::from_str(text).map_err(|e| {
        debug!(error = %e, body_size_bytes = bytes.len(), "Document decode failed");
        Error::bad_request(e.to_string())
    })?;

    if !doc.errors.is_empty() {
        debug!(error_count = doc.errors.len(), "Document carries errors");
        return Err(ErrorList::new(doc.errors));
    }

    Ok(doc)
}

/// Decode a request body document.
///
/// On top of [`parse_document`] this requires primary data that is either a
/// single resource or a non-empty list, each with a non-empty type.
pub fn parse_request_document(bytes: &[u8]) -> Result<Document, ErrorList> {
    let doc = parse_document(bytes)?;

    if !doc.has_data() {
        debug!("Request document without primary data");
        return Err(Error::bad_request_pointer("missing data", "/data").into());
    }

    if let Some(data) = &doc.data {
        for (index, resource) in data.iter().enumerate() {
            if resource.resource_type.is_empty() {
                let pointer = if data.is_many() {
                    format!("/data/{index}/type")
                } else {
                    "/data/type".to_string()
                };
                return Err(Error::bad_request_pointer("missing resource type", pointer).into());
            }
        }
    }

    Ok(doc)
}

/// Encode a document to JSON bytes.
pub fn encode_document(doc: &Document) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(doc).map_err(|e| Error::internal_server_error(e.to_string()))
}
