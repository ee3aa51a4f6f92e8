use super::{Document, DocumentLinks, Map};
use crate::error::Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A resource object or resource identifier object.
///
/// See: <https://jsonapi.org/format/#document-resource-objects>.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// The mandatory type of the resource.
    #[serde(rename = "type")]
    pub resource_type: String,

    /// The id of the resource.
    ///
    /// Only a resource that originates at the client and represents a new
    /// resource to be created may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Attribute values. Numbers keep their literal text.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map,

    /// Relationship name to its linkage document.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Document>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<DocumentLinks>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map,
}

impl Resource {
    /// A bare resource identifier.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Identifier part of this resource (type and id only).
    #[must_use]
    pub fn identifier(&self) -> Resource {
        Resource {
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
            ..Resource::default()
        }
    }

    /// Bind the attributes to a caller-defined type.
    ///
    /// Numbers are converted at this point, from their preserved literal text,
    /// into whatever numeric type `T` declares. A mismatch is a Bad Request.
    pub fn assign_attributes<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_value(Value::Object(self.attributes.clone()))
            .map_err(|e| Error::bad_request_pointer(e.to_string(), "/data/attributes"))
    }
}
