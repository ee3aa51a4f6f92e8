//! # Error Module
//!
//! JSON:API error objects and the constructors used throughout the resolver
//! and codec.
//!
//! Every failure in this crate is returned as a value of [`Error`]. The type is
//! the wire representation itself (see <https://jsonapi.org/format/#errors>), so
//! a rejected request can be serialized straight into an `errors` document by
//! [`crate::response::write_error`] without any translation step.
//!
//! The `status` member is held as a `u16` and written as a JSON string, which
//! is what the media type mandates. Statuses are never corrected here; an
//! invalid or zero status is only coerced to `500` by the response writer.

use crate::document::Map;
use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Links attached to an error object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorLinks {
    /// A link that leads to further details about this particular occurrence of the problem.
    #[serde(default)]
    pub about: String,
}

/// Reference to the part of the request that caused an error.
///
/// At most one of `parameter` and `pointer` is set by the constructors in this
/// module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// The URI query parameter that caused the error (e.g. `page[number]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// A JSON Pointer to the associated entity in the request document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
}

/// A JSON:API error object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Error {
    /// A unique identifier for this particular occurrence of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ErrorLinks>,
    /// The HTTP status code applicable to this problem, `0` when unset.
    #[serde(
        default,
        skip_serializing_if = "status_is_unset",
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    pub status: u16,
    /// An application-specific error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// A short, human-readable summary of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// A human-readable explanation specific to this occurrence of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map,
}

impl Error {
    /// Build an error for `status` with the canonical reason phrase as title.
    ///
    /// An empty `detail` leaves the `detail` member unset.
    #[must_use]
    pub fn from_status(status: StatusCode, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            status: status.as_u16(),
            title: status.canonical_reason().map(str::to_string),
            detail: (!detail.is_empty()).then_some(detail),
            ..Self::default()
        }
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::from_status(StatusCode::BAD_REQUEST, detail)
    }

    /// 400 Bad Request pointing at the offending query parameter.
    #[must_use]
    pub fn bad_request_param(detail: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            source: Some(ErrorSource {
                parameter: Some(parameter.into()),
                pointer: None,
            }),
            ..Self::bad_request(detail)
        }
    }

    /// 400 Bad Request pointing at the offending member of the request document.
    #[must_use]
    pub fn bad_request_pointer(detail: impl Into<String>, pointer: impl Into<String>) -> Self {
        Self {
            source: Some(ErrorSource {
                parameter: None,
                pointer: Some(pointer.into()),
            }),
            ..Self::bad_request(detail)
        }
    }

    /// 404 Not Found.
    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::from_status(StatusCode::NOT_FOUND, detail)
    }

    /// 406 Not Acceptable.
    #[must_use]
    pub fn not_acceptable(detail: impl Into<String>) -> Self {
        Self::from_status(StatusCode::NOT_ACCEPTABLE, detail)
    }

    /// 500 Internal Server Error.
    #[must_use]
    pub fn internal_server_error(detail: impl Into<String>) -> Self {
        Self::from_status(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    /// Returns `true` when `status` names a registered HTTP status.
    #[must_use]
    pub fn has_valid_status(&self) -> bool {
        is_registered_status(self.status)
    }

    /// The status this error is written with: its own when registered, `500` otherwise.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status)
            .ok()
            .filter(|code| code.canonical_reason().is_some())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Copy of this error with an invalid status replaced by `500`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut err = self.clone();
        err.status = self.status_code().as_u16();
        err
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title.as_deref().unwrap_or_default(),
            self.detail.as_deref().unwrap_or_default()
        )
    }
}

impl std::error::Error for Error {}

/// Every error carried by a failed document, in document order.
///
/// Decoding a document whose `errors` member is non-empty fails with all of
/// them. Callers that only want one can use [`ErrorList::into_first`].
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorList(Vec<Error>);

impl ErrorList {
    #[must_use]
    pub fn new(errors: Vec<Error>) -> Self {
        Self(errors)
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.0
    }

    #[must_use]
    pub fn first(&self) -> Option<&Error> {
        self.0.first()
    }

    /// Collapse to the first error, or a bare Internal Server Error when empty.
    #[must_use]
    pub fn into_first(self) -> Error {
        self.0
            .into_iter()
            .next()
            .unwrap_or_else(|| Error::internal_server_error(""))
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Error> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Error> for ErrorList {
    fn from(err: Error) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorList {}

pub(crate) fn is_registered_status(status: u16) -> bool {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .is_some()
}

fn status_is_unset(status: &u16) -> bool {
    *status == 0
}

fn serialize_status<S: Serializer>(status: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&status.to_string())
}

// Peers disagree on whether `status` is a string or a number; both are accepted.
fn deserialize_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    use serde::de::Error as _;

    let text = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(0),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => {
            return Err(D::Error::custom(format!(
                "expected status to be a string, got {other}"
            )))
        }
    };
    if text.is_empty() {
        return Ok(0);
    }
    text.trim()
        .parse::<u16>()
        .map_err(|_| D::Error::custom(format!("invalid error status '{text}'")))
}
