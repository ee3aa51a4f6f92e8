//! # Response Module
//!
//! Composes outgoing JSON:API documents and turns them into `http::Response`
//! values with the JSON:API media type.
//!
//! ## Error Composition
//!
//! [`write_error`] wraps a single failure in an `errors` document. Anything
//! that is not one of this crate's errors is replaced by a bare
//! `500 Internal Server Error`, so internal failure text never reaches the
//! client.
//!
//! [`write_errors`] wraps several failures and picks one HTTP status for the
//! whole batch with [`common_status`]:
//!
//! | Statuses | Common status |
//! |----------|---------------|
//! | `405`, `405` | `405` |
//! | `401`, `403` | `400` |
//! | `404`, `502` | `500` |
//! | `501`, `502` | `500` |
//!
//! Statuses that are zero or unregistered are coerced to `500` before any of
//! this happens.

use crate::document::{encode_document, Document, DocumentLinks, Resource};
use crate::error::{Error, ErrorList};
use crate::MEDIA_TYPE;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Response, StatusCode};
use tracing::warn;

/// Reduce the statuses of `errors` to one status, left to right.
///
/// The first status seeds the result. A later status that equals it, or any
/// status once the result is `500`, leaves it unchanged. Otherwise a `5xx`
/// status moves the result to `500` and anything else to `400`.
///
/// An empty slice yields `500`.
#[must_use]
pub fn common_status(errors: &[Error]) -> StatusCode {
    let mut statuses = errors.iter().map(Error::status_code);
    let Some(mut common) = statuses.next() else {
        return StatusCode::INTERNAL_SERVER_ERROR;
    };

    for status in statuses {
        if status == common || common == StatusCode::INTERNAL_SERVER_ERROR {
            continue;
        }
        common = if status.is_server_error() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        };
    }
    common
}

fn coerce(err: &Error) -> Error {
    if !err.has_valid_status() {
        warn!(
            status = err.status,
            detail = err.detail.as_deref().unwrap_or_default(),
            "Coercing invalid error status to 500"
        );
    }
    err.normalized()
}

/// Compose the document for a single failure.
///
/// [`Error`] values are used as they are. An [`ErrorList`] contributes its
/// first error. Any other error type becomes an Internal Server Error without
/// detail.
#[must_use]
pub fn write_error(err: &(dyn std::error::Error + 'static)) -> (StatusCode, Document) {
    let err = if let Some(err) = err.downcast_ref::<Error>() {
        coerce(err)
    } else if let Some(first) = err.downcast_ref::<ErrorList>().and_then(ErrorList::first) {
        coerce(first)
    } else {
        warn!(error = %err, "Substituting foreign error with Internal Server Error");
        Error::internal_server_error("")
    };

    (err.status_code(), Document::with_errors(vec![err]))
}

/// Compose the document for a batch of failures.
///
/// An empty batch is written as a single Internal Server Error.
#[must_use]
pub fn write_errors(errors: &[Error]) -> (StatusCode, Document) {
    if errors.is_empty() {
        return write_error(&Error::internal_server_error(""));
    }

    let errors: Vec<Error> = errors.iter().map(coerce).collect();
    (common_status(&errors), Document::with_errors(errors))
}

/// Encode `doc` into a response with `status` and the JSON:API content type.
///
/// `204 No Content` responses are written without a body.
pub fn write_response(status: StatusCode, doc: &Document) -> Result<Response<Vec<u8>>, Error> {
    let body = if status == StatusCode::NO_CONTENT {
        Vec::new()
    } else {
        encode_document(doc)?
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
    Ok(response)
}

/// Respond with a single primary resource.
pub fn write_resource(
    status: StatusCode,
    resource: Resource,
    links: Option<DocumentLinks>,
    included: Vec<Resource>,
) -> Result<Response<Vec<u8>>, Error> {
    let doc = Document {
        links,
        included,
        ..Document::with_resource(resource)
    };
    write_response(status, &doc)
}

/// Respond with a list of primary resources; an empty list is written as `"data": []`.
pub fn write_resources(
    status: StatusCode,
    resources: Vec<Resource>,
    links: Option<DocumentLinks>,
    included: Vec<Resource>,
) -> Result<Response<Vec<u8>>, Error> {
    let doc = Document {
        links,
        included,
        ..Document::with_resources(resources)
    };
    write_response(status, &doc)
}

/// Respond with the errors document for a single failure.
pub fn write_error_response(
    err: &(dyn std::error::Error + 'static),
) -> Result<Response<Vec<u8>>, Error> {
    let (status, doc) = write_error(err);
    write_response(status, &doc)
}

/// Respond with the errors document for a batch of failures.
pub fn write_errors_response(errors: &[Error]) -> Result<Response<Vec<u8>>, Error> {
    let (status, doc) = write_errors(errors);
    write_response(status, &doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(status: u16) -> Error {
        Error {
            status,
            ..Error::default()
        }
    }

    fn statuses(list: &[u16]) -> Vec<Error> {
        list.iter().copied().map(with_status).collect()
    }

    #[test]
    fn test_common_status() {
        assert_eq!(common_status(&statuses(&[405, 405])), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(common_status(&statuses(&[401, 403])), StatusCode::BAD_REQUEST);
        assert_eq!(common_status(&statuses(&[501, 502])), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(common_status(&statuses(&[404, 502])), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(common_status(&statuses(&[500, 404])), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(common_status(&statuses(&[401, 403, 400])), StatusCode::BAD_REQUEST);
        assert_eq!(common_status(&[]), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_common_status_coerces_first() {
        assert_eq!(common_status(&statuses(&[0, 404])), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(common_status(&statuses(&[404, 0])), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_write_error_coerces_status() {
        let (status, doc) = write_error(&with_status(0));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(doc.errors.len(), 1);
        assert_eq!(doc.errors[0].status, 500);
    }

    #[test]
    fn test_write_error_foreign() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let (status, doc) = write_error(&io);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(doc.errors[0].detail, None);
        assert_eq!(doc.errors[0].title.as_deref(), Some("Internal Server Error"));
    }

    #[test]
    fn test_write_error_from_list() {
        let list = ErrorList::new(vec![Error::not_found("first"), Error::bad_request("second")]);
        let (status, doc) = write_error(&list);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(doc.errors[0].detail.as_deref(), Some("first"));
    }

    #[test]
    fn test_write_errors_empty() {
        let (status, doc) = write_errors(&[]);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(doc.errors.len(), 1);
    }

    #[test]
    fn test_write_errors_keeps_every_error() {
        let (status, doc) = write_errors(&statuses(&[401, 599]));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(doc.errors.len(), 2);
        assert_eq!(doc.errors[1].status, 500);
    }

    #[test]
    fn test_write_response_headers() {
        let resp = write_resource(StatusCode::CREATED, Resource::new("posts", "1"), None, vec![])
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()[CONTENT_TYPE], MEDIA_TYPE);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["data"]["type"], "posts");
    }

    #[test]
    fn test_no_content_has_empty_body() {
        let resp = write_response(StatusCode::NO_CONTENT, &Document::default()).unwrap();
        assert!(resp.body().is_empty());
    }

    #[test]
    fn test_empty_resources_written_as_array() {
        let resp = write_resources(StatusCode::OK, vec![], None, vec![]).unwrap();
        assert_eq!(resp.body().as_slice(), br#"{"data":[]}"#);
    }
}
