//! Request intent resolution - the request hot path.
//!
//! Path segments are held in a `SmallVec` sized for the deepest JSON:API URL
//! (four segments), so classification does not allocate for the segment list.

use super::core::Request;
use super::intent::Intent;
use super::query::{decode_query, validate_pagination, QueryParams};
use crate::config::ResolverConfig;
use crate::error::Error;
use crate::MEDIA_TYPE;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, Method};
use smallvec::SmallVec;
use std::borrow::Cow;
use tracing::debug;

/// Header used by clients that cannot send PATCH or DELETE directly.
pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

/// Maximum number of URL segments after the prefix.
pub const MAX_SEGMENTS: usize = 4;

/// Media ranges accepted in an `Accept` header.
const ACCEPTABLE_MEDIA_RANGES: [&str; 4] = [MEDIA_TYPE, "*/*", "application/*", "application/json"];

type SegmentVec<'a> = SmallVec<[Cow<'a, str>; MAX_SEGMENTS]>;

/// Header value as text; empty values count as absent.
fn header<'a>(headers: &'a HeaderMap, name: impl http::header::AsHeaderName) -> Option<Cow<'a, str>> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .filter(|v| !v.trim().is_empty())
}

fn effective_method(method: &Method, headers: &HeaderMap) -> Result<Method, Error> {
    let method = match header(headers, METHOD_OVERRIDE_HEADER) {
        Some(value) => Method::from_bytes(value.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| Error::bad_request("unsupported method"))?,
        None => method.clone(),
    };

    if matches!(
        method,
        Method::GET | Method::POST | Method::PATCH | Method::DELETE
    ) {
        Ok(method)
    } else {
        Err(Error::bad_request("unsupported method"))
    }
}

/// Strip the prefix and split the remaining path into decoded segments.
fn split_path<'a>(path: &'a str, prefix: &str) -> Result<SegmentVec<'a>, Error> {
    let path = path.trim_matches('/');
    let prefix = prefix.trim_matches('/');

    let rest = if prefix.is_empty() {
        path
    } else {
        path.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| Error::bad_request("invalid URL prefix"))?
    };

    let mut segments = SegmentVec::new();
    for raw in rest.split('/') {
        if segments.len() == MAX_SEGMENTS || raw.is_empty() {
            return Err(Error::bad_request("invalid URL"));
        }
        let segment = urlencoding::decode(raw).map_err(|_| Error::bad_request("invalid URL"))?;
        if segment.is_empty() {
            return Err(Error::bad_request("invalid URL"));
        }
        segments.push(segment);
    }
    Ok(segments)
}

fn negotiate(headers: &HeaderMap, intent: Intent) -> Result<(), Error> {
    let content_type = header(headers, CONTENT_TYPE);

    if let Some(content_type) = &content_type {
        if content_type != MEDIA_TYPE {
            return Err(Error::bad_request("invalid content type header"));
        }
    }

    if let Some(accept) = header(headers, ACCEPT) {
        if !ACCEPTABLE_MEDIA_RANGES.contains(&accept.as_ref()) {
            return Err(Error::not_acceptable("invalid accept header"));
        }
    }

    if intent.document_expected() && content_type.is_none() {
        return Err(Error::bad_request("missing content type header"));
    }

    Ok(())
}

/// Classify an inbound request.
///
/// # Arguments
///
/// * `method` - Request method as received (before `X-HTTP-Method-Override`)
/// * `path` - URL path without query string
/// * `headers` - Request headers
/// * `raw_query` - Raw query string, with or without the leading `?`
/// * `config` - Prefix and action tables
///
/// # Returns
///
/// The validated [`Request`], or the single [`Error`] describing why the
/// request is not a valid JSON:API request.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, Method};
/// use jsonapi_router::config::ResolverConfig;
/// use jsonapi_router::request::{resolve, Intent};
///
/// let req = resolve(
///     &Method::GET,
///     "/posts/1/relationships/author",
///     &HeaderMap::new(),
///     "",
///     &ResolverConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(req.intent, Intent::GetRelationship);
/// assert_eq!(req.relationship.as_deref(), Some("author"));
/// ```
pub fn resolve(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    raw_query: &str,
    config: &ResolverConfig,
) -> Result<Request, Error> {
    let result = classify(method, path, headers, raw_query, config);
    match &result {
        Ok(req) => debug!(
            method = %method,
            path = %path,
            intent = %req.intent,
            resource_type = %req.resource_type,
            "Request resolved"
        ),
        Err(err) => debug!(
            method = %method,
            path = %path,
            status = err.status,
            detail = err.detail.as_deref().unwrap_or_default(),
            "Request rejected"
        ),
    }
    result
}

/// Classify an `http::Request`, reading method, path, headers and query from it.
pub fn resolve_http<B>(req: &http::Request<B>, config: &ResolverConfig) -> Result<Request, Error> {
    resolve(
        req.method(),
        req.uri().path(),
        req.headers(),
        req.uri().query().unwrap_or_default(),
        config,
    )
}

fn classify(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    raw_query: &str,
    config: &ResolverConfig,
) -> Result<Request, Error> {
    let method = effective_method(method, headers)?;
    let segments = split_path(path, &config.prefix)?;

    let mut req = Request {
        prefix: config.prefix.trim_matches('/').to_string(),
        ..Request::default()
    };

    let mut segments = segments.into_iter();
    let resource_type = segments.next().map(Cow::into_owned).unwrap_or_default();
    let rest: SmallVec<[String; MAX_SEGMENTS]> = segments.map(Cow::into_owned).collect();
    req.resource_type = resource_type;

    if let [action] = rest.as_slice() {
        if config.collection_actions.allows(action, &method) {
            req.intent = Intent::CollectionAction;
            req.collection_action = Some(action.clone());
            return Ok(req);
        }
    }

    if let Some(id) = rest.first() {
        req.resource_id = Some(id.clone());
    }

    if let [_, action] = rest.as_slice() {
        if config.resource_actions.allows(action, &method) {
            req.intent = Intent::ResourceAction;
            req.resource_action = Some(action.clone());
            return Ok(req);
        }
    }

    let level = match rest.as_slice() {
        [] => 1,
        [_] => 2,
        [_, related] if related != "relationships" => {
            req.related_resource = Some(related.clone());
            3
        }
        [_, keyword, relationship] if keyword == "relationships" => {
            req.relationship = Some(relationship.clone());
            4
        }
        _ => return Err(Error::bad_request("invalid URL relationship format")),
    };

    req.intent = Intent::from_route(&method, level)
        .ok_or_else(|| Error::bad_request("the URL and method combination is invalid"))?;

    negotiate(headers, req.intent)?;

    let params = decode_query(raw_query)?;
    validate_pagination(&params)?;

    let QueryParams {
        include,
        sorting,
        page_number,
        page_size,
        page_offset,
        page_limit,
        page_before,
        page_after,
        fields,
        filters,
    } = params;

    req.include = include;
    req.sorting = sorting;
    req.page_number = page_number;
    req.page_size = page_size;
    req.page_offset = page_offset;
    req.page_limit = page_limit;
    req.page_before = page_before;
    req.page_after = page_after;
    req.fields = fields;
    req.filters = filters;

    Ok(req)
}
