use super::*;
use crate::config::ResolverConfig;
use crate::MEDIA_TYPE;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};

fn get(path: &str, query: &str) -> Result<Request, crate::error::Error> {
    resolve(&Method::GET, path, &HeaderMap::new(), query, &ResolverConfig::default())
}

fn with_content_type() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
    headers
}

#[test]
fn test_intent_table() {
    let cases = [
        (Method::GET, "foo", Intent::ListResources),
        (Method::GET, "foo/1", Intent::FindResource),
        (Method::GET, "foo/1/bar", Intent::GetRelatedResources),
        (Method::GET, "foo/1/relationships/bar", Intent::GetRelationship),
        (Method::POST, "foo", Intent::CreateResource),
        (Method::POST, "foo/1/relationships/bar", Intent::AppendToRelationship),
        (Method::PATCH, "foo/1", Intent::UpdateResource),
        (Method::PATCH, "foo/1/relationships/bar", Intent::SetRelationship),
        (Method::DELETE, "foo/1", Intent::DeleteResource),
        (Method::DELETE, "foo/1/relationships/bar", Intent::RemoveFromRelationship),
    ];

    for (method, path, intent) in cases {
        let req = resolve(&method, path, &with_content_type(), "", &ResolverConfig::default())
            .unwrap_or_else(|e| panic!("{method} {path}: {e}"));
        assert_eq!(req.intent, intent, "{method} {path}");
        assert_eq!(intent.request_method(), Some(method.clone()));
        assert_eq!(Intent::from_route(&method, intent.level().unwrap()), Some(intent));
    }
}

#[test]
fn test_invalid_combinations() {
    let cases = [
        (Method::PATCH, "foo"),
        (Method::DELETE, "foo"),
        (Method::POST, "foo/1"),
        (Method::POST, "foo/1/bar"),
        (Method::PATCH, "foo/1/bar"),
        (Method::DELETE, "foo/1/bar"),
    ];
    for (method, path) in cases {
        let err = resolve(&method, path, &with_content_type(), "", &ResolverConfig::default())
            .unwrap_err();
        assert_eq!(err.status, 400);
        assert_eq!(
            err.detail.as_deref(),
            Some("the URL and method combination is invalid"),
            "{method} {path}"
        );
    }
}

#[test]
fn test_unsupported_method() {
    let err = resolve(&Method::PUT, "foo", &HeaderMap::new(), "", &ResolverConfig::default())
        .unwrap_err();
    assert_eq!(err.detail.as_deref(), Some("unsupported method"));
}

#[test]
fn test_method_override() {
    let mut headers = with_content_type();
    headers.insert(METHOD_OVERRIDE_HEADER, HeaderValue::from_static("PATCH"));

    let req = resolve(&Method::POST, "foo/1", &headers, "", &ResolverConfig::default()).unwrap();
    assert_eq!(req.intent, Intent::UpdateResource);

    headers.insert(METHOD_OVERRIDE_HEADER, HeaderValue::from_static("PUT"));
    assert!(resolve(&Method::POST, "foo/1", &headers, "", &ResolverConfig::default()).is_err());
}

#[test]
fn test_invalid_paths() {
    for path in ["", "/", "foo//1", "foo/bar/baz/qux/quux", "foo/bar/baz/qux", "foo/1/relationships"] {
        let err = get(path, "").unwrap_err();
        assert_eq!(err.status, 400, "{path}");
    }
}

#[test]
fn test_relationship_path() {
    let req = get("/posts/1/relationships/author", "").unwrap();
    assert_eq!(req.intent, Intent::GetRelationship);
    assert_eq!(req.resource_type, "posts");
    assert_eq!(req.resource_id.as_deref(), Some("1"));
    assert_eq!(req.relationship.as_deref(), Some("author"));
    assert_eq!(req.related_resource, None);
}

#[test]
fn test_percent_encoded_segments() {
    let req = get("/posts/a%20b", "").unwrap();
    assert_eq!(req.resource_id.as_deref(), Some("a b"));
    assert_eq!(req.self_link(), "/posts/a%20b");
}

#[test]
fn test_prefix() {
    let config = ResolverConfig::new().with_prefix("foo/");
    let req = resolve(&Method::GET, "foo/bar", &HeaderMap::new(), "", &config).unwrap();
    assert_eq!(req.resource_type, "bar");
    assert_eq!(req.prefix, "foo");

    let err = resolve(&Method::GET, "/foobar/baz", &HeaderMap::new(), "", &config).unwrap_err();
    assert_eq!(err.detail.as_deref(), Some("invalid URL prefix"));

    assert!(resolve(&Method::GET, "/foo", &HeaderMap::new(), "", &config).is_err());
}

#[test]
fn test_headers() {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("foo"));
    let err = resolve(&Method::GET, "foo", &headers, "", &ResolverConfig::default()).unwrap_err();
    assert_eq!(err.status, 406);

    for accept in [MEDIA_TYPE, "*/*", "application/*", "application/json"] {
        headers.insert(ACCEPT, HeaderValue::from_static(accept));
        assert!(resolve(&Method::GET, "foo", &headers, "", &ResolverConfig::default()).is_ok());
    }

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let err = resolve(&Method::GET, "foo", &headers, "", &ResolverConfig::default()).unwrap_err();
    assert_eq!(err.status, 400);

    let err = resolve(&Method::POST, "foo", &HeaderMap::new(), "", &ResolverConfig::default())
        .unwrap_err();
    assert_eq!(err.detail.as_deref(), Some("missing content type header"));
}

#[test]
fn test_header_values_must_match_exactly() {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(" application/vnd.api+json "));
    let err = resolve(&Method::GET, "foo", &headers, "", &ResolverConfig::default()).unwrap_err();
    assert_eq!(err.detail.as_deref(), Some("invalid content type header"));

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/* "));
    let err = resolve(&Method::GET, "foo", &headers, "", &ResolverConfig::default()).unwrap_err();
    assert_eq!(err.status, 406);
}

#[test]
fn test_collection_action() {
    let config = ResolverConfig::new().with_collection_action("search", [Method::POST]);

    let req = resolve(&Method::POST, "posts/search", &HeaderMap::new(), "page[number]=1", &config)
        .unwrap();
    assert_eq!(req.intent, Intent::CollectionAction);
    assert_eq!(req.collection_action.as_deref(), Some("search"));
    assert_eq!(req.resource_id, None);
    assert_eq!(req.self_link(), "/posts/search");

    // GET is not registered, so "search" is an id
    let req = resolve(&Method::GET, "posts/search", &HeaderMap::new(), "", &config).unwrap();
    assert_eq!(req.intent, Intent::FindResource);
    assert_eq!(req.resource_id.as_deref(), Some("search"));
}

#[test]
fn test_resource_action() {
    let config = ResolverConfig::new().with_resource_action("publish", [Method::POST]);

    let req = resolve(&Method::POST, "posts/1/publish", &HeaderMap::new(), "", &config).unwrap();
    assert_eq!(req.intent, Intent::ResourceAction);
    assert_eq!(req.resource_id.as_deref(), Some("1"));
    assert_eq!(req.resource_action.as_deref(), Some("publish"));
    assert_eq!(req.self_link(), "/posts/1/publish");

    let req = resolve(&Method::GET, "posts/1/publish", &HeaderMap::new(), "", &config).unwrap();
    assert_eq!(req.intent, Intent::GetRelatedResources);
}

#[test]
fn test_pagination_cross_validation() {
    let err = get("foo", "page[number]=1").unwrap_err();
    assert_eq!(
        err.source.and_then(|s| s.parameter).as_deref(),
        Some("page[number]")
    );

    let err = get("foo", "page[size]=1").unwrap_err();
    assert_eq!(
        err.source.and_then(|s| s.parameter).as_deref(),
        Some("page[size]")
    );

    let req = get("foo", "page[number]=1&page[size]=2").unwrap();
    assert_eq!((req.page_number, req.page_size), (1, 2));

    let req = get("foo", "page[offset]=10&page[limit]=5").unwrap();
    assert_eq!((req.page_offset, req.page_limit), (10, 5));
    assert!(req.is_paginated());
}

#[test]
fn test_fields_and_filters() {
    let req = get("foo", "fields[foo]=bar,baz&filter[foo]=bar&filter[foo]=baz").unwrap();
    assert_eq!(req.fields.get("foo"), Some(&vec!["bar".to_string(), "baz".to_string()]));
    assert_eq!(req.filters.get("foo"), Some(&vec!["bar".to_string(), "baz".to_string()]));
}

#[test]
fn test_self_link_and_query_round_trip() {
    let config = ResolverConfig::new().with_prefix("api");
    let req = resolve(
        &Method::GET,
        "/api/posts",
        &HeaderMap::new(),
        "include=author,comments&sort=-date&page[number]=2&page[size]=10&fields[posts]=title&filter[tag]=rust",
        &config,
    )
    .unwrap();

    let again = resolve(&Method::GET, &req.self_link(), &HeaderMap::new(), &req.query(), &config)
        .unwrap();
    assert_eq!(again, req);
}

#[test]
fn test_intent_helpers() {
    assert!(Intent::CreateResource.document_expected());
    assert!(Intent::RemoveFromRelationship.document_expected());
    assert!(!Intent::DeleteResource.document_expected());
    assert!(Intent::CollectionAction.is_action());
    assert_eq!(Intent::ResourceAction.request_method(), None);
    assert_eq!(Intent::GetRelationship.to_string(), "GetRelationship");
}
