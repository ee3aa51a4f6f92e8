use super::intent::Intent;
use std::collections::BTreeMap;

/// A classified and validated JSON:API request.
///
/// Produced by [`super::resolve`]; never mutated afterwards. Page members use
/// `0` for "not given", and at most one of the page/offset forms is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub intent: Intent,

    /// URL prefix without surrounding slashes, empty when none.
    pub prefix: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub related_resource: Option<String>,
    pub relationship: Option<String>,
    pub collection_action: Option<String>,
    pub resource_action: Option<String>,

    /// Inclusion of related resources, in request order.
    pub include: Vec<String>,

    pub page_number: u64,
    pub page_size: u64,
    pub page_offset: u64,
    pub page_limit: u64,
    pub page_before: Option<String>,
    pub page_after: Option<String>,

    /// Sort fields; a leading `-` means descending.
    pub sorting: Vec<String>,

    /// Sparse fieldsets: type to field names.
    pub fields: BTreeMap<String, Vec<String>>,

    /// Filters: name to values.
    pub filters: BTreeMap<String, Vec<String>>,
}

impl Request {
    /// Minimal request for `intent` on `resource_type`.
    #[must_use]
    pub fn new(intent: Intent, resource_type: impl Into<String>) -> Self {
        Self {
            intent,
            resource_type: resource_type.into(),
            ..Self::default()
        }
    }

    /// Canonical path of the addressed resource(s), with percent-encoded segments.
    ///
    /// ```rust
    /// use jsonapi_router::request::{Intent, Request};
    ///
    /// let req = Request {
    ///     prefix: "api".into(),
    ///     resource_id: Some("1".into()),
    ///     relationship: Some("author".into()),
    ///     ..Request::new(Intent::GetRelationship, "posts")
    /// };
    /// assert_eq!(req.self_link(), "/api/posts/1/relationships/author");
    /// ```
    #[must_use]
    pub fn self_link(&self) -> String {
        let mut link = String::new();
        if !self.prefix.is_empty() {
            link.push('/');
            link.push_str(self.prefix.trim_matches('/'));
        }
        push_segment(&mut link, &self.resource_type);

        if let Some(action) = &self.collection_action {
            push_segment(&mut link, action);
            return link;
        }
        if let Some(id) = &self.resource_id {
            push_segment(&mut link, id);
        }
        if let Some(action) = &self.resource_action {
            push_segment(&mut link, action);
        } else if let Some(related) = &self.related_resource {
            push_segment(&mut link, related);
        } else if let Some(relationship) = &self.relationship {
            link.push_str("/relationships");
            push_segment(&mut link, relationship);
        }
        link
    }

    /// Query string (without `?`) carrying this request's parameters.
    ///
    /// Members are written in a fixed order so equal requests produce equal
    /// strings.
    #[must_use]
    pub fn query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());

        if !self.include.is_empty() {
            query.append_pair("include", &self.include.join(","));
        }
        if !self.sorting.is_empty() {
            query.append_pair("sort", &self.sorting.join(","));
        }

        let pages = [
            ("page[number]", self.page_number),
            ("page[size]", self.page_size),
            ("page[offset]", self.page_offset),
            ("page[limit]", self.page_limit),
        ];
        for (key, value) in pages {
            if value > 0 {
                query.append_pair(key, &value.to_string());
            }
        }
        if let Some(before) = &self.page_before {
            query.append_pair("page[before]", before);
        }
        if let Some(after) = &self.page_after {
            query.append_pair("page[after]", after);
        }

        for (typ, fields) in &self.fields {
            query.append_pair(&format!("fields[{typ}]"), &fields.join(","));
        }
        for (typ, values) in &self.filters {
            query.append_pair(&format!("filter[{typ}]"), &values.join(","));
        }

        query.finish()
    }

    /// `true` when either page form or a cursor is present.
    #[must_use]
    pub fn is_paginated(&self) -> bool {
        self.page_number > 0
            || self.page_offset > 0
            || self.page_limit > 0
            || self.page_before.is_some()
            || self.page_after.is_some()
    }
}

fn push_segment(link: &mut String, segment: &str) {
    link.push('/');
    link.push_str(&urlencoding::encode(segment));
}
