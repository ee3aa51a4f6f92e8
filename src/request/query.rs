//! Query-string decoding for `include`, `sort`, `page[...]`, `fields[...]` and `filter[...]`.

use crate::error::Error;
use std::collections::{BTreeMap, HashMap};

/// Query parameters recognized by the resolver.
///
/// Numeric page members use `0` for "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub include: Vec<String>,
    pub sorting: Vec<String>,
    pub page_number: u64,
    pub page_size: u64,
    pub page_offset: u64,
    pub page_limit: u64,
    pub page_before: Option<String>,
    pub page_after: Option<String>,
    pub fields: BTreeMap<String, Vec<String>>,
    pub filters: BTreeMap<String, Vec<String>>,
}

/// Group decoded pairs by key, keeping first-seen key order and value order.
fn group_pairs(raw: &str) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match positions.get(key.as_ref()) {
            Some(&i) => grouped[i].1.push(value.into_owned()),
            None => {
                positions.insert(key.to_string(), grouped.len());
                grouped.push((key.into_owned(), vec![value.into_owned()]));
            }
        }
    }
    grouped
}

fn split_values(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::to_string)
}

fn single_value<'a>(key: &str, values: &'a [String]) -> Result<&'a str, Error> {
    match values {
        [value] => Ok(value),
        _ => Err(Error::bad_request_param("more than one value", key)),
    }
}

fn page_number(key: &str, values: &[String]) -> Result<u64, Error> {
    let value = single_value(key, values)?;
    let n: i64 = value
        .parse()
        .map_err(|_| Error::bad_request_param("not a number", key))?;
    u64::try_from(n).map_err(|_| Error::bad_request_param("negative number", key))
}

/// `fields[posts]` → `Some("posts")` for `prefix == "fields"`.
fn bracketed<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?
        .strip_prefix('[')?
        .strip_suffix(']')
}

/// Decode a raw query string (with or without the leading `?`).
///
/// Keys that do not match a recognized pattern are ignored.
pub fn decode_query(raw: &str) -> Result<QueryParams, Error> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut params = QueryParams::default();

    for (key, values) in group_pairs(raw) {
        match key.as_str() {
            "include" => params.include.extend(split_values(&values)),
            "sort" => params.sorting.extend(split_values(&values)),
            "page[number]" => params.page_number = page_number(&key, &values)?,
            "page[size]" => params.page_size = page_number(&key, &values)?,
            "page[offset]" => params.page_offset = page_number(&key, &values)?,
            "page[limit]" => params.page_limit = page_number(&key, &values)?,
            "page[before]" => params.page_before = Some(single_value(&key, &values)?.to_string()),
            "page[after]" => params.page_after = Some(single_value(&key, &values)?.to_string()),
            _ => {
                if let Some(typ) = bracketed(&key, "fields") {
                    params
                        .fields
                        .entry(typ.to_string())
                        .or_default()
                        .extend(split_values(&values));
                } else if let Some(typ) = bracketed(&key, "filter") {
                    params
                        .filters
                        .entry(typ.to_string())
                        .or_default()
                        .extend(split_values(&values));
                }
            }
        }
    }

    Ok(params)
}

/// Cross-check the page members.
///
/// Page-based pagination needs both number and size, offset-based needs a
/// limit whenever an offset is given, and the two forms cannot be mixed.
pub fn validate_pagination(params: &QueryParams) -> Result<(), Error> {
    if params.page_number > 0 && params.page_size == 0 {
        return Err(Error::bad_request_param(
            "missing page size",
            "page[number]",
        ));
    }
    if params.page_size > 0 && params.page_number == 0 {
        return Err(Error::bad_request_param(
            "missing page number",
            "page[size]",
        ));
    }
    if params.page_offset > 0 && params.page_limit == 0 {
        return Err(Error::bad_request_param(
            "missing page limit",
            "page[limit]",
        ));
    }
    if params.page_number > 0 && (params.page_offset > 0 || params.page_limit > 0) {
        let parameter = if params.page_offset > 0 {
            "page[offset]"
        } else {
            "page[limit]"
        };
        return Err(Error::bad_request_param(
            "page and offset pagination cannot be mixed",
            parameter,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_and_sort_keep_encounter_order() {
        let q = decode_query("include=bar&sort=-b,a&include=baz,qux").unwrap();
        assert_eq!(q.include, vec!["bar", "baz", "qux"]);
        assert_eq!(q.sorting, vec!["-b", "a"]);
    }

    #[test]
    fn test_leading_question_mark() {
        let q = decode_query("?include=a").unwrap();
        assert_eq!(q.include, vec!["a"]);
    }

    #[test]
    fn test_encoded_brackets() {
        let q = decode_query("fields%5Bposts%5D=title%2Cbody&page%5Bnumber%5D=2&page%5Bsize%5D=5")
            .unwrap();
        assert_eq!(q.fields.get("posts"), Some(&vec!["title".to_string(), "body".to_string()]));
        assert_eq!((q.page_number, q.page_size), (2, 5));
    }

    #[test]
    fn test_page_errors() {
        let err = decode_query("page[size]=bar").unwrap_err();
        assert_eq!(err.detail.as_deref(), Some("not a number"));

        let err = decode_query("page[limit]=1&page[limit]=2").unwrap_err();
        assert_eq!(err.detail.as_deref(), Some("more than one value"));
        assert_eq!(
            err.source.and_then(|s| s.parameter).as_deref(),
            Some("page[limit]")
        );

        let err = decode_query("page[offset]=-1").unwrap_err();
        assert_eq!(err.detail.as_deref(), Some("negative number"));
    }

    #[test]
    fn test_cursor_pagination() {
        let q = decode_query("page[after]=abc&page[before]=xyz").unwrap();
        assert_eq!(q.page_after.as_deref(), Some("abc"));
        assert_eq!(q.page_before.as_deref(), Some("xyz"));
        assert!(decode_query("page[after]=a&page[after]=b").is_err());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let q = decode_query("foo=bar&fields=x&filter[]=y&page[cursor]=1").unwrap();
        assert_eq!(q.filters.get(""), Some(&vec!["y".to_string()]));
        assert!(q.fields.is_empty());
        assert_eq!(q.include, Vec::<String>::new());
    }

    #[test]
    fn test_validate_pagination() {
        let ok = QueryParams {
            page_offset: 10,
            page_limit: 5,
            ..QueryParams::default()
        };
        assert!(validate_pagination(&ok).is_ok());

        let limit_only = QueryParams {
            page_limit: 5,
            ..QueryParams::default()
        };
        assert!(validate_pagination(&limit_only).is_ok());

        let number_only = QueryParams {
            page_number: 1,
            ..QueryParams::default()
        };
        let err = validate_pagination(&number_only).unwrap_err();
        assert_eq!(
            err.source.and_then(|s| s.parameter).as_deref(),
            Some("page[number]")
        );

        let size_only = QueryParams {
            page_size: 1,
            ..QueryParams::default()
        };
        let err = validate_pagination(&size_only).unwrap_err();
        assert_eq!(
            err.source.and_then(|s| s.parameter).as_deref(),
            Some("page[size]")
        );

        let offset_only = QueryParams {
            page_offset: 1,
            ..QueryParams::default()
        };
        let err = validate_pagination(&offset_only).unwrap_err();
        assert_eq!(
            err.source.and_then(|s| s.parameter).as_deref(),
            Some("page[limit]")
        );

        let mixed = QueryParams {
            page_number: 1,
            page_size: 1,
            page_offset: 1,
            page_limit: 1,
            ..QueryParams::default()
        };
        let err = validate_pagination(&mixed).unwrap_err();
        assert_eq!(
            err.source.and_then(|s| s.parameter).as_deref(),
            Some("page[offset]")
        );

        let limit_with_pages = QueryParams {
            page_number: 1,
            page_size: 2,
            page_limit: 5,
            ..QueryParams::default()
        };
        let err = validate_pagination(&limit_with_pages).unwrap_err();
        assert_eq!(
            err.source.and_then(|s| s.parameter).as_deref(),
            Some("page[limit]")
        );
    }

    #[test]
    fn test_many_distinct_keys_keep_order() {
        let raw: Vec<String> = (0..500)
            .map(|i| format!("filter[f{i}]=v{i}&include=r{i}"))
            .collect();
        let q = decode_query(&raw.join("&")).unwrap();
        assert_eq!(q.filters.len(), 500);
        assert_eq!(q.filters.get("f499"), Some(&vec!["v499".to_string()]));
        assert_eq!(q.include.len(), 500);
        assert_eq!(q.include.first().map(String::as_str), Some("r0"));
        assert_eq!(q.include.last().map(String::as_str), Some("r499"));
    }
}
