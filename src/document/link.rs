use super::Map;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single link member.
///
/// Members typed `Option<Link>` are omitted when `None`. `Some(Link::Null)` is
/// written as an explicit JSON `null`, which JSON:API uses to say that a
/// pagination link is unavailable.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    Null,
    Url(String),
    /// Link object form: `{"href": "...", "meta": {...}}`.
    Object { href: String, meta: Map },
}

impl Link {
    /// Target URL, `None` for [`Link::Null`].
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match self {
            Link::Null => None,
            Link::Url(href) | Link::Object { href, .. } => Some(href),
        }
    }
}

impl From<&str> for Link {
    fn from(href: &str) -> Self {
        Link::Url(href.to_string())
    }
}

impl From<String> for Link {
    fn from(href: String) -> Self {
        Link::Url(href)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Link::Null => serializer.serialize_none(),
            Link::Url(href) => serializer.serialize_str(href),
            Link::Object { href, meta } => {
                let len = if meta.is_empty() { 1 } else { 2 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("href", href)?;
                if !meta.is_empty() {
                    map.serialize_entry("meta", meta)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Link::Null),
            Value::String(href) => Ok(Link::Url(href)),
            Value::Object(mut object) => {
                let href = match object.remove("href") {
                    Some(Value::String(href)) => href,
                    _ => return Err(D::Error::custom("link object requires a string href")),
                };
                let meta = match object.remove("meta") {
                    None | Some(Value::Null) => Map::new(),
                    Some(Value::Object(meta)) => meta,
                    Some(_) => return Err(D::Error::custom("link meta must be an object")),
                };
                Ok(Link::Object { href, meta })
            }
            other => Err(D::Error::custom(format!("invalid link {other}"))),
        }
    }
}

/// Keeps an explicit `null` as `Some(Link::Null)`; absence is handled by `#[serde(default)]`.
fn deserialize_optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Link>, D::Error> {
    Link::deserialize(deserializer).map(Some)
}

/// Links related to a document's primary data, also used on resources.
///
/// See: <https://jsonapi.org/format/#document-links>.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLinks {
    #[serde(
        rename = "self",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional"
    )]
    pub self_link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_optional")]
    pub related: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_optional")]
    pub first: Option<Link>,
    #[serde(
        rename = "prev",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional"
    )]
    pub previous: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_optional")]
    pub next: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_optional")]
    pub last: Option<Link>,
}

impl DocumentLinks {
    /// Links with only `self` set.
    #[must_use]
    pub fn with_self(href: impl Into<String>) -> Self {
        Self {
            self_link: Some(Link::Url(href.into())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.self_link.is_none()
            && self.related.is_none()
            && self.first.is_none()
            && self.previous.is_none()
            && self.next.is_none()
            && self.last.is_none()
    }
}
