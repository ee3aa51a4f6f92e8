use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// JSON shape of a one-or-many member, decided by its first significant byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
}

/// Peek at the first non-whitespace byte of a JSON value.
///
/// `{` selects [`Shape::Object`], `[` selects [`Shape::Array`]; anything else
/// (including `null` and scalars) yields `None`.
#[must_use]
pub fn peek_shape(json: &str) -> Option<Shape> {
    match json.bytes().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Some(Shape::Object),
        Some(b'[') => Some(Shape::Array),
        _ => None,
    }
}

/// A member that holds either exactly one value or an ordered list of values.
///
/// `One(None)` encodes as `null`, `Many(vec![])` encodes as `[]`. The two are
/// distinct on the wire: an empty to-one linkage versus an empty to-many
/// linkage.
#[derive(Debug, Clone, PartialEq)]
pub enum Hybrid<T> {
    One(Option<T>),
    Many(Vec<T>),
}

/// Primary data of a document: one resource or a list of resources.
pub type HybridResource = Hybrid<crate::document::Resource>;

/// One document or a list of documents.
pub type HybridDocument = Hybrid<crate::document::Document>;

impl<T> Hybrid<T> {
    #[must_use]
    pub fn one(value: T) -> Self {
        Hybrid::One(Some(value))
    }

    #[must_use]
    pub fn many(values: Vec<T>) -> Self {
        Hybrid::Many(values)
    }

    /// The empty to-one value, encoded as `null`.
    #[must_use]
    pub fn null() -> Self {
        Hybrid::One(None)
    }

    #[must_use]
    pub fn as_one(&self) -> Option<&T> {
        match self {
            Hybrid::One(one) => one.as_ref(),
            Hybrid::Many(_) => None,
        }
    }

    #[must_use]
    pub fn as_many(&self) -> Option<&[T]> {
        match self {
            Hybrid::Many(many) => Some(many),
            Hybrid::One(_) => None,
        }
    }

    #[must_use]
    pub fn is_many(&self) -> bool {
        matches!(self, Hybrid::Many(_))
    }

    /// `true` for `One(None)` and for an empty `Many`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Hybrid::One(one) => one.is_none(),
            Hybrid::Many(many) => many.is_empty(),
        }
    }

    /// Iterate over the held values regardless of shape.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Hybrid::One(one) => one.as_slice().iter(),
            Hybrid::Many(many) => many.iter(),
        }
    }

    /// Flatten into a list, dropping the shape.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Hybrid::One(one) => one.into_iter().collect(),
            Hybrid::Many(many) => many,
        }
    }
}

impl<T> Default for Hybrid<T> {
    fn default() -> Self {
        Hybrid::One(None)
    }
}

impl<T: Serialize> Serialize for Hybrid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Hybrid::Many(many) => many.serialize(serializer),
            Hybrid::One(one) => one.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Hybrid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        decode_raw(raw.get()).map_err(D::Error::custom)
    }
}

/// Decode a one-or-many value from JSON text.
pub(crate) fn decode_raw<T: DeserializeOwned>(json: &str) -> Result<Hybrid<T>, String> {
    match peek_shape(json) {
        Some(Shape::Object) => serde_json::from_str(json)
            .map(Hybrid::one)
            .map_err(|e| e.to_string()),
        Some(Shape::Array) => serde_json::from_str(json)
            .map(Hybrid::Many)
            .map_err(|e| e.to_string()),
        None => Err("expected data to be an object or array".to_string()),
    }
}

/// `deserialize_with` helper for optional one-or-many members where an explicit
/// `null` is meaningful: it becomes `Some(Hybrid::One(None))`, while an absent
/// member stays `None` through `#[serde(default)]`.
pub(crate) fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Hybrid<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    if raw.get().trim() == "null" {
        return Ok(Some(Hybrid::null()));
    }
    decode_raw(raw.get()).map(Some).map_err(D::Error::custom)
}
