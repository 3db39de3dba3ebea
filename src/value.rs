//! The document tree that the token codec encodes and decodes.
//!
//! A [`Document`] is an object, an array or a scalar. Scalars are always text:
//! numbers, booleans and null read from JSON are kept as their textual rendering
//! (`"42"`, `"3.5"`, `"true"`, `"null"`), because the token sequence only ever
//! carries text and the translation service only ever sees text.
//!
//! ## Creating Documents
//!
//! ```rust
//! use serde_tokseq::{doc, Document};
//!
//! let scalar = Document::from("hello");
//! let number = Document::from(42);
//! assert_eq!(number.as_str(), Some("42"));
//!
//! let tree = doc!({
//!     "title": "Hello",
//!     "tags": ["a", "b"]
//! });
//! assert!(tree.is_object());
//! ```
//!
//! ## Reading JSON
//!
//! `Document` implements `Deserialize`, so any serde data format can produce one:
//!
//! ```rust
//! use serde_tokseq::Document;
//!
//! let doc: Document = serde_json::from_str(r#"{"count": 3, "ok": true}"#).unwrap();
//! let obj = doc.as_object().unwrap();
//! assert_eq!(obj.get("count").and_then(|v| v.as_str()), Some("3"));
//! assert_eq!(obj.get("ok").and_then(|v| v.as_str()), Some("true"));
//! ```

use crate::DocumentMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A tree-shaped document: object, array or scalar text.
///
/// # Examples
///
/// ```rust
/// use serde_tokseq::{Document, DocumentMap};
///
/// let mut map = DocumentMap::new();
/// map.insert("greeting".to_string(), Document::from("hi"));
/// let doc = Document::Object(map);
///
/// assert!(doc.is_object());
/// assert_eq!(doc.get("greeting").and_then(|v| v.as_str()), Some("hi"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Document {
    Object(DocumentMap),
    Array(Vec<Document>),
    Scalar(String),
}

impl Default for Document {
    fn default() -> Self {
        Document::Object(DocumentMap::new())
    }
}

/// Renders a float the way JSON writes it (`1.0`, not `1`).
pub(crate) fn render_f64(value: f64) -> String {
    match serde_json::Number::from_f64(value) {
        Some(number) => number.to_string(),
        None => value.to_string(),
    }
}

pub(crate) const NULL_TEXT: &str = "null";

impl Document {
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Document::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Document::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Document::Scalar(_))
    }

    /// If the value is a scalar, returns its text. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Document>> {
        match self {
            Document::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&DocumentMap> {
        match self {
            Document::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up `key` when this is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Counts the scalar leaves and object keys, i.e. the content tokens the
    /// document encodes to.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tokseq::{doc, encode};
    ///
    /// let d = doc!({ "a": "x", "b": ["y", "z"] });
    /// assert_eq!(d.content_len(), 5);
    /// assert_eq!(d.content_len(), encode(&d).content_len());
    /// ```
    #[must_use]
    pub fn content_len(&self) -> usize {
        match self {
            Document::Scalar(_) => 1,
            Document::Array(items) => items.iter().map(Document::content_len).sum(),
            Document::Object(map) => map.values().map(|v| 1 + v.content_len()).sum(),
        }
    }
}

impl fmt::Display for Document {
    /// Writes the document as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Document::Scalar(s) => serializer.serialize_str(s),
            Document::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Document::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object, an array or a scalar")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Document::Scalar(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Document::Scalar(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Document::Scalar(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Document::Scalar(render_f64(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Document::Scalar(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Document::Scalar(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Document::Scalar(NULL_TEXT.to_string()))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Document::Scalar(NULL_TEXT.to_string()))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Document::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = DocumentMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Document::Object(values))
            }
        }

        deserializer.deserialize_any(DocumentVisitor)
    }
}

impl TryFrom<Document> for String {
    type Error = crate::Error;

    fn try_from(value: Document) -> crate::Result<Self> {
        match value {
            Document::Scalar(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected scalar, found {}",
                other
            ))),
        }
    }
}

impl TryFrom<Document> for i64 {
    type Error = crate::Error;

    fn try_from(value: Document) -> crate::Result<Self> {
        let text = String::try_from(value)?;
        text.trim()
            .parse()
            .map_err(|_| crate::Error::custom(format!("cannot convert {:?} to i64", text)))
    }
}

impl TryFrom<Document> for f64 {
    type Error = crate::Error;

    fn try_from(value: Document) -> crate::Result<Self> {
        let text = String::try_from(value)?;
        text.trim()
            .parse()
            .map_err(|_| crate::Error::custom(format!("cannot convert {:?} to f64", text)))
    }
}

impl TryFrom<Document> for bool {
    type Error = crate::Error;

    fn try_from(value: Document) -> crate::Result<Self> {
        let text = String::try_from(value)?;
        match text.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {:?}",
                text
            ))),
        }
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::Scalar(value.to_string())
    }
}

impl From<i32> for Document {
    fn from(value: i32) -> Self {
        Document::Scalar(value.to_string())
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Document::Scalar(value.to_string())
    }
}

impl From<u32> for Document {
    fn from(value: u32) -> Self {
        Document::Scalar(value.to_string())
    }
}

impl From<u64> for Document {
    fn from(value: u64) -> Self {
        Document::Scalar(value.to_string())
    }
}

impl From<f64> for Document {
    fn from(value: f64) -> Self {
        Document::Scalar(render_f64(value))
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::Scalar(value)
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::Scalar(value.to_string())
    }
}

impl From<Vec<Document>> for Document {
    fn from(value: Vec<Document>) -> Self {
        Document::Array(value)
    }
}

impl From<DocumentMap> for Document {
    fn from(value: DocumentMap) -> Self {
        Document::Object(value)
    }
}
