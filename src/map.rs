//! Ordered map type for document objects.
//!
//! [`DocumentMap`] wraps an [`IndexMap`] so object members keep their insertion
//! order. The token encoding walks members in that order, and decoding rebuilds
//! them in the order they appear in the sequence, so a round trip preserves the
//! original member order exactly.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tokseq::{Document, DocumentMap};
//!
//! let mut map = DocumentMap::new();
//! map.insert("title".to_string(), Document::from("Hello"));
//! map.insert("body".to_string(), Document::from("World"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["title", "body"]);
//! ```

use crate::Document;
use indexmap::IndexMap;

/// An insertion-ordered map of string keys to documents.
///
/// Equality is order-sensitive: two maps with the same members in a different
/// order are different documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentMap(IndexMap<String, Document>);

impl PartialEq for DocumentMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for DocumentMap {}

impl DocumentMap {
    /// Creates an empty `DocumentMap`.
    #[must_use]
    pub fn new() -> Self {
        DocumentMap(IndexMap::new())
    }

    /// Creates an empty `DocumentMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DocumentMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present its value is replaced in place (keeping
    /// the original position) and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tokseq::{Document, DocumentMap};
    ///
    /// let mut map = DocumentMap::new();
    /// assert!(map.insert("key".to_string(), Document::from("a")).is_none());
    /// assert!(map.insert("key".to_string(), Document::from("b")).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Document) -> Option<Document> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Document> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Document> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Document> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Document> {
        self.0.iter()
    }
}

impl IntoIterator for DocumentMap {
    type Item = (String, Document);
    type IntoIter = indexmap::map::IntoIter<String, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentMap {
    type Item = (&'a String, &'a Document);
    type IntoIter = indexmap::map::Iter<'a, String, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Document)> for DocumentMap {
    fn from_iter<T: IntoIterator<Item = (String, Document)>>(iter: T) -> Self {
        DocumentMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_survives_replacement() {
        let mut map = DocumentMap::new();
        map.insert("b".to_string(), Document::from("1"));
        map.insert("a".to_string(), Document::from("2"));
        map.insert("b".to_string(), Document::from("3"));

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![("b", Document::from("3")), ("a", Document::from("2"))]
        );
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab: DocumentMap = vec![
            ("a".to_string(), Document::from("1")),
            ("b".to_string(), Document::from("2")),
        ]
        .into_iter()
        .collect();
        let ba: DocumentMap = vec![
            ("b".to_string(), Document::from("2")),
            ("a".to_string(), Document::from("1")),
        ]
        .into_iter()
        .collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_collect() {
        let map: DocumentMap = vec![
            ("x".to_string(), Document::from("1")),
            ("y".to_string(), Document::from("2")),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("y"));
    }
}
