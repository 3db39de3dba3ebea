//! Token sequence → document.
//!
//! The [`Detokenizer`] rebuilds a [`Document`] from a [`TokenSequence`]. It walks
//! the tokens once with a small state machine that knows which tokens the
//! tokenizer can emit next, and builds the tree directly on a stack of open
//! containers.
//!
//! | State | Accepted tokens |
//! |-------|-----------------|
//! | root | content, `{`, `[` |
//! | object member | key content, `}` (root) or `},` (nested) |
//! | member value | `:`, `:{`, `:[` |
//! | array element | `:`, `{`, `[`, `]` (root) or `],` (nested) |
//! | scalar | content |
//! | after scalar | `,` |
//!
//! Anything else is [`Error::MalformedSequence`], as is a key repeated within
//! one object or a sequence that stops before the root value is complete.
//! Content is never inspected, so a key or value containing `,}` or any other
//! punctuation survives untouched.
//!
//! ```rust
//! use serde_tokseq::{decode, doc, TokenSequence};
//!
//! let seq = TokenSequence::from_texts([
//!     "{", "test", ":", "simple text", ",",
//!     "header", ":{", "sub", ":", "sub text", ",", "},",
//!     "}",
//! ]);
//! assert_eq!(
//!     decode(&seq).unwrap(),
//!     doc!({ "test": "simple text", "header": { "sub": "sub text" } })
//! );
//! ```
//!
//! [`from_document`] and [`from_tokens`] go one step further and deserialize a
//! typed value, parsing scalar text on demand for numeric, boolean and optional
//! fields.

use crate::value::NULL_TEXT;
use crate::{Document, DocumentMap, Error, Lexeme, Result, Token, TokenSequence};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::fmt;

/// What the next token has to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expect {
    Root,
    Key,
    MemberValue,
    Element,
    Scalar,
    Comma,
    End,
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expect::Root => "a root value",
            Expect::Key => "a key or the end of an object",
            Expect::MemberValue => "':', ':{' or ':['",
            Expect::Element => "an array element or the end of an array",
            Expect::Scalar => "content after ':'",
            Expect::Comma => "',' after a scalar",
            Expect::End => "the end of the sequence",
        })
    }
}

/// An open container.
#[derive(Debug)]
enum Frame {
    Object {
        map: DocumentMap,
        key: Option<String>,
    },
    Array(Vec<Document>),
}

/// Rebuilds documents from tokens.
///
/// Feed tokens with [`Detokenizer::push`], then call [`Detokenizer::finish`].
/// The first token the tokenizer could not have produced at that point is
/// rejected immediately.
#[derive(Debug)]
pub struct Detokenizer {
    stack: Vec<Frame>,
    expect: Expect,
    root: Option<Document>,
}

impl Default for Detokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Detokenizer {
    pub fn new() -> Self {
        Detokenizer {
            stack: Vec::with_capacity(16),
            expect: Expect::Root,
            root: None,
        }
    }

    /// Consumes one token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSequence`] if `token` cannot follow the tokens
    /// pushed so far, or if it repeats a key of the enclosing object.
    pub fn push(&mut self, token: &Token) -> Result<()> {
        match token {
            Token::Content(text) => self.push_content(text),
            Token::Structural(lexeme) => self.push_lexeme(*lexeme),
        }
    }

    fn push_content(&mut self, text: &str) -> Result<()> {
        match self.expect {
            Expect::Root => {
                self.root = Some(Document::Scalar(text.to_string()));
                self.expect = Expect::End;
            }
            Expect::Key => {
                if let Some(Frame::Object { map, key }) = self.stack.last_mut() {
                    if map.contains_key(text) {
                        return Err(Error::malformed_sequence(format!(
                            "duplicate key {:?}",
                            text
                        )));
                    }
                    *key = Some(text.to_string());
                }
                self.expect = Expect::MemberValue;
            }
            Expect::Scalar => {
                self.place(Document::Scalar(text.to_string()))?;
                self.expect = Expect::Comma;
            }
            _ => return Err(self.unexpected(text)),
        }
        Ok(())
    }

    fn push_lexeme(&mut self, lexeme: Lexeme) -> Result<()> {
        match (self.expect, lexeme) {
            (Expect::Root | Expect::Element, Lexeme::ObjectOpen)
            | (Expect::MemberValue, Lexeme::ColonObjectOpen) => self.open(Frame::Object {
                map: DocumentMap::new(),
                key: None,
            }),
            (Expect::Root | Expect::Element, Lexeme::ArrayOpen)
            | (Expect::MemberValue, Lexeme::ColonArrayOpen) => self.open(Frame::Array(Vec::new())),
            (Expect::MemberValue | Expect::Element, Lexeme::Colon) => self.expect = Expect::Scalar,
            (Expect::Comma, Lexeme::Comma) => self.expect = self.after_value(),
            (Expect::Key, Lexeme::ObjectClose | Lexeme::ObjectCloseComma)
            | (Expect::Element, Lexeme::ArrayClose | Lexeme::ArrayCloseComma) => {
                self.close(lexeme)?
            }
            _ => return Err(self.unexpected(lexeme.as_str())),
        }
        Ok(())
    }

    fn open(&mut self, frame: Frame) {
        self.expect = match frame {
            Frame::Object { .. } => Expect::Key,
            Frame::Array(_) => Expect::Element,
        };
        self.stack.push(frame);
    }

    fn close(&mut self, lexeme: Lexeme) -> Result<()> {
        // The root container closes without a comma; nested ones with.
        if lexeme.ends_with_comma() != (self.stack.len() > 1) {
            return Err(self.unexpected(lexeme.as_str()));
        }
        let value = match self.stack.pop() {
            Some(Frame::Object { map, .. }) => Document::Object(map),
            Some(Frame::Array(items)) => Document::Array(items),
            None => return Err(self.unexpected(lexeme.as_str())),
        };
        self.place(value)?;
        self.expect = self.after_value();
        Ok(())
    }

    /// Attaches a finished value to the innermost open container, or makes it the root.
    fn place(&mut self, value: Document) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object { map, key }) => match key.take() {
                Some(key) => {
                    map.insert(key, value);
                }
                None => return Err(Error::malformed_sequence("object value without a key")),
            },
            Some(Frame::Array(items)) => items.push(value),
            None => self.root = Some(value),
        }
        Ok(())
    }

    fn after_value(&self) -> Expect {
        match self.stack.last() {
            Some(Frame::Object { .. }) => Expect::Key,
            Some(Frame::Array(_)) => Expect::Element,
            None => Expect::End,
        }
    }

    fn unexpected(&self, found: &str) -> Error {
        Error::malformed_sequence(format!("expected {}, found {:?}", self.expect, found))
    }

    /// Returns the decoded document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSequence`] if the sequence ended before the
    /// root value was complete.
    pub fn finish(self) -> Result<Document> {
        match (self.expect, self.root) {
            (Expect::End, Some(document)) => Ok(document),
            (expect, _) => Err(Error::malformed_sequence(format!(
                "sequence ended while expecting {}",
                expect
            ))),
        }
    }
}

/// Decodes a token sequence back into the document it encodes.
///
/// # Errors
///
/// Returns [`Error::MalformedSequence`] when `tokens` could not have been
/// produced by [`encode`](crate::encode).
pub fn decode(tokens: &TokenSequence) -> Result<Document> {
    let mut detokenizer = Detokenizer::new();
    for token in tokens {
        detokenizer.push(token).map_err(|e| {
            log::warn!("token sequence did not decode: {}", e);
            e
        })?;
    }
    detokenizer.finish().map_err(|e| {
        log::warn!("token sequence did not decode: {}", e);
        e
    })
}

/// Deserializes a typed value from a [`Document`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_tokseq::{doc, from_document};
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Page { title: String, views: u32 }
///
/// let page: Page = from_document(doc!({ "title": "Home", "views": "12" })).unwrap();
/// assert_eq!(page, Page { title: "Home".to_string(), views: 12 });
/// ```
///
/// # Errors
///
/// Returns an error if the document's shape does not match `T`, or if a scalar
/// cannot be parsed as the requested primitive.
pub fn from_document<T>(document: Document) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(DocumentDeserializer::new(document))
}

/// Decodes `tokens` and deserializes the result as `T`.
///
/// # Errors
///
/// Returns [`Error::MalformedSequence`] if decoding fails, or a deserialization
/// error if the document does not match `T`.
pub fn from_tokens<T>(tokens: &TokenSequence) -> Result<T>
where
    T: DeserializeOwned,
{
    from_document(decode(tokens)?)
}

/// A serde `Deserializer` over an owned [`Document`].
pub struct DocumentDeserializer {
    document: Document,
}

impl DocumentDeserializer {
    pub fn new(document: Document) -> Self {
        DocumentDeserializer { document }
    }

    fn into_scalar(self, expected: &str) -> Result<String> {
        match self.document {
            Document::Scalar(text) => Ok(text),
            other => Err(Error::custom(format!(
                "expected {}, found {}",
                expected, other
            ))),
        }
    }
}

fn is_null(document: &Document) -> bool {
    matches!(document, Document::Scalar(s) if s == NULL_TEXT)
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let text = self.into_scalar(stringify!($ty))?;
                let parsed: $ty = text.parse().map_err(|_| {
                    Error::custom(format!("cannot parse {:?} as {}", text, stringify!($ty)))
                })?;
                visitor.$visit(parsed)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for DocumentDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.document {
            Document::Scalar(s) => visitor.visit_string(s),
            Document::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Document::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
        deserialize_char => visit_char(char),
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if is_null(&self.document) {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if is_null(&self.document) {
            visitor.visit_unit()
        } else {
            Err(Error::custom(format!("expected null, found {}", self.document)))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.document {
            Document::Scalar(variant) => visitor.visit_enum(EnumDeserializer::new(variant, None)),
            Document::Object(obj) if obj.len() == 1 => {
                let mut entries = obj.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, Some(value)))
                    }
                    None => Err(Error::custom("expected enum variant")),
                }
            }
            other => Err(Error::custom(format!(
                "expected enum variant, found {}",
                other
            ))),
        }
    }

    forward_to_deserialize_any! {
        i128 u128 str string bytes byte_buf seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Document>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Document>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(DocumentDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Document>,
    value: Option<Document>,
}

impl MapDeserializer {
    fn new(map: DocumentMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(DocumentDeserializer::new(Document::Scalar(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(DocumentDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Document>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<Document>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let deserializer: de::value::StringDeserializer<Error> = self.variant.into_deserializer();
        let variant = seed.deserialize(deserializer)?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Document>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(document) if is_null(&document) => Ok(()),
            Some(_) => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(DocumentDeserializer::new(value)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Document::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Document::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode, to_document};
    use serde::{Deserialize, Serialize};

    fn seq(texts: &[&str]) -> TokenSequence {
        TokenSequence::from_texts(texts.iter().copied())
    }

    #[test]
    fn test_nested_containers() {
        assert_eq!(
            decode(&seq(&["{", "a", ":", "x", ",", "b", ":{", "},", "}"])).unwrap(),
            crate::doc!({ "a": "x", "b": {} })
        );
        assert_eq!(
            decode(&seq(&["[", "{", "},", "[", "],", "]"])).unwrap(),
            Document::Array(vec![Document::Object(DocumentMap::new()), Document::Array(vec![])])
        );
    }

    #[test]
    fn test_bare_array_elements() {
        assert_eq!(
            decode(&seq(&["[", ":", "a", ",", ":", "b", ",", "]"])).unwrap(),
            Document::Array(vec![Document::from("a"), Document::from("b")])
        );
        assert_eq!(
            decode(&seq(&["[", "{", "},", ":", "a", ",", "]"])).unwrap(),
            Document::Array(vec![Document::Object(DocumentMap::new()), Document::from("a")])
        );
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let err = decode(&seq(&["{", "a", ":", "x", ",", "a", ":", "y", ",", "}"])).unwrap_err();
        assert!(err.to_string().contains("duplicate key"));
        // The same key in sibling objects is fine.
        let siblings = seq(&[
            "[", "{", "a", ":", "x", ",", "},", "{", "a", ":", "y", ",", "},", "]",
        ]);
        assert!(decode(&siblings).is_ok());
    }

    #[test]
    fn test_content_punctuation_is_opaque() {
        let mut map = DocumentMap::new();
        map.insert("a,}b".to_string(), Document::from("[:x,]\r\n"));
        let doc = Document::Object(map);
        assert_eq!(decode(&encode(&doc)).unwrap(), doc);
    }

    #[test]
    fn test_colon_must_precede_content() {
        let err = decode(&seq(&["[", ":", "]"])).unwrap_err();
        assert!(err.to_string().contains("content after ':'"));
    }

    #[test]
    fn test_malformed_sequences() {
        let cases: Vec<Vec<&str>> = vec![
            vec![],
            vec!["{"],
            vec!["{", "a", ":", "b", ","],
            vec!["[", "]", "]"],
            vec!["{", "a", "b", "}"],
            vec!["[", ":", "]"],
            vec!["{", "a", ":", "b", ",", ":", "}"],
            vec!["[", ",", "]"],
            vec!["{", ",", "}"],
            vec!["[", ":{", "},", "]"],
            vec!["[", ":[", "],", "]"],
            vec!["{", "a", ":", "b", "}"],
            vec!["[", "]", ","],
            vec!["{", "a", ":{", "}", "}"],
            vec!["[", "],"],
            vec!["[", "a", "]"],
        ];
        for case in cases {
            let result = decode(&seq(&case));
            assert!(
                matches!(result, Err(Error::MalformedSequence(_))),
                "expected failure for {:?}",
                case
            );
        }
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Status {
        Draft,
        Published { at: String },
        Scored(u8),
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Post {
        id: u64,
        score: f32,
        pinned: bool,
        initial: char,
        subtitle: Option<String>,
        status: Status,
        history: Vec<Status>,
    }

    #[test]
    fn test_typed_roundtrip() {
        let post = Post {
            id: 7,
            score: 0.5,
            pinned: true,
            initial: 'q',
            subtitle: None,
            status: Status::Published {
                at: "2024-01-01".to_string(),
            },
            history: vec![Status::Draft, Status::Scored(3)],
        };
        let tokens = encode(&to_document(&post).unwrap());
        let back: Post = from_tokens(&tokens).unwrap();
        assert_eq!(back, post);
    }

    #[test]
    fn test_unparsable_scalar() {
        #[derive(Deserialize, Debug)]
        struct Counter {
            #[allow(dead_code)]
            count: u32,
        }

        let mut map = DocumentMap::new();
        map.insert("count".to_string(), Document::from("many"));
        let result: Result<Counter> = from_document(Document::Object(map));
        assert!(result.is_err());
    }
}
