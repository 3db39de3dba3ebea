//! Document → token sequence.
//!
//! This module holds the [`Tokenizer`], which flattens a [`Document`] into a
//! [`TokenSequence`], and the [`DocumentSerializer`], which turns any
//! `T: Serialize` into a `Document` first.
//!
//! ## Grammar
//!
//! Values are walked depth-first in member order. Each value sits in one of
//! three positions: the root, the value of an object member (keyed), or an array
//! element.
//!
//! | Value | Root | Keyed | Element |
//! |-------|------|-------|---------|
//! | object | `{` … `}` | `:{` … `},` | `{` … `},` |
//! | array | `[` … `]` | `:[` … `],` | `[` … `],` |
//! | scalar | text | `:` text `,` | `:` text `,` |
//!
//! Inside an object each member emits its key as a content token followed by
//! its value in keyed position.
//!
//! ```rust
//! use serde_tokseq::{doc, encode};
//!
//! let tokens = encode(&doc!([{ "test": [{}, {}] }]));
//! assert_eq!(
//!     tokens.texts(),
//!     vec!["[", "{", "test", ":[", "{", "},", "{", "},", "],", "},", "]"]
//! );
//! ```

use crate::value::{render_f64, NULL_TEXT};
use crate::{Document, DocumentMap, Error, Lexeme, Result, Token, TokenSequence};
use serde::{ser, Serialize};

/// Where a value sits relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    Root,
    Keyed,
    Element,
}

/// Flattens documents into tokens.
///
/// The tokenizer owns the accumulated sequence; call [`Tokenizer::into_inner`]
/// to take it.
///
/// ```rust
/// use serde_tokseq::{doc, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.tokenize(&doc!({ "test": {} }));
/// assert_eq!(tokenizer.into_inner().texts(), vec!["{", "test", ":{", "},", "}"]);
/// ```
#[derive(Debug, Default)]
pub struct Tokenizer {
    output: TokenSequence,
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer {
            output: TokenSequence::with_capacity(64),
        }
    }

    pub fn into_inner(self) -> TokenSequence {
        self.output
    }

    /// Appends the encoding of `document` as a root value.
    pub fn tokenize(&mut self, document: &Document) {
        self.write_value(document, Position::Root);
    }

    fn structural(&mut self, lexeme: Lexeme) {
        self.output.push(Token::Structural(lexeme));
    }

    fn content(&mut self, text: &str) {
        self.output.push(Token::Content(text.to_string()));
    }

    fn write_value(&mut self, value: &Document, position: Position) {
        match value {
            Document::Object(map) => self.write_object(map, position),
            Document::Array(items) => self.write_array(items, position),
            Document::Scalar(text) => self.write_scalar(text, position),
        }
    }

    fn write_object(&mut self, map: &DocumentMap, position: Position) {
        self.structural(match position {
            Position::Keyed => Lexeme::ColonObjectOpen,
            Position::Root | Position::Element => Lexeme::ObjectOpen,
        });
        for (key, value) in map {
            self.content(key);
            self.write_value(value, Position::Keyed);
        }
        self.structural(match position {
            Position::Root => Lexeme::ObjectClose,
            Position::Keyed | Position::Element => Lexeme::ObjectCloseComma,
        });
    }

    fn write_array(&mut self, items: &[Document], position: Position) {
        self.structural(match position {
            Position::Keyed => Lexeme::ColonArrayOpen,
            Position::Root | Position::Element => Lexeme::ArrayOpen,
        });
        for item in items {
            self.write_value(item, Position::Element);
        }
        self.structural(match position {
            Position::Root => Lexeme::ArrayClose,
            Position::Keyed | Position::Element => Lexeme::ArrayCloseComma,
        });
    }

    fn write_scalar(&mut self, text: &str, position: Position) {
        match position {
            Position::Root => self.content(text),
            Position::Keyed | Position::Element => {
                self.structural(Lexeme::Colon);
                self.content(text);
                self.structural(Lexeme::Comma);
            }
        }
    }
}

/// Encodes a document into its token sequence. Never fails.
#[must_use]
pub fn encode(document: &Document) -> TokenSequence {
    let mut tokenizer = Tokenizer::new();
    tokenizer.tokenize(document);
    tokenizer.into_inner()
}

/// Serializes Rust values into a [`Document`].
///
/// Scalars are rendered as text. Enum variants that carry data use the
/// externally tagged shape `{ "Variant": value }`.
pub struct DocumentSerializer;

pub struct SerializeVec {
    vec: Vec<Document>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: DocumentMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

fn scalar(text: impl Into<String>) -> Result<Document> {
    Ok(Document::Scalar(text.into()))
}

fn tagged(variant: &'static str, value: Document) -> Document {
    let mut map = DocumentMap::with_capacity(1);
    map.insert(variant.to_string(), value);
    Document::Object(map)
}

impl ser::Serializer for DocumentSerializer {
    type Ok = Document;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Document> {
        scalar(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<Document> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Document> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Document> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Document> {
        scalar(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<Document> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Document> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Document> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Document> {
        scalar(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<Document> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Document> {
        scalar(render_f64(v))
    }

    fn serialize_char(self, v: char) -> Result<Document> {
        scalar(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<Document> {
        scalar(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Document> {
        let vec = v.iter().map(|b| Document::Scalar(b.to_string())).collect();
        Ok(Document::Array(vec))
    }

    fn serialize_none(self) -> Result<Document> {
        scalar(NULL_TEXT)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Document>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Document> {
        scalar(NULL_TEXT)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Document> {
        scalar(NULL_TEXT)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Document> {
        scalar(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Document>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Document>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_document(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_document(value)?);
        Ok(())
    }

    fn finish(self) -> Result<Document> {
        let array = Document::Array(self.vec);
        Ok(match self.variant {
            Some(variant) => tagged(variant, array),
            None => array,
        })
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: DocumentMap::new(),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> Result<Document> {
        let object = Document::Object(self.map);
        Ok(match self.variant {
            Some(variant) => tagged(variant, object),
            None => object,
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Document;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Document> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Document;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Document> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Document;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Document> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Document;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Document> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Document;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_document(key)? {
            Document::Scalar(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::unsupported_type("map keys must be scalars")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_document(value)?);
        Ok(())
    }

    fn end(self) -> Result<Document> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Document;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_document(value)?);
        Ok(())
    }

    fn end(self) -> Result<Document> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Document;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_document(value)?);
        Ok(())
    }

    fn end(self) -> Result<Document> {
        self.finish()
    }
}

/// Converts any `T: Serialize` into a [`Document`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for map keys that are not scalars, and
/// whatever error `T`'s `Serialize` implementation raises.
pub fn to_document<T>(value: &T) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    value.serialize(DocumentSerializer)
}
