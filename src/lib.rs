//! # serde_tokseq
//!
//! A reversible document ↔ token codec for translating structured JSON content.
//!
//! ## What is it for?
//!
//! Machine translation services take a flat list of text items, not nested
//! JSON. This crate flattens a document into a sequence of tokens, separates
//! the structural punctuation from the translatable text, cuts the text into
//! bounded batches, and puts everything back together once the translated text
//! returns, so the result has exactly the shape of the input.
//!
//! ## Key Features
//!
//! - **Lossless**: `decode(encode(doc)) == doc` for every document
//! - **Tagged Tokens**: content that looks like punctuation (`","`, `"}"`) is never
//!   mistaken for structure
//! - **Serde Compatible**: turn any `T: Serialize` into tokens and back via
//!   [`to_tokens`] and [`from_tokens`]
//! - **Pluggable Service**: the [`Translator`] trait keeps network I/O out of the codec
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_tokseq::{decode, doc, encode, restore, strip};
//!
//! let document = doc!({ "title": "Hello", "tags": ["a", "b"] });
//!
//! let tokens = encode(&document);
//! let form = strip(&tokens);
//! assert_eq!(form.content(), ["title", "Hello", "tags", "a", "b"]);
//!
//! let back = decode(&restore(&form).unwrap()).unwrap();
//! assert_eq!(back, document);
//! ```
//!
//! ### Typed Values
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tokseq::{from_tokens, to_tokens};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Page {
//!     title: String,
//!     views: u32,
//! }
//!
//! let page = Page { title: "Home".to_string(), views: 3 };
//! let tokens = to_tokens(&page).unwrap();
//! assert_eq!(tokens.texts(), vec!["{", "title", ":", "Home", ",", "views", ":", "3", ",", "}"]);
//!
//! let back: Page = from_tokens(&tokens).unwrap();
//! assert_eq!(back, page);
//! ```
//!
//! ## Format
//!
//! See the [`format`] module for the token grammar.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Encoding and decoding a document
//! - **`macro.rs`** - Building documents with the doc! macro
//! - **`separation.rs`** - Stripping, chunking and restoring content
//! - **`translation_pipeline.rs`** - Running files through a mock translator
//!
//! Run any example with: `cargo run --example <name>`

pub mod chunk;
pub mod config;
pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod pipeline;
pub mod reader;
pub mod separator;
pub mod ser;
pub mod token;
pub mod value;

pub use chunk::{chunk, unchunk, Chunk, DEFAULT_CHUNK_SIZE};
pub use config::Config;
pub use de::{decode, from_document, from_tokens, Detokenizer, DocumentDeserializer};
pub use error::{Error, Result};
pub use map::DocumentMap;
pub use pipeline::{Pipeline, PreparedDocument, TranslationRequest, Translator};
pub use reader::{read_document, read_files, FileSet, SourceFile};
pub use separator::{restore, strip, PositionMap, SeparatedForm};
pub use ser::{encode, to_document, DocumentSerializer, Tokenizer};
pub use token::{Lexeme, Token, TokenSequence};
pub use value::Document;

use serde::Serialize;

/// Serialize any `T: Serialize` straight to a token sequence.
///
/// # Examples
///
/// ```rust
/// use serde_tokseq::to_tokens;
///
/// let tokens = to_tokens(&vec!["one", "two"]).unwrap();
/// assert_eq!(tokens.texts(), vec!["[", ":", "one", ",", ":", "two", ",", "]"]);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a document (e.g.
/// a map with compound keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_tokens<T>(value: &T) -> Result<TokenSequence>
where
    T: ?Sized + Serialize,
{
    Ok(encode(&to_document(value)?))
}
