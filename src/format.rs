//! The token format.
//!
//! This module documents the token sequence produced by [`encode`](crate::encode)
//! and accepted by [`decode`](crate::decode).
//!
//! # Overview
//!
//! A document is flattened into a list of tokens. Each token is either a
//! *structural lexeme* (JSON punctuation, sometimes fused) or *content* (an
//! object key or a scalar's text). Translating a document means translating
//! its content and leaving the structure untouched, so the two kinds are kept
//! apart by a tag on every token rather than by their text.
//!
//! ## Lexemes
//!
//! | Lexeme | Text | Emitted for |
//! |--------|------|-------------|
//! | `ObjectOpen` | `{` | object at the root or as an array element |
//! | `ObjectClose` | `}` | end of an object at the root |
//! | `ObjectCloseComma` | `},` | end of a nested object |
//! | `ArrayOpen` | `[` | array at the root or as an array element |
//! | `ArrayClose` | `]` | end of an array at the root |
//! | `ArrayCloseComma` | `],` | end of a nested array |
//! | `Colon` | `:` | before a scalar value |
//! | `ColonObjectOpen` | `:{` | object as a member value |
//! | `ColonArrayOpen` | `:[` | array as a member value |
//! | `Comma` | `,` | after a scalar value |
//!
//! ## Scalars
//!
//! Every scalar is text. Numbers, booleans and `null` in a JSON source become
//! their JSON spelling (`42`, `1.0`, `true`, `null`) and come back as strings.
//!
//! # Encoding
//!
//! ```text
//! {"test": "simple text"}
//! →  {  test  :  simple text  ,  }
//!
//! [{"test": [{}, {}]}]
//! →  [  {  test  :[  {  },  {  },  ],  },  ]
//!
//! ["a", "b"]
//! →  [  :  a  ,  :  b  ,  ]
//! ```
//!
//! A scalar at the root is a single content token with no punctuation.
//!
//! # Decoding
//!
//! Decoding accepts exactly the sequences the encoder can produce. Each token
//! must be one the grammar allows at that point:
//!
//! - a key must be followed by `:`, `:{` or `:[`;
//! - a `:` must be followed by content, then `,`;
//! - a nested container closes with `},` or `],`, the root one with `}` or `]`;
//! - a key may appear only once per object.
//!
//! Any other sequence is rejected as malformed. Content is never inspected, so
//! commas, braces or quotes inside content are never mistaken for structure.
//!
//! # Separation
//!
//! [`strip`](crate::strip) splits a sequence into its content list and a map
//! from original index to lexeme:
//!
//! ```text
//! {  test  :  simple text  ,  }
//! content:   ["test", "simple text"]
//! positions: {0: "{", 2: ":", 4: ",", 5: "}"}
//! ```
//!
//! [`restore`](crate::restore) fills indexes `0..content + positions` in order,
//! taking a lexeme where one is recorded and the next content item elsewhere.
//!
//! # Chunking
//!
//! Content is cut into runs of at most `chunk_size` items (default 128). A
//! translation service is expected to return the same number of items; the
//! pipeline rejects any other count before restoring.
//!
//! # Limitations
//!
//! - **Scalar types**: not preserved; `1` and `"1"` decode identically.
//! - **Map keys**: must be strings or scalars when serializing Rust values.
//! - **Duplicate keys**: a decoded object may not repeat a key. A translation
//!   that maps two keys to the same text is rejected, not merged.

// This module contains only documentation; no implementation code
