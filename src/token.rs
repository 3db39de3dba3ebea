//! Tokens and token sequences.
//!
//! A [`TokenSequence`] is the flat encoding of a [`Document`](crate::Document).
//! Every [`Token`] is either one of the reserved structural [`Lexeme`]s or a piece
//! of content (an object key or a scalar's text).
//!
//! The kind of a token is carried by its tag, not by its text. A key literally
//! named `","` is `Token::Content(",")`, which can never be confused with
//! `Token::Structural(Lexeme::Comma)`.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tokseq::{doc, encode, Lexeme, Token};
//!
//! let tokens = encode(&doc!({ "test": "simple text" }));
//! assert_eq!(
//!     tokens.texts(),
//!     vec!["{", "test", ":", "simple text", ",", "}"]
//! );
//! assert_eq!(tokens[0], Token::Structural(Lexeme::ObjectOpen));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// The reserved structural lexemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lexeme {
    /// `{`
    ObjectOpen,
    /// `}`
    ObjectClose,
    /// `},`
    ObjectCloseComma,
    /// `[`
    ArrayOpen,
    /// `]`
    ArrayClose,
    /// `],`
    ArrayCloseComma,
    /// `:`
    Colon,
    /// `:{`
    ColonObjectOpen,
    /// `:[`
    ColonArrayOpen,
    /// `,`
    Comma,
}

impl Lexeme {
    /// Every lexeme, in declaration order.
    pub const ALL: [Lexeme; 10] = [
        Lexeme::ObjectOpen,
        Lexeme::ObjectClose,
        Lexeme::ObjectCloseComma,
        Lexeme::ArrayOpen,
        Lexeme::ArrayClose,
        Lexeme::ArrayCloseComma,
        Lexeme::Colon,
        Lexeme::ColonObjectOpen,
        Lexeme::ColonArrayOpen,
        Lexeme::Comma,
    ];

    /// Returns the literal text of this lexeme.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tokseq::Lexeme;
    ///
    /// assert_eq!(Lexeme::ColonObjectOpen.as_str(), ":{");
    /// assert_eq!(Lexeme::ArrayCloseComma.as_str(), "],");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Lexeme::ObjectOpen => "{",
            Lexeme::ObjectClose => "}",
            Lexeme::ObjectCloseComma => "},",
            Lexeme::ArrayOpen => "[",
            Lexeme::ArrayClose => "]",
            Lexeme::ArrayCloseComma => "],",
            Lexeme::Colon => ":",
            Lexeme::ColonObjectOpen => ":{",
            Lexeme::ColonArrayOpen => ":[",
            Lexeme::Comma => ",",
        }
    }

    /// Looks up the lexeme whose text is exactly `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Lexeme> {
        Lexeme::ALL.iter().copied().find(|l| l.as_str() == text)
    }

    /// `}`, `},`, `]` or `],`.
    #[must_use]
    pub const fn is_close(&self) -> bool {
        matches!(
            self,
            Lexeme::ObjectClose
                | Lexeme::ObjectCloseComma
                | Lexeme::ArrayClose
                | Lexeme::ArrayCloseComma
        )
    }

    /// `:`, `:{` or `:[`.
    #[must_use]
    pub const fn starts_with_colon(&self) -> bool {
        matches!(
            self,
            Lexeme::Colon | Lexeme::ColonObjectOpen | Lexeme::ColonArrayOpen
        )
    }

    /// `,`, `},` or `],`.
    #[must_use]
    pub const fn ends_with_comma(&self) -> bool {
        matches!(
            self,
            Lexeme::Comma | Lexeme::ObjectCloseComma | Lexeme::ArrayCloseComma
        )
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lexeme {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Lexeme::from_text(s)
            .ok_or_else(|| crate::Error::custom(format!("{:?} is not a structural lexeme", s)))
    }
}

impl Serialize for Lexeme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Lexeme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Lexeme::from_text(&text).ok_or_else(|| {
            serde::de::Error::invalid_value(serde::de::Unexpected::Str(&text), &"a lexeme")
        })
    }
}

/// A single token: structural punctuation or content text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Structural(Lexeme),
    Content(String),
}

impl Token {
    /// Creates a content token.
    pub fn content(text: impl Into<String>) -> Self {
        Token::Content(text.into())
    }

    #[inline]
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Token::Structural(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_content(&self) -> bool {
        matches!(self, Token::Content(_))
    }

    /// The token's text, whichever kind it is.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Token::Structural(lexeme) => lexeme.as_str(),
            Token::Content(text) => text,
        }
    }

    /// Classifies `text` by string equality: reserved lexeme text becomes a
    /// structural token, anything else is content.
    #[must_use]
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        match Lexeme::from_text(&text) {
            Some(lexeme) => Token::Structural(lexeme),
            None => Token::Content(text),
        }
    }
}

impl From<Lexeme> for Token {
    fn from(lexeme: Lexeme) -> Self {
        Token::Structural(lexeme)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered sequence of tokens, the flat encoding of one document.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    #[must_use]
    pub fn new() -> Self {
        TokenSequence(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenSequence(Vec::with_capacity(capacity))
    }

    /// Builds a sequence from plain token texts.
    ///
    /// Texts equal to a reserved lexeme are taken as structural. Content that
    /// happens to equal a lexeme cannot be expressed through this constructor;
    /// use [`TokenSequence::from`] with explicit [`Token`]s for that.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tokseq::{decode, doc, TokenSequence};
    ///
    /// let seq = TokenSequence::from_texts(["{", "test", ":{", "},", "}"]);
    /// assert_eq!(decode(&seq).unwrap(), doc!({ "test": {} }));
    /// ```
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenSequence(texts.into_iter().map(Token::classify).collect())
    }

    /// Returns the text of every token, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.0.iter().map(Token::as_str).collect()
    }

    pub fn push(&mut self, token: Token) {
        self.0.push(token);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of content tokens.
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.0.iter().filter(|t| t.is_content()).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Token> {
        self.0
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        TokenSequence(tokens)
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        TokenSequence(iter.into_iter().collect())
    }
}

impl IntoIterator for TokenSequence {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.0[index]
    }
}
