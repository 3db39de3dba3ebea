//! Splitting structure from content and putting it back.
//!
//! [`strip`] pulls every structural token out of a [`TokenSequence`], leaving a
//! content-only list suitable for a translation service, and records which
//! lexeme stood at which original index. [`restore`] reverses it.
//!
//! ```rust
//! use serde_tokseq::{doc, encode, restore, strip, Lexeme};
//!
//! let tokens = encode(&doc!({ "test": "simple text" }));
//! let form = strip(&tokens);
//!
//! assert_eq!(form.content(), ["test", "simple text"]);
//! assert_eq!(
//!     form.positions().iter().collect::<Vec<_>>(),
//!     vec![
//!         (0, Lexeme::ObjectOpen),
//!         (2, Lexeme::Colon),
//!         (4, Lexeme::Comma),
//!         (5, Lexeme::ObjectClose),
//!     ]
//! );
//! assert_eq!(restore(&form).unwrap(), tokens);
//! ```

use crate::{Error, Lexeme, Result, Token, TokenSequence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Original index → structural lexeme, always iterated in ascending index order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionMap(BTreeMap<usize, Lexeme>);

impl PositionMap {
    #[must_use]
    pub fn new() -> Self {
        PositionMap(BTreeMap::new())
    }

    pub fn insert(&mut self, index: usize, lexeme: Lexeme) -> Option<Lexeme> {
        self.0.insert(index, lexeme)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Lexeme> {
        self.0.get(&index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Lexeme)> + '_ {
        self.0.iter().map(|(index, lexeme)| (*index, *lexeme))
    }

    fn last_index(&self) -> Option<usize> {
        self.0.keys().next_back().copied()
    }
}

impl FromIterator<(usize, Lexeme)> for PositionMap {
    fn from_iter<T: IntoIterator<Item = (usize, Lexeme)>>(iter: T) -> Self {
        PositionMap(iter.into_iter().collect())
    }
}

/// A token sequence split into its content and the positions of its structure.
///
/// The form is serializable so the outbound half (strip, send) and the inbound
/// half (receive, restore) can run in different processes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatedForm {
    content: Vec<String>,
    positions: PositionMap,
}

impl SeparatedForm {
    /// Builds a form from its parts.
    ///
    /// Nothing is checked here; [`restore`] rejects parts that do not fit together.
    #[must_use]
    pub fn from_parts(content: Vec<String>, positions: PositionMap) -> Self {
        SeparatedForm { content, positions }
    }

    #[must_use]
    pub fn content(&self) -> &[String] {
        &self.content
    }

    #[must_use]
    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    /// Length of the token sequence this form restores to.
    #[must_use]
    pub fn token_len(&self) -> usize {
        self.content.len() + self.positions.len()
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, PositionMap) {
        (self.content, self.positions)
    }

    /// Replaces the content with processed text of the same length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tokseq::{decode, doc, encode, restore, strip};
    ///
    /// let form = strip(&encode(&doc!({ "greeting": "hello" })));
    /// let shouted = form.content().iter().map(|s| s.to_uppercase()).collect();
    /// let form = form.with_content(shouted).unwrap();
    /// assert_eq!(decode(&restore(&form).unwrap()).unwrap(), doc!({ "GREETING": "HELLO" }));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `content` has a different length.
    pub fn with_content(self, content: Vec<String>) -> Result<Self> {
        if content.len() != self.content.len() {
            return Err(Error::shape_mismatch(self.content.len(), content.len()));
        }
        Ok(SeparatedForm {
            content,
            positions: self.positions,
        })
    }
}

/// Separates structural tokens from content. Never fails.
#[must_use]
pub fn strip(tokens: &TokenSequence) -> SeparatedForm {
    let mut content = Vec::with_capacity(tokens.content_len());
    let mut positions = PositionMap::new();
    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Structural(lexeme) => {
                positions.insert(index, *lexeme);
            }
            Token::Content(text) => content.push(text.clone()),
        }
    }
    SeparatedForm { content, positions }
}

/// Re-interleaves structure and content into the original token sequence.
///
/// Lexemes are placed in ascending index order, each landing exactly at its
/// recorded index; every other slot takes the next content item.
///
/// # Errors
///
/// Returns [`Error::MalformedSequence`] if a recorded index lies beyond the
/// combined length of content and structure. Forms produced by [`strip`] always
/// restore.
pub fn restore(form: &SeparatedForm) -> Result<TokenSequence> {
    let total = form.token_len();
    if let Some(last) = form.positions.last_index() {
        if last >= total {
            return Err(Error::malformed_sequence(format!(
                "structural index {} out of range for {} tokens",
                last, total
            )));
        }
    }

    let mut content = form.content.iter();
    let mut tokens = TokenSequence::with_capacity(total);
    for index in 0..total {
        let token = match form.positions.get(index) {
            Some(lexeme) => Token::Structural(lexeme),
            None => match content.next() {
                Some(text) => Token::Content(text.clone()),
                None => {
                    return Err(Error::malformed_sequence(
                        "content exhausted before structure",
                    ))
                }
            },
        };
        tokens.push(token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_counts() {
        let tokens = TokenSequence::from_texts(["[", "{", "k", ":", "v", ",", "},", "]"]);
        let form = strip(&tokens);
        assert_eq!(form.content(), ["k", "v"]);
        assert_eq!(form.positions().len(), 6);
        assert_eq!(form.token_len(), tokens.len());
    }

    #[test]
    fn test_lexeme_like_content_stays_in_content() {
        let tokens = TokenSequence::from(vec![
            Token::Structural(Lexeme::ObjectOpen),
            Token::content(","),
            Token::Structural(Lexeme::Colon),
            Token::content("}"),
            Token::Structural(Lexeme::Comma),
            Token::Structural(Lexeme::ObjectClose),
        ]);
        let form = strip(&tokens);
        assert_eq!(form.content(), [",", "}"]);
        assert_eq!(restore(&form).unwrap(), tokens);
    }

    #[test]
    fn test_empty() {
        let form = strip(&TokenSequence::new());
        assert_eq!(form, SeparatedForm::default());
        assert!(restore(&form).unwrap().is_empty());
    }

    #[test]
    fn test_restore_rejects_out_of_range_positions() {
        let positions: PositionMap = vec![(0, Lexeme::ObjectOpen), (5, Lexeme::ObjectClose)]
            .into_iter()
            .collect();
        let form = SeparatedForm::from_parts(vec!["a".to_string()], positions);
        assert!(matches!(restore(&form), Err(Error::MalformedSequence(_))));
    }

    #[test]
    fn test_with_content_checks_length() {
        let form = strip(&TokenSequence::from_texts(["{", "a", ":", "b", ",", "}"]));
        let err = form.clone().with_content(vec!["x".to_string()]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { expected: 2, found: 1 }));
        assert!(form.with_content(vec!["x".into(), "y".into()]).is_ok());
    }

    #[test]
    fn test_form_serializes_with_lexeme_text() {
        let form = strip(&TokenSequence::from_texts(["{", "a", ":", "b", ",", "}"]));
        let json = serde_json::to_string(&form).unwrap();
        assert_eq!(
            json,
            r#"{"content":["a","b"],"positions":{"0":"{","2":":","4":",","5":"}"}}"#
        );
        let back: SeparatedForm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, form);
    }
}
