//! Translating documents end to end.
//!
//! A [`Pipeline`] ties the codec together: it encodes a document, strips the
//! structure, chunks the content and hands the chunks to a [`Translator`]. The
//! translated chunks are then reassembled, checked against the original shape,
//! restored and decoded.
//!
//! The service itself is behind the [`Translator`] trait, so the pipeline never
//! performs network I/O on its own.
//!
//! ```rust
//! use serde_tokseq::{doc, Chunk, Config, Pipeline, Result, TranslationRequest, Translator};
//!
//! struct Upper;
//!
//! impl Translator for Upper {
//!     fn translate(&mut self, request: &TranslationRequest<'_>) -> Result<Vec<Chunk>> {
//!         Ok(request
//!             .chunks
//!             .iter()
//!             .map(|chunk| chunk.iter().map(|s| s.to_uppercase()).collect())
//!             .collect())
//!     }
//! }
//!
//! let pipeline = Pipeline::new(Config::new().with_api_key("key")).unwrap();
//! let out = pipeline
//!     .translate_document("FR", &doc!({ "title": "hello" }), &mut Upper)
//!     .unwrap();
//! assert_eq!(out, doc!({ "TITLE": "HELLO" }));
//! ```

use crate::chunk::{chunk, unchunk, Chunk};
use crate::reader::{read_files, FileSet, SourceFile};
use crate::{decode, encode, restore, strip, Config, Document, Error, Result, SeparatedForm};

/// One call to a translation service.
#[derive(Clone, Copy, Debug)]
pub struct TranslationRequest<'a> {
    pub api_key: &'a str,
    /// Target language code, passed through untouched.
    pub target: &'a str,
    pub chunks: &'a [Chunk],
}

/// A translation service.
///
/// Implementations must return one chunk per requested chunk, in order, each
/// with the same number of items. The pipeline only checks the total count.
pub trait Translator {
    /// Translates every chunk of `request`.
    ///
    /// # Errors
    ///
    /// Any error is propagated unchanged and aborts the current document.
    fn translate(&mut self, request: &TranslationRequest<'_>) -> Result<Vec<Chunk>>;
}

impl<T: Translator + ?Sized> Translator for &mut T {
    fn translate(&mut self, request: &TranslationRequest<'_>) -> Result<Vec<Chunk>> {
        (**self).translate(request)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&mut self, request: &TranslationRequest<'_>) -> Result<Vec<Chunk>> {
        (**self).translate(request)
    }
}

/// The outbound half of a translation: structure kept aside, content chunked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedDocument {
    pub form: SeparatedForm,
    pub chunks: Vec<Chunk>,
}

/// Drives documents through encode, strip, chunk, translate and back.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Creates a pipeline from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] or [`Error::InvalidArgument`] from
    /// [`Config::validate`].
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Pipeline { config })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes, strips and chunks `document`.
    ///
    /// # Errors
    ///
    /// Only fails if the configured chunk size is invalid.
    pub fn prepare(&self, document: &Document) -> Result<PreparedDocument> {
        let tokens = encode(document);
        let form = strip(&tokens);
        let chunks = chunk(form.content(), self.config.chunk_size)?;
        log::debug!(
            "prepared {} tokens, {} content items, {} chunks",
            tokens.len(),
            form.content().len(),
            chunks.len()
        );
        Ok(PreparedDocument { form, chunks })
    }

    /// Rebuilds a document from a prepared form and its translated chunks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the translated content does not have
    /// as many items as the original, or [`Error::MalformedSequence`] if the
    /// restored tokens do not decode.
    pub fn finish(&self, prepared: PreparedDocument, translated: Vec<Chunk>) -> Result<Document> {
        let content = unchunk(translated);
        let form = prepared.form.with_content(content).map_err(|e| {
            log::warn!("translated content does not fit the document: {}", e);
            e
        })?;
        decode(&restore(&form)?)
    }

    /// Translates one document.
    ///
    /// A document with no content is returned without calling `translator`.
    ///
    /// # Errors
    ///
    /// Propagates errors from `translator` and from [`Pipeline::finish`].
    pub fn translate_document<T>(
        &self,
        target: &str,
        document: &Document,
        translator: &mut T,
    ) -> Result<Document>
    where
        T: Translator + ?Sized,
    {
        let prepared = self.prepare(document)?;
        let translated = if prepared.chunks.is_empty() {
            Vec::new()
        } else {
            let api_key = self.config.api_key().ok_or(Error::MissingApiKey)?;
            for (i, c) in prepared.chunks.iter().enumerate() {
                log::trace!("submitting chunk {} with {} items", i, c.len());
            }
            translator.translate(&TranslationRequest {
                api_key,
                target,
                chunks: &prepared.chunks,
            })?
        };
        self.finish(prepared, translated)
    }

    /// Reads every file in `files` and translates each one.
    ///
    /// # Errors
    ///
    /// Stops at the first file that cannot be read or translated.
    pub fn translate<F, T>(
        &self,
        target: &str,
        files: F,
        translator: &mut T,
    ) -> Result<Vec<SourceFile>>
    where
        F: Into<FileSet>,
        T: Translator + ?Sized,
    {
        let sources = read_files(&files.into())?;
        sources
            .into_iter()
            .map(|source| {
                log::debug!("translating {} into {}", source.path.display(), target);
                let content = self.translate_document(target, &source.content, translator)?;
                Ok(SourceFile {
                    path: source.path,
                    content,
                })
            })
            .collect()
    }

    /// Translates the files listed in the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputType`] for a malformed `files` entry, then behaves
    /// like [`Pipeline::translate`].
    pub fn translate_configured<T>(&self, target: &str, translator: &mut T) -> Result<Vec<SourceFile>>
    where
        T: Translator + ?Sized,
    {
        let files = self.config.files()?;
        self.translate(target, files, translator)
    }
}
