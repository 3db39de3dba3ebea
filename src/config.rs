//! Pipeline configuration.
//!
//! Configuration lives in a small YAML file:
//!
//! ```yaml
//! api_key: "secret"   # required
//! chunk_size: 128     # optional, items per translation request
//! files:              # optional, a single path or a list of paths
//!   - content/en.json
//! ```
//!
//! A missing file is the same as an empty one. The API key is only checked by
//! [`Config::validate`], which [`Pipeline::new`](crate::Pipeline::new) calls, so a
//! configuration can be loaded and inspected before it is complete.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tokseq::Config;
//!
//! let config = Config::from_str("api_key: abc\nchunk_size: 64\n").unwrap();
//! assert_eq!(config.api_key(), Some("abc"));
//! assert_eq!(config.chunk_size, 64);
//!
//! let config = Config::new().with_api_key("abc").with_chunk_size(16);
//! assert!(config.validate().is_ok());
//! ```

use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::reader::FileSet;
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Settings for a translation pipeline.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential handed to the translation service.
    pub api_key: Option<String>,
    /// Maximum content items per translation request.
    pub chunk_size: usize,
    /// Raw `files` entry; see [`Config::files`].
    pub files: Option<serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            files: None,
        }
    }
}

impl Config {
    /// Creates an empty configuration with the default chunk size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses YAML configuration text. Empty or `null` text is the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid YAML for this structure.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: Option<Config> = serde_yaml::from_str(text).map_err(Error::config)?;
        Ok(parsed.unwrap_or_default())
    }

    /// Loads configuration from a YAML file.
    ///
    /// A file that does not exist yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read, or
    /// [`Error::Config`] if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_str(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(&format!("{}: {}", path.display(), e))),
        }
    }

    /// The API key, if one is set and not blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// Checks that the configuration can drive a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] without a usable API key, or
    /// [`Error::InvalidArgument`] if `chunk_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.api_key().is_none() {
            return Err(Error::MissingApiKey);
        }
        if self.chunk_size == 0 {
            return Err(Error::invalid_argument("chunk_size must be at least 1"));
        }
        Ok(())
    }

    /// The configured file list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputType`] if `files` is neither a string nor a list of strings.
    pub fn files(&self) -> Result<FileSet> {
        match &self.files {
            Some(value) => FileSet::from_yaml(value),
            None => Ok(FileSet::default()),
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the file list from anything convertible to a [`FileSet`].
    #[must_use]
    pub fn with_files(mut self, files: impl Into<FileSet>) -> Self {
        self.files = Some(files.into().to_yaml());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_empty_text_is_default() {
        for text in ["", "   \n", "~", "null"] {
            let config = Config::from_str(text).unwrap();
            assert!(config.api_key.is_none());
            assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        }
    }

    #[test]
    fn test_missing_api_key() {
        let config = Config::from_str("chunk_size: 10").unwrap();
        assert!(matches!(config.validate(), Err(Error::MissingApiKey)));

        let blank = Config::new().with_api_key("  ");
        assert!(matches!(blank.validate(), Err(Error::MissingApiKey)));
    }

    #[test]
    fn test_zero_chunk_size() {
        let config = Config::new().with_api_key("k").with_chunk_size(0);
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Config::from_str("chunk_size: [unclosed"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_str("chunk_size: lots"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_files_shapes() {
        let single = Config::from_str("files: a.json").unwrap();
        assert_eq!(single.files().unwrap().paths(), [PathBuf::from("a.json")]);

        let list = Config::from_str("files: [a.json, b.json]").unwrap();
        assert_eq!(list.files().unwrap().len(), 2);

        let bad = Config::from_str("files: 42").unwrap();
        assert!(matches!(bad.files(), Err(Error::InputType(_))));

        let built = Config::new().with_files(vec!["x.json", "y.json"]);
        assert_eq!(built.files().unwrap().len(), 2);
    }
}
