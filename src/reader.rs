//! Reading JSON documents from disk.
//!
//! [`FileSet`] normalizes "one path or many" into an ordered list, and
//! [`read_files`] loads every path into a [`Document`], stopping at the first
//! failure.

use crate::{Document, Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An ordered list of document paths.
///
/// A single path converts into a one-element set:
///
/// ```rust
/// use serde_tokseq::FileSet;
///
/// assert_eq!(FileSet::from("a.json").len(), 1);
/// assert_eq!(FileSet::from(vec!["a.json", "b.json"]).len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSet(Vec<PathBuf>);

impl FileSet {
    #[must_use]
    pub fn new() -> Self {
        FileSet(Vec::new())
    }

    /// Reads a file list from a YAML value: a string or a sequence of strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputType`] for any other shape.
    pub fn from_yaml(value: &serde_yaml::Value) -> Result<Self> {
        const MSG: &str = "Files must be a string or a list.";
        match value {
            serde_yaml::Value::String(path) => Ok(FileSet::from(path.as_str())),
            serde_yaml::Value::Sequence(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(PathBuf::from)
                        .ok_or_else(|| Error::input_type(MSG))
                })
                .collect::<Result<Vec<_>>>()
                .map(FileSet),
            _ => Err(Error::input_type(MSG)),
        }
    }

    pub(crate) fn to_yaml(&self) -> serde_yaml::Value {
        serde_yaml::Value::Sequence(
            self.0
                .iter()
                .map(|p| serde_yaml::Value::String(p.to_string_lossy().into_owned()))
                .collect(),
        )
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.0.push(path.into());
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }
}

impl From<&str> for FileSet {
    fn from(path: &str) -> Self {
        FileSet(vec![PathBuf::from(path)])
    }
}

impl From<String> for FileSet {
    fn from(path: String) -> Self {
        FileSet(vec![PathBuf::from(path)])
    }
}

impl From<&Path> for FileSet {
    fn from(path: &Path) -> Self {
        FileSet(vec![path.to_path_buf()])
    }
}

impl From<PathBuf> for FileSet {
    fn from(path: PathBuf) -> Self {
        FileSet(vec![path])
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for FileSet {
    fn from(paths: Vec<P>) -> Self {
        FileSet(paths.into_iter().map(Into::into).collect())
    }
}

impl<P: AsRef<Path>> From<&[P]> for FileSet {
    fn from(paths: &[P]) -> Self {
        FileSet(paths.iter().map(|p| p.as_ref().to_path_buf()).collect())
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for FileSet {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        FileSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A document together with the path it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: Document,
}

/// Reads and parses one JSON document.
///
/// # Errors
///
/// - [`Error::FileNotFound`] if `path` does not exist
/// - [`Error::Io`] for any other read failure
/// - [`Error::InvalidDocument`] if the text is not valid JSON
pub fn read_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::file_not_found(path),
        _ => Error::io(&format!("{}: {}", path.display(), e)),
    })?;
    serde_json::from_str(&text).map_err(|e| Error::invalid_document(path, e))
}

/// Reads every file in `files`, in order.
///
/// # Errors
///
/// Returns the first error from [`read_document`]; no partial result is returned.
pub fn read_files(files: &FileSet) -> Result<Vec<SourceFile>> {
    files
        .iter()
        .map(|path| {
            log::debug!("reading {}", path.display());
            Ok(SourceFile {
                path: path.clone(),
                content: read_document(path)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_yaml_rejects_mixed_list() {
        let value: serde_yaml::Value = serde_yaml::from_str("[a.json, 3]").unwrap();
        let err = FileSet::from_yaml(&value).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input type: Files must be a string or a list."
        );
    }

    #[test]
    fn test_yaml_roundtrip() {
        let files = FileSet::from(vec!["a.json", "b/c.json"]);
        assert_eq!(FileSet::from_yaml(&files.to_yaml()).unwrap(), files);
    }

    #[test]
    fn test_read_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "Hi", "n": 2}}"#).unwrap();
        let doc = read_document(file.path()).unwrap();
        assert_eq!(doc.get("title"), Some(&Document::from("Hi")));
        assert_eq!(doc.get("n"), Some(&Document::from("2")));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            read_document(&missing),
            Err(Error::FileNotFound { path }) if path == missing
        ));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            read_document(file.path()),
            Err(Error::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_read_files_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        fs::write(&good, "[]").unwrap();
        let files = FileSet::from(vec![good.clone(), dir.path().join("bad.json")]);
        assert!(matches!(read_files(&files), Err(Error::FileNotFound { .. })));

        let read = read_files(&FileSet::from(good.clone())).unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].path, good);
        assert_eq!(read[0].content, Document::Array(vec![]));
    }
}
