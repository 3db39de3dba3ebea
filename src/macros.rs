/// Builds a [`Document`](crate::Document) from a JSON-like literal.
///
/// `null`, `true` and `false` become their textual scalars. Any other
/// expression goes through [`to_document`](crate::to_document), so numbers,
/// strings and `Serialize` values all work.
///
/// A value that fails to serialize (a map with compound keys, for instance)
/// becomes the scalar `"null"`, the same as a literal `null`. Call
/// [`to_document`](crate::to_document) directly to see the error.
///
/// ```rust
/// use serde_tokseq::{doc, Document};
///
/// let page = doc!({
///     "title": "Welcome",
///     "sections": [{ "heading": "Intro" }, {}],
///     "draft": false
/// });
/// assert_eq!(page.get("draft"), Some(&Document::from("false")));
/// ```
#[macro_export]
macro_rules! doc {
    (null) => {
        $crate::Document::Scalar(::std::string::String::from("null"))
    };

    (true) => {
        $crate::Document::Scalar(::std::string::String::from("true"))
    };

    (false) => {
        $crate::Document::Scalar(::std::string::String::from("false"))
    };

    ([]) => {
        $crate::Document::Array(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Document::Array(vec![$($crate::doc!($elem)),*])
    };

    ({}) => {
        $crate::Document::Object($crate::DocumentMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::DocumentMap::new();
        $(
            object.insert($key.to_string(), $crate::doc!($value));
        )*
        $crate::Document::Object(object)
    }};

    // Inside a container, multi-token expressions such as `-1` need parentheses.
    ($s:expr) => {{
        $crate::to_document(&$s)
            .unwrap_or_else(|_| $crate::Document::Scalar(::std::string::String::from("null")))
    }};
}
