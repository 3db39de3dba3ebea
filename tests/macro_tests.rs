use serde::Serialize;
use serde_tokseq::{doc, encode, Document, DocumentMap};

#[test]
fn test_doc_macro_null() {
    assert_eq!(doc!(null), Document::Scalar("null".to_string()));
}

#[test]
fn test_doc_macro_booleans() {
    assert_eq!(doc!(true), Document::from("true"));
    assert_eq!(doc!(false), Document::from("false"));
}

#[test]
fn test_doc_macro_numbers() {
    assert_eq!(doc!(42), Document::from("42"));
    assert_eq!(doc!(3.5), Document::from("3.5"));
    assert_eq!(doc!(-123), Document::from("-123"));
}

#[test]
fn test_doc_macro_strings() {
    assert_eq!(doc!("hello world"), Document::from("hello world"));
    assert_eq!(doc!(""), Document::from(""));
}

#[test]
fn test_doc_macro_arrays() {
    assert_eq!(doc!([]), Document::Array(vec![]));
    assert_eq!(
        doc!([1, "two", (-3)]),
        Document::Array(vec![
            Document::from("1"),
            Document::from("two"),
            Document::from("-3"),
        ])
    );
}

#[test]
fn test_doc_macro_nested() {
    let document = doc!({
        "user": {
            "name": "Alice",
            "roles": ["admin", "dev"]
        },
        "empty": {},
        "trailing": [],
    });

    let mut user = DocumentMap::new();
    user.insert("name".to_string(), Document::from("Alice"));
    user.insert(
        "roles".to_string(),
        Document::Array(vec![Document::from("admin"), Document::from("dev")]),
    );
    let mut expected = DocumentMap::new();
    expected.insert("user".to_string(), Document::Object(user));
    expected.insert("empty".to_string(), Document::Object(DocumentMap::new()));
    expected.insert("trailing".to_string(), Document::Array(vec![]));

    assert_eq!(document, Document::Object(expected));
}

#[test]
fn test_doc_macro_key_order_matters() {
    assert_ne!(doc!({ "a": "1", "b": "2" }), doc!({ "b": "2", "a": "1" }));
}

#[test]
fn test_doc_macro_serializable_expression() {
    #[derive(Serialize)]
    struct Link {
        href: String,
    }

    let link = Link {
        href: "/home".to_string(),
    };
    let document = doc!(link);
    assert_eq!(
        encode(&document).texts(),
        vec!["{", "href", ":", "/home", ",", "}"]
    );
}

#[test]
fn test_doc_macro_unserializable_value_is_null() {
    use std::collections::BTreeMap;

    let mut grid = BTreeMap::new();
    grid.insert((0, 1), "cell");
    assert!(serde_tokseq::to_document(&grid).is_err());
    assert_eq!(doc!(grid), doc!(null));
}
