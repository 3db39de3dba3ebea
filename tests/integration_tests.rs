use serde::{Deserialize, Serialize};
use serde_tokseq::{
    chunk, decode, doc, encode, from_document, from_tokens, read_document, read_files, restore,
    strip, to_document, to_tokens, unchunk, Config, Document, Error, FileSet,
};
use std::collections::BTreeMap;
use std::fs;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    note: Option<String>,
    total: f64,
}

fn sample_order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        note: None,
        total: 109.97,
    }
}

#[test]
fn test_nested_struct_roundtrip() {
    let order = sample_order();
    let tokens = to_tokens(&order).unwrap();
    let back: Order = from_tokens(&tokens).unwrap();
    assert_eq!(order, back);
}

#[test]
fn test_nested_struct_survives_separation_and_chunking() {
    let order = sample_order();
    let form = strip(&to_tokens(&order).unwrap());
    let chunks = chunk(form.content(), 3).unwrap();
    assert!(chunks.iter().all(|c| c.len() <= 3));

    let form = form.with_content(unchunk(chunks)).unwrap();
    let back: Order = from_tokens(&restore(&form).unwrap()).unwrap();
    assert_eq!(order, back);
}

#[test]
fn test_option_field() {
    let mut order = sample_order();
    order.note = Some("leave at door".to_string());
    let document = to_document(&order).unwrap();
    assert_eq!(document.get("note"), Some(&Document::from("leave at door")));
    let back: Order = from_document(document).unwrap();
    assert_eq!(back.note.as_deref(), Some("leave at door"));
}

#[test]
fn test_map_roundtrip() {
    let mut map = BTreeMap::new();
    map.insert("greeting".to_string(), "hello".to_string());
    map.insert("farewell".to_string(), "goodbye".to_string());
    let back: BTreeMap<String, String> = from_tokens(&to_tokens(&map).unwrap()).unwrap();
    assert_eq!(map, back);
}

#[test]
fn test_typed_mismatch_is_an_error() {
    let result: Result<User, _> = from_document(doc!({ "id": "not a number" }));
    assert!(result.is_err());
}

#[test]
fn test_read_and_encode_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("en.json");
    fs::write(
        &path,
        r#"{ "test": "simple text", "header": { "sub": "sub text"} }"#,
    )
    .unwrap();

    let document = read_document(&path).unwrap();
    assert_eq!(
        encode(&document).texts(),
        vec![
            "{", "test", ":", "simple text", ",", "header", ":{", "sub", ":", "sub text", ",",
            "},", "}",
        ]
    );
    assert_eq!(decode(&encode(&document)).unwrap(), document);
}

#[test]
fn test_read_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let names = ["b.json", "a.json", "c.json"];
    for (i, name) in names.iter().enumerate() {
        fs::write(dir.path().join(name), format!(r#"{{"index": {}}}"#, i)).unwrap();
    }
    let files: FileSet = names.iter().map(|n| dir.path().join(n)).collect();
    let sources = read_files(&files).unwrap();
    let indexes: Vec<_> = sources
        .iter()
        .map(|s| s.content.get("index").and_then(Document::as_str).unwrap().to_string())
        .collect();
    assert_eq!(indexes, vec!["0", "1", "2"]);
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "api_key: secret\nchunk_size: 32\nfiles: en.json\n").unwrap();

    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.api_key(), Some("secret"));
    assert_eq!(config.chunk_size, 32);
    assert_eq!(config.files().unwrap().len(), 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_config_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::from_path(dir.path().join("absent.yaml")).unwrap();
    assert!(matches!(config.validate(), Err(Error::MissingApiKey)));
}
