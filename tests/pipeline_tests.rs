use serde_tokseq::{
    doc, Chunk, Config, Document, Error, Pipeline, Result, TranslationRequest, Translator,
};
use std::fs;

/// Prefixes every item with the target language.
struct Tagger {
    requests: usize,
}

impl Translator for Tagger {
    fn translate(&mut self, request: &TranslationRequest<'_>) -> Result<Vec<Chunk>> {
        self.requests += 1;
        Ok(request
            .chunks
            .iter()
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|item| format!("{}:{}", request.target, item))
                    .collect()
            })
            .collect())
    }
}

/// Drops the last item of the last chunk.
struct Lossy;

impl Translator for Lossy {
    fn translate(&mut self, request: &TranslationRequest<'_>) -> Result<Vec<Chunk>> {
        let mut chunks = request.chunks.to_vec();
        if let Some(last) = chunks.last_mut() {
            last.pop();
        }
        Ok(chunks)
    }
}

/// Maps every spelling of a word to one translation.
struct Merging;

impl Translator for Merging {
    fn translate(&mut self, request: &TranslationRequest<'_>) -> Result<Vec<Chunk>> {
        Ok(request
            .chunks
            .iter()
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|item| match item.as_str() {
                        "color" | "colour" => "couleur".to_string(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect())
    }
}

/// Always fails.
struct Offline;

impl Translator for Offline {
    fn translate(&mut self, _request: &TranslationRequest<'_>) -> Result<Vec<Chunk>> {
        Err(Error::custom("service unavailable"))
    }
}

fn pipeline() -> Pipeline {
    Pipeline::new(Config::new().with_api_key("key").with_chunk_size(4)).unwrap()
}

#[test]
fn test_translation_keeps_structure() {
    let document = doc!({
        "title": "Hello",
        "items": [{ "name": "one" }, { "name": "two" }, "three"],
        "meta": {}
    });
    let mut tagger = Tagger { requests: 0 };
    let out = pipeline()
        .translate_document("FR", &document, &mut tagger)
        .unwrap();

    assert_eq!(
        out,
        doc!({
            "FR:title": "FR:Hello",
            "FR:items": [{ "FR:name": "FR:one" }, { "FR:name": "FR:two" }, "FR:three"],
            "FR:meta": {}
        })
    );
    assert_eq!(tagger.requests, 1);
}

#[test]
fn test_prepare_chunks_content() {
    let document = Document::Array((0..10).map(|i| Document::from(i.to_string())).collect());
    let prepared = pipeline().prepare(&document).unwrap();
    let sizes: Vec<_> = prepared.chunks.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![4, 4, 2]);
    assert_eq!(prepared.form.content().len(), 10);
}

#[test]
fn test_lossy_service_is_rejected() {
    let err = pipeline()
        .translate_document("FR", &doc!({ "a": "b" }), &mut Lossy)
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { expected: 2, found: 1 }));
}

#[test]
fn test_colliding_keys_are_rejected() {
    let document = doc!({ "color": "red", "colour": "blue" });
    let err = pipeline()
        .translate_document("FR", &document, &mut Merging)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedSequence(_)));
    assert!(err.to_string().contains("couleur"));
}

#[test]
fn test_service_error_propagates() {
    let err = pipeline()
        .translate_document("FR", &doc!(["x"]), &mut Offline)
        .unwrap_err();
    assert_eq!(err.to_string(), "Error: service unavailable");
}

#[test]
fn test_translate_files() {
    let dir = tempfile::tempdir().unwrap();
    let en = dir.path().join("en.json");
    let faq = dir.path().join("faq.json");
    fs::write(&en, r#"{"greeting": "hi"}"#).unwrap();
    fs::write(&faq, r#"[{"q": "why", "a": "because"}]"#).unwrap();

    let mut tagger = Tagger { requests: 0 };
    let out = pipeline()
        .translate("ES", vec![en.clone(), faq.clone()], &mut tagger)
        .unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].path, en);
    assert_eq!(out[0].content, doc!({ "ES:greeting": "ES:hi" }));
    assert_eq!(out[1].content, doc!([{ "ES:q": "ES:why", "ES:a": "ES:because" }]));
}

#[test]
fn test_translate_configured_files() {
    let dir = tempfile::tempdir().unwrap();
    let en = dir.path().join("en.json");
    fs::write(&en, r#"{"k": "v"}"#).unwrap();

    let config = Config::new().with_api_key("key").with_files(en.clone());
    let pipeline = Pipeline::new(config).unwrap();
    let out = pipeline
        .translate_configured("IT", &mut Tagger { requests: 0 })
        .unwrap();
    assert_eq!(out[0].content, doc!({ "IT:k": "IT:v" }));
}

#[test]
fn test_missing_file_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let err = pipeline()
        .translate("ES", dir.path().join("nope.json"), &mut Tagger { requests: 0 })
        .unwrap_err();
    assert!(err
        .to_string()
        .starts_with("The provided JSON file path is not correct"));
}
