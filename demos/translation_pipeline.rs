//! Running JSON files through a pipeline with a mock translation service.
//!
//! Run with: cargo run --example translation_pipeline

use serde_tokseq::{Chunk, Config, Pipeline, Result, TranslationRequest, Translator};
use std::fs;

/// Pretends to translate by wrapping each item in brackets.
struct Brackets;

impl Translator for Brackets {
    fn translate(&mut self, request: &TranslationRequest<'_>) -> Result<Vec<Chunk>> {
        println!(
            "  service call: target={} chunks={}",
            request.target,
            request.chunks.len()
        );
        Ok(request
            .chunks
            .iter()
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|item| format!("[{}] {}", request.target, item))
                    .collect()
            })
            .collect())
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join("serde_tokseq_demo");
    fs::create_dir_all(&dir)?;
    let en = dir.join("en.json");
    fs::write(
        &en,
        r#"{ "test": "simple text", "header": { "sub": "sub text"}, "last": "text" }"#,
    )?;

    let config = Config::from_str("api_key: demo-key\nchunk_size: 4\n")?.with_files(en);
    let pipeline = Pipeline::new(config)?;

    println!("Translating:");
    for file in pipeline.translate_configured("DE", &mut Brackets)? {
        println!("{}:\n{}", file.path.display(), file.content);
    }

    fs::remove_dir_all(&dir)?;
    Ok(())
}
