//! Separating structure from content, chunking, and restoring.
//!
//! Run with: cargo run --example separation

use serde_tokseq::{chunk, decode, doc, encode, restore, strip, unchunk};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let document = doc!({
        "test": "simple text",
        "header": { "sub": "sub text" },
        "list": ["one", "two", "three"]
    });

    let tokens = encode(&document);
    println!("Tokens ({}):\n{:?}\n", tokens.len(), tokens.texts());

    let form = strip(&tokens);
    println!("Content: {:?}", form.content());
    println!("Positions:");
    for (index, lexeme) in form.positions().iter() {
        println!("  {:>2} {}", index, lexeme);
    }
    println!("\nSerialized form:\n{}\n", serde_json::to_string_pretty(&form)?);

    let chunks = chunk(form.content(), 3)?;
    println!("Chunks of 3: {:?}\n", chunks);

    // Stand-in for a translation service.
    let reversed = chunks
        .into_iter()
        .map(|c| c.into_iter().map(|s| s.chars().rev().collect()).collect())
        .collect::<Vec<Vec<String>>>();

    let form = form.with_content(unchunk(reversed))?;
    let back = decode(&restore(&form)?)?;
    println!("Restored:\n{}", back);

    Ok(())
}
