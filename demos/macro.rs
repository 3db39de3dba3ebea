//! Using the doc! macro to build documents.
//!
//! Run with: cargo run --example macro

use serde_tokseq::{doc, encode, Document};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let null_val = doc!(null);
    let bool_val = doc!(true);
    let number = doc!(42);
    let text = doc!("Hello, tokens!");

    println!("Scalars (always text):");
    println!("  null:   {:?}", null_val);
    println!("  bool:   {:?}", bool_val);
    println!("  number: {:?}", number);
    println!("  text:   {:?}\n", text);

    let mixed = doc!([1, "two", true, null]);
    println!("Array:  {}", mixed);
    println!("Tokens: {:?}\n", encode(&mixed).texts());

    let page = doc!({
        "nav": {
            "home": "Home",
            "about": "About us"
        },
        "footer": ["Privacy", "Terms"],
        "banner": {}
    });
    println!("Nested:\n{}", page);
    println!("Tokens: {:?}\n", encode(&page).texts());

    let items: Vec<Document> = ["active", "pending", "done"]
        .iter()
        .map(|status| doc!({ "status": (status.to_string()) }))
        .collect();
    let summary = doc!({
        "total": 3,
        "items": items
    });
    println!("Dynamic construction:\n{}\n", summary);

    if let Some(home) = page.get("nav").and_then(|nav| nav.get("home")) {
        println!("nav.home = {:?}", home.as_str());
    }

    Ok(())
}
