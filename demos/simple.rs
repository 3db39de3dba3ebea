//! Encoding a typed value into tokens and decoding it back.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_tokseq::{decode, from_tokens, to_tokens};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Faq {
    question: String,
    answer: String,
    votes: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let faqs = vec![
        Faq {
            question: "How do I reset my password?".to_string(),
            answer: "Use the link on the sign-in page.".to_string(),
            votes: 42,
        },
        Faq {
            question: "Can I export my data?".to_string(),
            answer: "Yes, as JSON or CSV.".to_string(),
            votes: 7,
        },
    ];

    let tokens = to_tokens(&faqs)?;
    println!("Tokens:\n{:?}\n", tokens.texts());

    println!("As JSON:\n{}\n", decode(&tokens)?);

    let faqs_back: Vec<Faq> = from_tokens(&tokens)?;
    assert_eq!(faqs, faqs_back);
    println!("✓ Round-trip successful");

    Ok(())
}
