//! Basic uniform text serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use std::error::Error;
use uniform_text::{announce_serde, from_str_as, to_string, to_string_with_options, TextOptions};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Team {
    name: String,
    members: Vec<User>,
    scores: Vec<u32>,
    lead: u32,
}

announce_serde!(Team);

fn main() -> Result<(), Box<dyn Error>> {
    let team = Team {
        name: "Core \"Runtime\"".to_string(),
        members: vec![
            User {
                id: 42,
                name: "Alice Johnson".to_string(),
                email: Some("alice@example.com".to_string()),
            },
            User {
                id: 43,
                name: "Bob Smith".to_string(),
                email: None,
            },
        ],
        scores: vec![],
        lead: 42,
    };

    let text = to_string(&team)?;
    println!("Text output:\n{}\n", text);

    let team_back: Team = from_str_as(&text)?;
    assert_eq!(team, team_back);
    println!("✓ Round-trip successful");

    // The historical writer drops the separator after an empty sequence.
    let legacy = to_string_with_options(&team, TextOptions::legacy())?;
    println!("\nLegacy output:\n{}", legacy);
    assert_eq!(from_str_as::<Team>(&legacy)?, team);

    Ok(())
}
