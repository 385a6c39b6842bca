//! # Parley Pronoun Reflections
//!
//! File: cli/src/chat/reflections.rs
//! Author: Christi Mahu
//!
//! Swaps first- and second-person words in captured text so that
//! "I'm from my hometown" comes back as "you are from your hometown".
//! Words that are not reflected keep their original casing.
//!
use crate::core::error::{ParleyError, Result};
use regex::{Captures, Regex, RegexBuilder};
use std::collections::HashMap;

const ENGLISH_REFLECTIONS: &[(&str, &str)] = &[
    ("i am", "you are"),
    ("i was", "you were"),
    ("i", "you"),
    ("i'm", "you are"),
    ("i'd", "you would"),
    ("i've", "you have"),
    ("i'll", "you will"),
    ("my", "your"),
    ("you are", "I am"),
    ("you were", "I was"),
    ("you've", "I have"),
    ("you'll", "I will"),
    ("your", "my"),
    ("yours", "mine"),
    ("you", "me"),
    ("me", "you"),
];

pub struct Reflections {
    pattern: Regex,
    table: HashMap<String, &'static str>,
}

impl Reflections {
    pub fn english() -> Result<Self> {
        let mut keys: Vec<&str> = ENGLISH_REFLECTIONS.iter().map(|(k, _)| *k).collect();
        // Longest first so "i am" is tried before "i".
        keys.sort_by_key(|k| std::cmp::Reverse(k.len()));
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(r"\b(?:{})\b", alternation);
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| ParleyError::Pattern {
                pattern: source.clone(),
                source: e,
            })?;
        let table = ENGLISH_REFLECTIONS
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        Ok(Self { pattern, table })
    }

    /// Applies the reflections to `text` in a single left-to-right pass.
    pub fn reflect(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let matched = &caps[0];
                let key = matched.to_lowercase();
                // Keys are matched case-insensitively; whitespace inside a
                // two-word key may differ from the table's single space.
                let key = key.split_whitespace().collect::<Vec<_>>().join(" ");
                self.table
                    .get(&key)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }
}
