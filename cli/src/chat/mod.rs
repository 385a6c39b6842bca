//! # Parley Conversation Engine (`chat`)
//!
//! File: cli/src/chat/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything that turns a line of user input into a logged reply.
//!
//! ## Architecture
//!
//! - **`lexicon`** / **`pipeline`**: the entity word lists and the rule-based
//!   tagger compiled from them.
//! - **`analysis`**: `EntityExtractor`, which runs the tagger and adds a
//!   keyword sentiment guess.
//! - **`entity_responder`**: the place/person override reply.
//! - **`rules`** / **`reflections`**: the ordered pattern rules and the pronoun
//!   swapping applied to captured text.
//! - **`history`**: the in-memory log and its JSON file.
//! - **`session`**: the read-reply-log loop.
//!
//! Flow of one turn: `session` -> `analysis` -> `entity_responder`, falling back
//! to `rules` when there is no override -> `history`.
//!

pub mod analysis;
pub mod entity_responder;
pub mod history;
pub mod lexicon;
pub mod pipeline;
pub mod reflections;
pub mod rules;
pub mod session;
