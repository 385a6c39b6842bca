//! # Parley Entity-Based Responder
//!
//! File: cli/src/chat/entity_responder.rs
//! Author: Christi Mahu
//!
//! Builds an override reply from tagged entities. Places (`GPE` or `LOC`) are
//! looked for first across the whole list; only if there is none does a
//! `PERSON` get a reply. Within each category the first entity wins.
//!
use crate::chat::analysis::{Entity, EntityLabel};

/// Returns the override reply for `entities`, or `None` to defer to the rules.
pub fn respond_to_entities(entities: &[Entity]) -> Option<String> {
    if let Some(place) = entities.iter().find(|e| e.label.is_place()) {
        return Some(format!(
            "Oh, {}! That's a wonderful place! How can I help you today?",
            place.text
        ));
    }
    entities
        .iter()
        .find(|e| e.label == EntityLabel::Person)
        .map(|person| format!("Nice to meet you, {}! What can I do for you?", person.text))
}
