//! # Parley Entity Lexicon
//!
//! File: cli/src/chat/lexicon.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The named-entity word lists the tagging pipeline is built from. A built-in
//! English lexicon ships with the binary; users can extend it with a TOML file
//! (configured under `[pipeline] lexicon`) holding any of the same four lists:
//!
//! ```toml
//! places = ["Springfield", "Twin Peaks"]   # GPE: countries, cities, states
//! locations = ["Misty Mountains"]          # LOC: non-political locations
//! people = ["Ada", "Linus"]                # PERSON: given names
//! organizations = ["Initech"]              # ORG
//! ```
//!
//! Entries are matched case-insensitively and may span several words.
//!
use crate::common::fs::io;
use crate::core::error::{ParleyError, Result};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Word lists for each entity label, in the shape of a lexicon file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Lexicon {
    #[serde(default)]
    pub places: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
}

impl Lexicon {
    /// The lexicon compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            places: to_owned_list(BUILTIN_PLACES),
            locations: to_owned_list(BUILTIN_LOCATIONS),
            people: to_owned_list(BUILTIN_PEOPLE),
            organizations: to_owned_list(BUILTIN_ORGANIZATIONS),
        }
    }

    /// Reads a lexicon TOML file.
    ///
    /// Fails if the file is missing, is not valid TOML, or defines no entries
    /// at all (an empty lexicon is almost certainly a misconfiguration).
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = io::read_file_to_string(path)?;
        let lexicon: Lexicon = toml::from_str(&content)
            .with_context(|| format!("Failed to parse lexicon TOML from {}", path.display()))?;
        if lexicon.is_empty() {
            return Err(anyhow!(ParleyError::Lexicon(format!(
                "Lexicon file '{}' defines no entries.",
                path.display()
            ))));
        }
        info!(
            "Loaded {} lexicon entries from {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Appends every entry of `other` to this lexicon.
    pub fn extend(&mut self, other: Lexicon) {
        debug!("Extending lexicon with {} entries", other.len());
        self.places.extend(other.places);
        self.locations.extend(other.locations);
        self.people.extend(other.people);
        self.organizations.extend(other.organizations);
    }

    /// Total number of entries across all lists.
    pub fn len(&self) -> usize {
        self.places.len() + self.locations.len() + self.people.len() + self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const BUILTIN_PLACES: &[&str] = &[
    // Countries
    "Argentina", "Australia", "Austria", "Bangladesh", "Belgium", "Brazil", "Canada",
    "Chile", "China", "Colombia", "Croatia", "Cuba", "Czech Republic", "Denmark", "Egypt",
    "England", "Ethiopia", "Finland", "France", "Germany", "Ghana", "Greece", "Hungary",
    "Iceland", "India", "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy", "Jamaica",
    "Japan", "Kenya", "Mexico", "Morocco", "Nepal", "Netherlands", "New Zealand", "Nigeria",
    "Norway", "Pakistan", "Peru", "Philippines", "Poland", "Portugal", "Romania", "Russia",
    "Saudi Arabia", "Scotland", "Singapore", "South Africa", "South Korea", "Spain", "Sweden",
    "Switzerland", "Thailand", "Turkey", "Uganda", "Ukraine", "United Kingdom",
    "United States", "USA", "UK", "Vietnam", "Wales",
    // Cities
    "Amsterdam", "Athens", "Atlanta", "Bangkok", "Barcelona", "Beijing", "Berlin", "Boston",
    "Brussels", "Budapest", "Buenos Aires", "Cairo", "Cape Town", "Chicago", "Copenhagen",
    "Dallas", "Delhi", "Dubai", "Dublin", "Edinburgh", "Hong Kong", "Houston", "Istanbul",
    "Jakarta", "Karachi", "Kyiv", "Lagos", "Lisbon", "London", "Los Angeles", "Madrid",
    "Manchester", "Manila", "Melbourne", "Miami", "Milan", "Montreal", "Moscow", "Mumbai",
    "Munich", "Nairobi", "New Delhi", "New York", "Oslo", "Paris", "Prague", "Rio de Janeiro",
    "Rome", "San Francisco", "Santiago", "Seattle", "Seoul", "Shanghai", "Stockholm",
    "Sydney", "Tokyo", "Toronto", "Vancouver", "Vienna", "Warsaw", "Washington", "Zurich",
    // States and provinces
    "California", "Texas", "Florida", "Ohio", "Oregon", "Bavaria", "Ontario", "Quebec",
];

const BUILTIN_LOCATIONS: &[&str] = &[
    "Africa", "Antarctica", "Asia", "Europe", "North America", "South America", "Oceania",
    "the Middle East", "Middle East", "Scandinavia", "Siberia", "the Balkans", "Patagonia",
    "the Alps", "Alps", "the Andes", "Andes", "the Himalayas", "Himalayas", "the Rockies",
    "Mount Everest", "Sahara", "the Sahara", "Amazon", "the Amazon", "Nile", "the Nile",
    "Danube", "the Mediterranean", "Mediterranean", "Atlantic", "the Atlantic", "Pacific",
    "the Pacific", "Indian Ocean", "Arctic", "the Arctic", "Caribbean", "the Caribbean",
    "Lake Geneva", "Silicon Valley",
];

const BUILTIN_PEOPLE: &[&str] = &[
    "Aaron", "Abigail", "Ada", "Adam", "Ahmed", "Aisha", "Alan", "Alex", "Alexander", "Alice",
    "Amelia", "Amir", "Ana", "Andrew", "Anna", "Anthony", "Arjun", "Ava", "Ben", "Benjamin",
    "Bob", "Carlos", "Carol", "Charles", "Charlie", "Charlotte", "Chloe", "Chris", "Daniel",
    "David", "Diego", "Elena", "Eli", "Elizabeth", "Ella", "Emily", "Emma", "Ethan", "Fatima",
    "Grace", "Hannah", "Harry", "Henry", "Isabella", "Jack", "Jacob", "James", "Jane", "Jessica",
    "John", "Jose", "Joseph", "Julia", "Kate", "Laura", "Leo", "Liam", "Linda", "Lucas", "Lucy",
    "Maria", "Mark", "Mary", "Matthew", "Mia", "Michael", "Mohammed", "Noah", "Olivia", "Omar",
    "Oliver", "Paul", "Peter", "Priya", "Rachel", "Raj", "Robert", "Sam", "Samuel", "Sara",
    "Sarah", "Sofia", "Sophia", "Sophie", "Thomas", "Tom", "Victoria", "William", "Yuki",
    "Zoe",
];

const BUILTIN_ORGANIZATIONS: &[&str] = &[
    "Amazon Web Services", "Apple", "Google", "Microsoft", "Mozilla", "NASA", "Netflix",
    "OpenAI", "Red Cross", "Tesla", "the United Nations", "United Nations", "UNESCO",
];
