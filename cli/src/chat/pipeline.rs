//! # Parley Tagging Pipeline
//!
//! File: cli/src/chat/pipeline.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A small rule-based English tagger. It tokenizes an utterance, finds named
//! entities by longest match against a `Lexicon`, and assigns a coarse part of
//! speech to the remaining tokens.
//!
//! ## Architecture
//!
//! 1. **Tokenize**: split on whitespace, trim surrounding punctuation, drop a
//!    possessive `'s`.
//! 2. **Entities**: at each position try the longest lexicon phrase first.
//!    Place labels (`GPE`, `LOC`) match regardless of case, unless the place
//!    is also an everyday word ("turkey", "amazon"). `PERSON` and `ORG` always
//!    need capitalized words, since names like "Grace" or "Apple" are also
//!    ordinary words. A matched given name absorbs a following capitalized
//!    word as a surname. A capitalized word right after "my name is" or
//!    "call me" is tagged `PERSON` even when it is not in the lexicon.
//! 3. **Parts of speech**: function words are skipped, verbs come from a
//!    lemma list (with `-s`, `-ed`, `-ing` inflections), adjectives from a
//!    short list, capitalized words after the first token are proper nouns,
//!    and any other alphabetic word is a noun.
//!
use crate::chat::analysis::{Entity, EntityLabel};
use crate::chat::lexicon::Lexicon;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Coarse part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    /// Function words, numbers and anything else.
    Other,
}

/// A token of the input with its assigned tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub pos: PartOfSpeech,
}

/// The pipeline output for one utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedDoc {
    /// Entities in order of appearance.
    pub entities: Vec<Entity>,
    /// Tokens that are not part of an entity.
    pub tokens: Vec<TaggedToken>,
}

struct Token<'a> {
    text: &'a str,
    lower: String,
}

impl Token<'_> {
    fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(|c| c.is_uppercase())
    }
}

/// Lower-case phrase table compiled from a `Lexicon`.
pub struct TaggingPipeline {
    phrases: HashMap<String, EntityLabel>,
    max_phrase_words: usize,
    function_words: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
}

impl TaggingPipeline {
    pub fn new(lexicon: &Lexicon) -> Self {
        let mut phrases = HashMap::new();
        let mut max_phrase_words = 1;
        // Earlier lists win when the same phrase appears under two labels.
        let lists = [
            (&lexicon.places, EntityLabel::Gpe),
            (&lexicon.locations, EntityLabel::Loc),
            (&lexicon.people, EntityLabel::Person),
            (&lexicon.organizations, EntityLabel::Org),
        ];
        for (entries, label) in lists {
            for entry in entries {
                let key = normalize_phrase(entry);
                if key.is_empty() {
                    continue;
                }
                max_phrase_words = max_phrase_words.max(key.split(' ').count());
                phrases.entry(key).or_insert(label);
            }
        }
        debug!(
            "Compiled tagging pipeline with {} phrases (longest {} words)",
            phrases.len(),
            max_phrase_words
        );
        Self {
            phrases,
            max_phrase_words,
            function_words: FUNCTION_WORDS.iter().copied().collect(),
            verbs: VERB_LEMMAS.iter().copied().collect(),
            adjectives: ADJECTIVES.iter().copied().collect(),
        }
    }

    /// Tags one utterance.
    pub fn tag(&self, text: &str) -> TaggedDoc {
        let tokens = tokenize(text);
        let mut doc = TaggedDoc::default();
        let mut i = 0;
        while i < tokens.len() {
            if let Some((entity, consumed)) = self.match_entity(&tokens, i) {
                doc.entities.push(entity);
                i += consumed;
                continue;
            }
            if self.follows_name_cue(&tokens, i) {
                doc.entities
                    .push(Entity::new(tokens[i].text, EntityLabel::Person));
                i += 1;
                continue;
            }
            doc.tokens.push(TaggedToken {
                text: tokens[i].text.to_string(),
                pos: self.part_of_speech(&tokens[i], i == 0),
            });
            i += 1;
        }
        doc
    }

    /// Longest lexicon phrase starting at `start`, plus the number of tokens it covers.
    fn match_entity(&self, tokens: &[Token], start: usize) -> Option<(Entity, usize)> {
        let longest = self.max_phrase_words.min(tokens.len() - start);
        for len in (1..=longest).rev() {
            let window = &tokens[start..start + len];
            let key = window
                .iter()
                .map(|t| t.lower.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let Some(&label) = self.phrases.get(&key) else {
                continue;
            };
            let needs_capitals = !label.is_place()
                || key.split(' ').any(|word| COMMON_WORD_PLACES.contains(&word));
            if needs_capitals && !is_title_cased(window) {
                continue;
            }
            let mut consumed = len;
            if label == EntityLabel::Person {
                if let Some(next) = tokens.get(start + len) {
                    if self.could_be_surname(next) {
                        consumed += 1;
                    }
                }
            }
            let text = tokens[start..start + consumed]
                .iter()
                .map(|t| t.text)
                .collect::<Vec<_>>()
                .join(" ");
            return Some((Entity::new(text, label), consumed));
        }
        None
    }

    fn could_be_surname(&self, token: &Token) -> bool {
        token.is_capitalized()
            && token.text.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'')
            && !self.function_words.contains(token.lower.as_str())
            && !self.phrases.contains_key(&token.lower)
    }

    fn follows_name_cue(&self, tokens: &[Token], i: usize) -> bool {
        if i < 2 || !self.could_be_surname(&tokens[i]) || self.is_verb(&tokens[i].lower) {
            return false;
        }
        matches!(
            (tokens[i - 2].lower.as_str(), tokens[i - 1].lower.as_str()),
            ("name", "is") | ("call", "me")
        )
    }

    fn part_of_speech(&self, token: &Token, is_first: bool) -> PartOfSpeech {
        let word = token.lower.as_str();
        if self.function_words.contains(word) {
            PartOfSpeech::Other
        } else if self.is_verb(word) {
            PartOfSpeech::Verb
        } else if self.adjectives.contains(word) {
            PartOfSpeech::Adjective
        } else if !word.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'') {
            PartOfSpeech::Other
        } else if token.is_capitalized() && !is_first {
            PartOfSpeech::ProperNoun
        } else {
            PartOfSpeech::Noun
        }
    }

    /// Checks the word and its likely lemmas against the verb list.
    fn is_verb(&self, word: &str) -> bool {
        lemma_candidates(word)
            .iter()
            .any(|lemma| self.verbs.contains(lemma.as_str()))
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .filter_map(|raw| {
            let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
            let trimmed = trimmed
                .strip_suffix("'s")
                .or_else(|| trimmed.strip_suffix("\u{2019}s"))
                .unwrap_or(trimmed);
            if trimmed.is_empty() {
                None
            } else {
                Some(Token {
                    text: trimmed,
                    lower: trimmed.to_lowercase(),
                })
            }
        })
        .collect()
}

fn normalize_phrase(phrase: &str) -> String {
    tokenize(phrase)
        .into_iter()
        .map(|t| t.lower)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every word capitalized, except lower-case joiners such as "the" or "de".
fn is_title_cased(window: &[Token]) -> bool {
    window
        .iter()
        .all(|t| t.is_capitalized() || PHRASE_JOINERS.contains(&t.lower.as_str()))
}

fn lemma_candidates(word: &str) -> Vec<String> {
    let mut candidates = vec![word.to_string()];
    if let Some(irregular) = IRREGULAR_VERBS.iter().find(|(form, _)| *form == word) {
        candidates.push(irregular.1.to_string());
    }
    if let Some(stem) = word.strip_suffix("ies") {
        candidates.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("es") {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s') {
        candidates.push(stem.to_string());
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            candidates.push(stem.to_string());
            candidates.push(format!("{stem}e"));
            // running -> run, stopped -> stop
            let mut chars = stem.chars().rev();
            if let (Some(a), Some(b)) = (chars.next(), chars.next()) {
                if a == b {
                    candidates.push(stem[..stem.len() - a.len_utf8()].to_string());
                }
            }
        }
    }
    if let Some(stem) = word.strip_suffix("ied") {
        candidates.push(format!("{stem}y"));
    }
    candidates
}

const PHRASE_JOINERS: &[&str] = &["the", "of", "de", "da", "del", "and", "la", "le"];

/// Place names that are also everyday words; these only match title-cased.
const COMMON_WORD_PLACES: &[&str] = &[
    "turkey", "chile", "china", "amazon", "nile", "arctic", "pacific", "reading", "nice", "bath",
    "mobile",
];

const FUNCTION_WORDS: &[&str] = &[
    // Pronouns and determiners
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him", "his",
    "she", "her", "hers", "it", "its", "we", "us", "our", "ours", "they", "them", "their",
    "theirs", "this", "that", "these", "those", "a", "an", "the", "some", "any", "no", "every",
    "each", "all", "both", "either", "neither", "what", "which", "who", "whom", "whose",
    "where", "when", "why", "how", "i'm", "you're", "it's", "that's", "what's", "i've",
    "i'll", "i'd", "don't", "doesn't", "didn't", "can't", "won't", "isn't", "aren't",
    // Auxiliaries and modals
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have",
    "has", "had", "will", "would", "can", "could", "shall", "should", "may", "might", "must",
    // Prepositions and conjunctions
    "in", "on", "at", "to", "from", "by", "for", "with", "about", "of", "into", "onto",
    "over", "under", "near", "between", "through", "during", "before", "after", "around",
    "and", "or", "but", "nor", "so", "yet", "if", "than", "because", "while", "as",
    // Adverbs, interjections and fillers
    "not", "very", "too", "also", "just", "really", "quite", "here", "there", "now", "then",
    "today", "tomorrow", "yesterday", "again", "always", "never", "often", "maybe",
    "please", "yes", "yeah", "ok", "okay", "hi", "hello", "hey", "hola", "bye", "goodbye",
    "thanks", "thank",
];

const VERB_LEMMAS: &[&str] = &[
    "ask", "believe", "bring", "build", "buy", "call", "change", "come", "cook", "create",
    "dance", "drink", "drive", "eat", "enjoy", "explain", "feel", "find", "fly", "follow",
    "forget", "get", "give", "go", "grow", "hate", "hear", "help", "hope", "keep", "know",
    "learn", "leave", "let", "like", "listen", "live", "look", "lose", "love", "make", "mean",
    "meet", "miss", "move", "need", "open", "pay", "play", "put", "read", "remember", "run",
    "say", "see", "seem", "sell", "send", "show", "sing", "sit", "sleep", "speak", "spend",
    "stand", "start", "stay", "stop", "study", "swim", "take", "talk", "teach", "tell",
    "think", "travel", "try", "turn", "understand", "use", "visit", "wait", "walk", "want",
    "watch", "work", "worry", "write",
];

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("bought", "buy"), ("brought", "bring"), ("built", "build"), ("came", "come"),
    ("did", "do"), ("drank", "drink"), ("drove", "drive"), ("ate", "eat"), ("felt", "feel"),
    ("found", "find"), ("flew", "fly"), ("flown", "fly"), ("forgot", "forget"), ("got", "get"),
    ("gave", "give"), ("went", "go"), ("gone", "go"), ("grew", "grow"), ("heard", "hear"),
    ("kept", "keep"), ("knew", "know"), ("known", "know"), ("left", "leave"), ("lost", "lose"),
    ("made", "make"), ("meant", "mean"), ("met", "meet"), ("paid", "pay"), ("ran", "run"),
    ("said", "say"), ("saw", "see"), ("seen", "see"), ("sold", "sell"), ("sent", "send"),
    ("sang", "sing"), ("sat", "sit"), ("slept", "sleep"), ("spoke", "speak"),
    ("spent", "spend"), ("stood", "stand"), ("swam", "swim"), ("took", "take"),
    ("taken", "take"), ("taught", "teach"), ("told", "tell"), ("thought", "think"),
    ("understood", "understand"), ("wrote", "write"), ("written", "write"),
];

const ADJECTIVES: &[&str] = &[
    "angry", "bad", "beautiful", "big", "busy", "cold", "excellent", "fine", "free", "funny",
    "good", "great", "happy", "hot", "interesting", "large", "little", "long", "new", "nice",
    "old", "sad", "small", "terrible", "tired", "wonderful", "young",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> TaggingPipeline {
        TaggingPipeline::new(&Lexicon::builtin())
    }

    fn labels(doc: &TaggedDoc) -> Vec<(&str, EntityLabel)> {
        doc.entities
            .iter()
            .map(|e| (e.text.as_str(), e.label))
            .collect()
    }

    #[test]
    fn test_longest_phrase_wins() {
        let doc = pipeline().tag("I moved to New York last year.");
        assert_eq!(labels(&doc), vec![("New York", EntityLabel::Gpe)]);
    }

    #[test]
    fn test_places_match_any_case() {
        let doc = pipeline().tag("i live in paris");
        assert_eq!(labels(&doc), vec![("paris", EntityLabel::Gpe)]);
    }

    #[test]
    fn test_common_word_places_need_capitals() {
        let p = pipeline();
        assert!(p.tag("we are having turkey for dinner").entities.is_empty());
        assert!(p.tag("i ordered it on amazon").entities.is_empty());
        assert!(p.tag("a cruise down the nile").entities.is_empty());
        assert!(p.tag("fine china and chile peppers").entities.is_empty());

        let doc = p.tag("I flew to Turkey and then to the Amazon");
        assert_eq!(
            labels(&doc),
            vec![("Turkey", EntityLabel::Gpe), ("the Amazon", EntityLabel::Loc)]
        );
    }

    #[test]
    fn test_people_need_capitals() {
        assert!(pipeline().tag("you have grace").entities.is_empty());
        let doc = pipeline().tag("Grace says hi");
        assert_eq!(labels(&doc), vec![("Grace", EntityLabel::Person)]);
    }

    #[test]
    fn test_given_name_absorbs_surname() {
        let doc = pipeline().tag("I met Alice Johnson, she was lovely.");
        assert_eq!(labels(&doc), vec![("Alice Johnson", EntityLabel::Person)]);
    }

    #[test]
    fn test_name_cue_tags_unknown_name() {
        let doc = pipeline().tag("my name is Zebulon");
        assert_eq!(labels(&doc), vec![("Zebulon", EntityLabel::Person)]);
        assert!(pipeline().tag("my name is zebulon").entities.is_empty());
    }

    #[test]
    fn test_punctuation_and_possessive_trimmed() {
        let doc = pipeline().tag("Have you seen London's bridges?!");
        assert_eq!(labels(&doc), vec![("London", EntityLabel::Gpe)]);
    }

    #[test]
    fn test_parts_of_speech() {
        let doc = pipeline().tag("We watched a funny movie with Friends");
        let tags: Vec<(&str, PartOfSpeech)> = doc
            .tokens
            .iter()
            .map(|t| (t.text.as_str(), t.pos))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("We", PartOfSpeech::Other),
                ("watched", PartOfSpeech::Verb),
                ("a", PartOfSpeech::Other),
                ("funny", PartOfSpeech::Adjective),
                ("movie", PartOfSpeech::Noun),
                ("with", PartOfSpeech::Other),
                ("Friends", PartOfSpeech::ProperNoun),
            ]
        );
    }

    #[test]
    fn test_verb_inflections() {
        let p = pipeline();
        for word in ["living", "loves", "running", "studied", "went", "tries"] {
            assert!(p.is_verb(word), "{word} should be a verb");
        }
        assert!(!p.is_verb("pizza"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(pipeline().tag("   "), TaggedDoc::default());
    }
}
