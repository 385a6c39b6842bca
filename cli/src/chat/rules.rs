//! # Parley Rule Responder
//!
//! File: cli/src/chat/rules.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The rule responder answers any input from an ordered list of
//! `PatternRule`s: each rule pairs a regular expression with one or more
//! response templates. Rules are tried top to bottom and the first one whose
//! pattern matches the *entire* normalized input wins. Matching ignores case.
//!
//! ## Architecture
//!
//! - **Normalization**: surrounding whitespace is trimmed and trailing `!` and
//!   `.` characters are dropped, so "Hello!" and "hello" hit the same rule.
//! - **Selection**: a template of the winning rule is chosen uniformly at
//!   random with the caller's `Rng`.
//! - **Substitution**: `%1` .. `%9` in the template are replaced with the text
//!   of the corresponding capture group after pronoun reflection (see
//!   `reflections`). A group that took no part in the match becomes "".
//! - **Tidy-up**: a reply ending in `?.` ends in `.` instead, and `??` is
//!   collapsed to `?`.
//!
//! The last rule must be a catch-all. `RuleResponder::new` rejects a rule set
//! whose last pattern does not match the empty string, and any input no
//! earlier rule claims is answered by that last rule.
//!
//! ## Examples
//!
//! ```rust
//! let responder = RuleResponder::with_default_rules()?;
//! let mut rng = rand::rng();
//! let reply = responder.respond("My name is Alice", &mut rng);
//! // "Nice to meet you, Alice! How can I help you today?" or "Hello Alice! What brings you here?"
//! ```
//!
use crate::chat::reflections::Reflections;
use crate::core::error::{ParleyError, Result};
use anyhow::anyhow;
use rand::Rng;
use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

/// One entry of the rule table.
#[derive(Debug, Clone)]
pub struct PatternRule {
    source: String,
    pattern: Regex,
    templates: Vec<String>,
}

impl PatternRule {
    /// Compiles `pattern` anchored at both ends, case-insensitive.
    pub fn new(pattern: &str, templates: &[&str]) -> Result<Self> {
        if templates.is_empty() {
            return Err(anyhow!(ParleyError::Config(format!(
                "Rule '{}' has no response templates.",
                pattern
            ))));
        }
        let anchored = format!("^(?:{})$", pattern);
        let compiled = RegexBuilder::new(&anchored)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| ParleyError::Pattern {
                pattern: pattern.to_string(),
                source: e,
            })?;
        Ok(Self {
            source: pattern.to_string(),
            pattern: compiled,
            templates: templates.iter().map(|t| t.to_string()).collect(),
        })
    }

    /// The pattern as written, without the anchors.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }
}

/// First-match-wins dispatch over an ordered rule table.
pub struct RuleResponder {
    rules: Vec<PatternRule>,
    reflections: Reflections,
    placeholder: Regex,
}

impl RuleResponder {
    pub fn new(rules: Vec<PatternRule>) -> Result<Self> {
        match rules.last() {
            None => {
                return Err(anyhow!(ParleyError::Config(
                    "A rule responder needs at least one rule.".to_string()
                )))
            }
            Some(last) if !last.pattern.is_match("") => {
                return Err(anyhow!(ParleyError::Config(format!(
                    "The last rule ('{}') must be a catch-all that matches any input.",
                    last.source
                ))))
            }
            Some(_) => {}
        }
        let placeholder = Regex::new(r"%(\d)").map_err(|e| ParleyError::Pattern {
            pattern: "%N".to_string(),
            source: e,
        })?;
        Ok(Self {
            rules,
            reflections: Reflections::english()?,
            placeholder,
        })
    }

    /// The built-in English rule table.
    pub fn with_default_rules() -> Result<Self> {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(pattern, templates)| PatternRule::new(pattern, templates))
            .collect::<Result<Vec<_>>>()?;
        Self::new(rules)
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Index of the rule that answers `input` and its captures.
    pub fn find_rule<'t>(&self, input: &'t str) -> (usize, Option<Captures<'t>>) {
        let normalized = normalize_input(input);
        self.rules
            .iter()
            .enumerate()
            .find_map(|(i, rule)| rule.pattern.captures(normalized).map(|caps| (i, Some(caps))))
            .unwrap_or((self.rules.len() - 1, None))
    }

    /// Produces a reply for `input`. Always answers: the catch-all covers
    /// anything the earlier rules do not.
    pub fn respond<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> String {
        let (index, captures) = self.find_rule(input);
        let rule = &self.rules[index];
        let templates = rule.templates();
        let template = &templates[rng.random_range(0..templates.len())];
        debug!("Rule #{} ('{}') matched", index + 1, rule.source());
        let reply = self.substitute(template, captures.as_ref());
        tidy_punctuation(reply)
    }

    fn substitute(&self, template: &str, captures: Option<&Captures>) -> String {
        self.placeholder
            .replace_all(template, |placeholder: &Captures| {
                let group = placeholder[1].parse::<usize>().unwrap_or(0);
                captures
                    .and_then(|caps| caps.get(group))
                    .map(|m| self.reflections.reflect(m.as_str()))
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Trims whitespace and strips trailing `!` / `.` characters.
pub fn normalize_input(input: &str) -> &str {
    input.trim().trim_end_matches(['!', '.']).trim_end()
}

fn tidy_punctuation(mut reply: String) -> String {
    if reply.ends_with("?.") {
        reply.truncate(reply.len() - 2);
        reply.push('.');
    } else if reply.ends_with("??") {
        reply.truncate(reply.len() - 1);
    }
    reply
}

/// Rules in priority order; the last one is the catch-all.
pub const DEFAULT_RULES: &[(&str, &[&str])] = &[
    (
        r"my name is (.*)",
        &[
            "Nice to meet you, %1! How can I help you today?",
            "Hello %1! What brings you here?",
        ],
    ),
    (
        r"(.*) from (.*)",
        &[
            "Oh, you're from %2! That's interesting! How can I assist you?",
            "%2 sounds like a nice place! What can I do for you?",
        ],
    ),
    (
        r"i live in (.*)|i am in (.*)",
        &[
            "Great! How's everything in your area?",
            "Nice! What brings you here today?",
        ],
    ),
    (
        r"hi|hello|hey|hola",
        &[
            "Hello! How can I help you today?",
            "Hi there! What can I do for you?",
            "Hey! Nice to meet you!",
        ],
    ),
    (
        r"how are you|how do you do",
        &[
            "I'm doing great, thank you for asking!",
            "I'm a chatbot, so I'm always good! How about you?",
        ],
    ),
    (
        r"what is your name|who are you",
        &[
            "I'm a chatbot created using NLP!",
            "You can call me ChatBot. I'm here to assist you!",
        ],
    ),
    (
        r"help|can you help|need help",
        &[
            "Of course! I can answer your questions. Just ask me anything!",
            "I'm here to help! What do you need?",
        ],
    ),
    (
        r"bye|goodbye|see you|exit|quit",
        &[
            "Goodbye! Have a great day!",
            "See you later!",
            "Bye! Come back soon!",
        ],
    ),
    (
        r"(.*)",
        &[
            "I'm not sure I understand. Can you rephrase that?",
            "Interesting! Tell me more.",
            "Could you please elaborate?",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn responder() -> RuleResponder {
        RuleResponder::with_default_rules().expect("default rules compile")
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn templates_of(index: usize) -> Vec<String> {
        DEFAULT_RULES[index].1.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_my_name_substitutes_capture() {
        let r = responder();
        let mut rng = rng();
        let expected = [
            "Nice to meet you, Alice! How can I help you today?",
            "Hello Alice! What brings you here?",
        ];
        for _ in 0..20 {
            let reply = r.respond("my name is Alice", &mut rng);
            assert!(reply.contains("Alice"));
            assert!(expected.contains(&reply.as_str()), "unexpected reply: {reply}");
        }
    }

    #[test]
    fn test_i_live_in_beats_from_rule() {
        let r = responder();
        let mut rng = rng();
        assert_eq!(r.find_rule("I live in Paris").0, 2);
        let reply = r.respond("I live in Paris", &mut rng);
        assert!(templates_of(2).contains(&reply));
    }

    #[test]
    fn test_from_rule_reflects_capture() {
        let r = responder();
        let mut rng = rng();
        assert_eq!(r.find_rule("I come from my hometown").0, 1);
        for _ in 0..10 {
            let reply = r.respond("I come from my hometown", &mut rng);
            assert!(
                reply == "Oh, you're from your hometown! That's interesting! How can I assist you?"
                    || reply == "your hometown sounds like a nice place! What can I do for you?",
                "unexpected reply: {reply}"
            );
        }
    }

    #[test]
    fn test_whole_input_must_match() {
        let r = responder();
        // "hi" alone is a greeting, "hi there" is not.
        assert_eq!(r.find_rule("HI").0, 3);
        assert_eq!(r.find_rule("hello!!").0, 3);
        assert_eq!(r.find_rule("hi there").0, 8);
        assert_eq!(r.find_rule("  how are you.  ").0, 4);
    }

    #[test]
    fn test_catch_all_templates() {
        let r = responder();
        let mut rng = rng();
        for input in ["tell me a joke", "", "   ", "42", "line one\nline two"] {
            assert_eq!(r.find_rule(input).0, DEFAULT_RULES.len() - 1);
            let reply = r.respond(input, &mut rng);
            assert!(templates_of(DEFAULT_RULES.len() - 1).contains(&reply));
        }
    }

    #[test]
    fn test_every_template_reachable() {
        let r = responder();
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(r.respond("hola", &mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_missing_group_substitutes_empty() {
        let rules = vec![
            PatternRule::new("a (x)?b", &["[%1]"]).unwrap(),
            PatternRule::new("(.*)", &["?"]).unwrap(),
        ];
        let r = RuleResponder::new(rules).unwrap();
        assert_eq!(r.respond("a b", &mut rng()), "[]");
        assert_eq!(r.respond("a xb", &mut rng()), "[x]");
    }

    #[test]
    fn test_tidy_punctuation() {
        assert_eq!(tidy_punctuation("Really?.".into()), "Really.");
        assert_eq!(tidy_punctuation("Really??".into()), "Really?");
        assert_eq!(tidy_punctuation("Fine.".into()), "Fine.");
    }

    #[test]
    fn test_rejects_missing_catch_all() {
        let rules = vec![PatternRule::new("hello", &["hi"]).unwrap()];
        let err = RuleResponder::new(rules).err().unwrap();
        assert!(err.to_string().contains("must be a catch-all"));
        assert!(RuleResponder::new(vec![]).is_err());
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let err = PatternRule::new("(unclosed", &["x"]).unwrap_err();
        assert!(err.to_string().contains("Invalid pattern rule '(unclosed'"));
        assert!(PatternRule::new("ok", &[]).is_err());
    }
}
