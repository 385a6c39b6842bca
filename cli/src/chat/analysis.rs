//! # Parley Entity Analysis
//!
//! File: cli/src/chat/analysis.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The `EntityExtractor` runs an utterance through the tagging pipeline and
//! returns an `EntityAnalysis`: labelled entities, the nouns and verbs found,
//! and a keyword-based sentiment guess.
//!
//! The extractor is built once at startup from the `[pipeline]` configuration.
//! If the pipeline cannot be built (disabled, or the configured lexicon file
//! fails to load) the extractor is created in a degraded state: it still
//! exists, but every `analyze` call returns `ParleyError::PipelineUnavailable`
//! so callers can fall back to the pattern rules.
//!
//! ## Examples
//!
//! ```rust
//! let extractor = EntityExtractor::from_config(&cfg.pipeline);
//! let analysis = extractor.analyze("I flew from Paris to meet Alice")?;
//! assert_eq!(analysis.entities[0].label, EntityLabel::Gpe);
//! ```
//!
use crate::chat::lexicon::Lexicon;
use crate::chat::pipeline::{PartOfSpeech, TaggingPipeline};
use crate::core::config::PipelineConfig;
use crate::core::error::{ParleyError, Result};
use anyhow::anyhow;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Entity categories produced by the tagging pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    /// Geo-political entity: countries, cities, states.
    Gpe,
    /// Non-political location: continents, mountain ranges, bodies of water.
    Loc,
    Person,
    Org,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Gpe => "GPE",
            EntityLabel::Loc => "LOC",
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
        }
    }

    /// True for the labels that count as a place (`GPE` and `LOC`).
    pub fn is_place(&self) -> bool {
        matches!(self, EntityLabel::Gpe | EntityLabel::Loc)
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A span of the utterance tagged with a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Per-utterance analysis. Recomputed for every input and dropped after use.
///
/// `sentiment` is informational only; no reply depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityAnalysis {
    pub entities: Vec<Entity>,
    pub nouns: Vec<String>,
    pub verbs: Vec<String>,
    pub sentiment: Sentiment,
}

const POSITIVE_WORDS: &[&str] = &["good", "great", "excellent", "love", "happy"];
const NEGATIVE_WORDS: &[&str] = &["bad", "terrible", "hate", "sad", "angry"];

/// Keyword sentiment: substring membership, positive checked first.
pub fn detect_sentiment(input: &str) -> Sentiment {
    let lowered = input.to_lowercase();
    if POSITIVE_WORDS.iter().any(|w| lowered.contains(w)) {
        Sentiment::Positive
    } else if NEGATIVE_WORDS.iter().any(|w| lowered.contains(w)) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Wraps the tagging pipeline, or the reason it could not be built.
pub struct EntityExtractor {
    state: PipelineState,
}

enum PipelineState {
    Ready(TaggingPipeline),
    Unavailable(String),
}

impl EntityExtractor {
    /// Builds the extractor described by `[pipeline]`. Never fails: load
    /// problems are logged and leave the extractor degraded.
    pub fn from_config(config: &PipelineConfig) -> Self {
        if !config.enabled {
            info!("Tagging pipeline disabled by configuration.");
            return Self::unavailable("disabled in configuration");
        }
        let mut lexicon = Lexicon::builtin();
        if let Some(extra) = config.lexicon.as_deref() {
            match Lexicon::from_file(Path::new(extra)) {
                Ok(extra_lexicon) => lexicon.extend(extra_lexicon),
                Err(e) => {
                    warn!("Failed to load lexicon '{}': {:#}", extra, e);
                    return Self::unavailable(format!("could not load lexicon '{}': {:#}", extra, e));
                }
            }
        }
        Self::with_pipeline(TaggingPipeline::new(&lexicon))
    }

    pub fn with_pipeline(pipeline: TaggingPipeline) -> Self {
        info!("Tagging pipeline ready.");
        Self {
            state: PipelineState::Ready(pipeline),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: PipelineState::Unavailable(reason.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, PipelineState::Ready(_))
    }

    /// Why the pipeline is degraded, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            PipelineState::Ready(_) => None,
            PipelineState::Unavailable(reason) => Some(reason),
        }
    }

    /// Tags `input` and collects entities, nouns, verbs and sentiment.
    pub fn analyze(&self, input: &str) -> Result<EntityAnalysis> {
        let pipeline = match &self.state {
            PipelineState::Ready(pipeline) => pipeline,
            PipelineState::Unavailable(reason) => {
                return Err(anyhow!(ParleyError::PipelineUnavailable {
                    reason: reason.clone(),
                }));
            }
        };

        let doc = pipeline.tag(input);
        let words_with = |wanted: PartOfSpeech| -> Vec<String> {
            doc.tokens
                .iter()
                .filter(|t| t.pos == wanted)
                .map(|t| t.text.clone())
                .collect()
        };
        let analysis = EntityAnalysis {
            nouns: words_with(PartOfSpeech::Noun),
            verbs: words_with(PartOfSpeech::Verb),
            sentiment: detect_sentiment(input),
            entities: doc.entities,
        };
        debug!(
            "Analysis: {} entities, {} nouns, {} verbs, sentiment {:?}",
            analysis.entities.len(),
            analysis.nouns.len(),
            analysis.verbs.len(),
            analysis.sentiment
        );
        Ok(analysis)
    }
}
