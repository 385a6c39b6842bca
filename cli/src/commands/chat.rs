//! # Parley Chat Command
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `parley chat` (also what plain `parley` runs). It wires the
//! configured pieces together and hands stdin/stdout to the session loop:
//! 1. Load configuration
//! 2. Build the entity extractor (warning if it starts degraded)
//! 3. Load the conversation history
//! 4. Print the welcome banner and run the session until an exit keyword
//!
//! ## Examples
//!
//! ```bash
//! parley
//! parley chat --seed 7          # repeatable template choices
//! parley --history /tmp/log.json chat
//! ```
//!
use crate::chat::analysis::EntityExtractor;
use crate::chat::history::{ConversationHistory, LoadStatus};
use crate::chat::rules::RuleResponder;
use crate::chat::session::Session;
use crate::commands::{load_settings, GlobalOptions};
use crate::core::config::SessionConfig;
use crate::core::error::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use tracing::{info, warn};

#[derive(Parser, Debug, Default)]
pub struct ChatArgs {
    /// Seed for choosing among response templates (makes a conversation repeatable).
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn handle_chat(args: ChatArgs, options: &GlobalOptions) -> Result<()> {
    info!("Starting chat session...");
    let cfg = load_settings(options)?;

    println!("Initializing chatbot...");
    let extractor = EntityExtractor::from_config(&cfg.pipeline);
    if extractor.is_available() {
        info!("Entity recognition ready.");
    } else if let Some(reason) = extractor.unavailable_reason() {
        warn!("Entity recognition unavailable: {}", reason);
        eprintln!(
            "Warning: entity recognition is unavailable ({}). Replies will come from pattern rules only.",
            reason
        );
    }

    let history = ConversationHistory::load(cfg.history_path());
    match history.load_status() {
        LoadStatus::Loaded(count) => println!("Loaded {} previous messages.", count),
        LoadStatus::Reset(reason) => {
            info!("Previous conversation log discarded: {}", reason)
        }
        LoadStatus::Missing => {}
    }

    let responder = RuleResponder::with_default_rules()?;
    info!("Loaded {} response rules.", responder.rules().len());
    print_banner(&cfg.session);

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = Session::new(extractor, responder, history, cfg.session, rng);
    session.run(&mut io::stdin().lock(), &mut io::stdout().lock())
}

fn print_banner(settings: &SessionConfig) {
    let rule = "=".repeat(50);
    println!("\n{}", rule);
    println!("🤖 Welcome to the AI Chatbot with NLP!");
    println!("{}", rule);
    println!(
        "You can start chatting now. Type {} to exit.\n",
        describe_keywords(&settings.exit_keywords)
    );
}

/// `["quit", "exit", "bye"]` -> `'quit', 'exit' or 'bye'`
fn describe_keywords(keywords: &[String]) -> String {
    let quoted: Vec<String> = keywords.iter().map(|k| format!("'{}'", k)).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_describe_keywords() {
        assert_eq!(describe_keywords(&owned(&["bye"])), "'bye'");
        assert_eq!(describe_keywords(&owned(&["bye", "quit"])), "'bye' or 'quit'");
        assert_eq!(
            describe_keywords(&owned(&["quit", "exit", "bye", "goodbye"])),
            "'quit', 'exit', 'bye' or 'goodbye'"
        );
        assert_eq!(describe_keywords(&[]), "");
    }
}
