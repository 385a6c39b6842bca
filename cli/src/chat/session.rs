//! # Parley Session Loop
//!
//! File: cli/src/chat/session.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `Session` owns everything one conversation needs: the entity extractor,
//! the rule responder, the history, and the random source used to pick
//! templates. It reads lines from any `BufRead` and writes to any `Write`, so
//! the same loop serves the terminal and the tests.
//!
//! ## Architecture
//!
//! The loop is a two-state machine, `Running -> Done`. While running, each line
//! is handled in order:
//! 1. An exit keyword (trimmed, case-insensitive) prints and logs the farewell
//!    and moves to `Done`.
//! 2. Otherwise the entity responder gets the first chance to answer.
//! 3. If it declines, or the pipeline is unavailable, the rule responder answers.
//! 4. The reply is printed and logged.
//!
//! End of input also moves to `Done`, without a farewell. On `Done` the
//! statistics report is printed.
//!
//! A failure to write the history file is reported on stderr and the session
//! carries on; the entry stays in memory and is written with the next turn.
//!
use crate::chat::analysis::EntityExtractor;
use crate::chat::entity_responder::respond_to_entities;
use crate::chat::history::ConversationHistory;
use crate::chat::rules::RuleResponder;
use crate::core::config::SessionConfig;
use crate::core::error::Result;
use anyhow::Context;
use rand::Rng;
use std::borrow::Cow;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Reply printed and logged when the user leaves.
pub const FAREWELL: &str = "Goodbye! Have a great day!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Done,
}

/// Which responder produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Entity,
    Rule,
    Farewell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

pub struct Session<R: Rng> {
    extractor: EntityExtractor,
    responder: RuleResponder,
    history: ConversationHistory,
    settings: SessionConfig,
    rng: R,
    state: SessionState,
}

impl<R: Rng> Session<R> {
    pub fn new(
        extractor: EntityExtractor,
        responder: RuleResponder,
        history: ConversationHistory,
        settings: SessionConfig,
        rng: R,
    ) -> Self {
        Self {
            extractor,
            responder,
            history,
            settings,
            rng,
            state: SessionState::Running,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[cfg(test)]
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn is_exit_keyword(&self, input: &str) -> bool {
        let lowered = input.trim().to_lowercase();
        self.settings
            .exit_keywords
            .iter()
            .any(|k| k.trim().to_lowercase() == lowered)
    }

    /// Chooses a reply for `input` without logging it.
    pub fn reply_to(&mut self, input: &str) -> Reply {
        match self.extractor.analyze(input) {
            Ok(analysis) => {
                if let Some(text) = respond_to_entities(&analysis.entities) {
                    debug!("Entity override: {:?}", analysis.entities);
                    return Reply {
                        text,
                        source: ReplySource::Entity,
                    };
                }
            }
            Err(e) => debug!("Skipping entity override: {:#}", e),
        }
        Reply {
            text: self.responder.respond(input, &mut self.rng),
            source: ReplySource::Rule,
        }
    }

    /// Handles one line of input: prints the reply, logs the exchange, and
    /// moves to `Done` on an exit keyword.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Reply> {
        let reply = if self.is_exit_keyword(line) {
            info!("Exit keyword received, ending session.");
            self.state = SessionState::Done;
            Reply {
                text: FAREWELL.to_string(),
                source: ReplySource::Farewell,
            }
        } else {
            self.reply_to(line)
        };
        debug!("Reply source: {:?}", reply.source);
        writeln!(out, "{}: {}", self.settings.bot_label, reply.text)
            .context("Failed to write reply")?;
        self.record(line, &reply.text);
        Ok(reply)
    }

    fn record(&mut self, user: &str, bot: &str) {
        if let Err(e) = self.history.append(user, bot) {
            warn!("Conversation log not saved: {:#}", e);
            eprintln!(
                "Warning: could not save the conversation log to {}: {:#}",
                self.history.path().display(),
                e
            );
        }
    }

    /// Runs until an exit keyword or end of input, then prints the statistics.
    pub fn run<I: BufRead, W: Write>(&mut self, input: &mut I, out: &mut W) -> Result<()> {
        let mut buf = Vec::new();
        while self.state == SessionState::Running {
            write!(out, "{}: ", self.settings.user_label).context("Failed to write prompt")?;
            out.flush().context("Failed to flush prompt")?;

            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .context("Failed to read from input")?;
            if read == 0 {
                info!("End of input, ending session.");
                writeln!(out).context("Failed to write output")?;
                self.state = SessionState::Done;
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                warn!("Input line was not valid UTF-8; invalid bytes replaced.");
            }
            let text = line.trim_end_matches(['\n', '\r']);
            self.handle_line(text, out)?;
        }

        info!("Session finished with {} exchanges in the log.", self.history.len());
        let report = self.history.stats().render()?;
        writeln!(out, "{}", report).context("Failed to write statistics")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::history::{ConversationEntry, TIMESTAMP_FORMAT};
    use crate::chat::lexicon::Lexicon;
    use crate::chat::pipeline::TaggingPipeline;
    use crate::chat::rules::DEFAULT_RULES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    fn session_with(extractor: EntityExtractor, log: &Path) -> Session<StdRng> {
        Session::new(
            extractor,
            RuleResponder::with_default_rules().unwrap(),
            ConversationHistory::load(log),
            SessionConfig::default(),
            StdRng::seed_from_u64(3),
        )
    }

    fn session(log: &Path) -> Session<StdRng> {
        session_with(
            EntityExtractor::with_pipeline(TaggingPipeline::new(&Lexicon::builtin())),
            log,
        )
    }

    fn run(session: &mut Session<StdRng>, input: &str) -> String {
        let mut out = Vec::new();
        session
            .run(&mut Cursor::new(input.as_bytes()), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn saved(log: &Path) -> Vec<ConversationEntry> {
        serde_json::from_str(&fs::read_to_string(log).unwrap()).unwrap()
    }

    #[test]
    fn test_bye_ends_session_and_prints_stats() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("log.json");
        let mut s = session(&log);

        let output = run(&mut s, "hi\nbye\nhello\n");

        assert_eq!(s.state(), SessionState::Done);
        let entries = saved(&log);
        assert_eq!(entries.len(), 2); // "hello" is never read
        assert_eq!(entries[1].user, "bye");
        assert_eq!(entries[1].bot, FAREWELL);
        assert_eq!(
            entries.iter().filter(|e| e.bot == FAREWELL).count(),
            1
        );
        assert!(output.contains(&format!("Bot: {}", FAREWELL)));
        assert!(output.contains("Total messages in history: 2"));
        assert!(output.contains(&format!("First conversation: {}", entries[0].timestamp)));
        assert!(output.contains(&format!("Latest conversation: {}", entries[1].timestamp)));
    }

    #[test]
    fn test_n_turns_give_n_entries() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("log.json");
        let mut s = session(&log);

        run(&mut s, "hello\nhow are you\nwhat is your name\ntell me a joke\n");

        let entries = saved(&log);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3].user, "tell me a joke");
        for pair in entries.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        for e in &entries {
            assert!(chrono::NaiveDateTime::parse_from_str(&e.timestamp, TIMESTAMP_FORMAT).is_ok());
        }
    }

    #[test]
    fn test_end_of_input_without_farewell() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("log.json");
        let mut s = session(&log);

        let output = run(&mut s, "hello");

        assert_eq!(s.state(), SessionState::Done);
        let entries = saved(&log);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user, "hello");
        assert!(output.contains("Total messages in history: 1"));
    }

    #[test]
    fn test_invalid_utf8_line_still_gets_reply() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("log.json");
        let mut s = session(&log);

        let mut out = Vec::new();
        let input: &[u8] = b"caf\xe9 au lait\nbye\n";
        s.run(&mut Cursor::new(input), &mut out).unwrap();

        assert_eq!(s.state(), SessionState::Done);
        let entries = saved(&log);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].user, "caf\u{FFFD} au lait");
        assert_eq!(entries[1].bot, FAREWELL);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Total messages in history: 2"));
    }

    #[test]
    fn test_exit_keywords_ignore_case_and_spaces() {
        let dir = tempdir().unwrap();
        let s = session(&dir.path().join("log.json"));
        for keyword in ["quit", "EXIT", "  Bye ", "goodbye"] {
            assert!(s.is_exit_keyword(keyword), "{keyword:?} should exit");
        }
        assert!(!s.is_exit_keyword("see you"));
        assert!(!s.is_exit_keyword("bye bye"));
    }

    #[test]
    fn test_place_entity_overrides_rules() {
        let dir = tempdir().unwrap();
        let mut s = session(&dir.path().join("log.json"));
        let reply = s.reply_to("I just got back from Tokyo");
        assert_eq!(reply.source, ReplySource::Entity);
        assert_eq!(
            reply.text,
            "Oh, Tokyo! That's a wonderful place! How can I help you today?"
        );
    }

    #[test]
    fn test_place_wins_over_person() {
        let dir = tempdir().unwrap();
        let mut s = session(&dir.path().join("log.json"));
        let reply = s.reply_to("Alice showed me Europe");
        assert!(reply.text.starts_with("Oh, Europe!"));
    }

    #[test]
    fn test_degraded_pipeline_falls_back_to_rules() {
        let dir = tempdir().unwrap();
        let mut s = session_with(
            EntityExtractor::unavailable("test"),
            &dir.path().join("log.json"),
        );
        let reply = s.reply_to("my name is Alice");
        assert_eq!(reply.source, ReplySource::Rule);
        let name_templates = [
            "Nice to meet you, Alice! How can I help you today?",
            "Hello Alice! What brings you here?",
        ];
        assert!(name_templates.contains(&reply.text.as_str()));
    }

    #[test]
    fn test_unmatched_input_gets_catch_all() {
        let dir = tempdir().unwrap();
        let mut s = session(&dir.path().join("log.json"));
        let catch_all = DEFAULT_RULES[DEFAULT_RULES.len() - 1].1;
        for input in ["", "qwerty", "the weather is odd"] {
            let reply = s.reply_to(input);
            assert!(catch_all.contains(&reply.text.as_str()), "{input:?} -> {}", reply.text);
        }
    }

    #[test]
    fn test_resumes_existing_history() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("log.json");
        run(&mut session(&log), "hello\nbye\n");

        let mut second = session(&log);
        assert_eq!(second.history().len(), 2);
        let output = run(&mut second, "quit\n");
        assert_eq!(saved(&log).len(), 3);
        assert!(output.contains("Total messages in history: 3"));
    }

    #[test]
    fn test_unwritable_log_does_not_stop_session() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let mut s = session(&blocker.join("log.json"));

        let output = run(&mut s, "hello\nbye\n");
        assert_eq!(s.state(), SessionState::Done);
        assert_eq!(s.history().len(), 2);
        assert!(output.contains("Total messages in history: 2"));
    }
}
