//! # Dialogue Session
//!
//! File: cli/src/dialogue/session.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The `Chatbot` ties the pipeline together for one conversation. For every
//! incoming message it:
//! 1. Short-circuits blank input with a fixed prompt (nothing is recorded)
//! 2. Records the user turn
//! 3. Normalizes the text and extracts entities from the raw text
//! 4. Folds present entities into the conversation context
//! 5. Learns the user's name from "my name is X" (once per session)
//! 6. Classifies the intent and synthesizes a reply
//! 7. Occasionally weaves the known name into the reply
//! 8. Records the bot turn and computes an advisory typing delay
//!
//! ## State
//!
//! Each `Chatbot` owns exactly one `SessionState`. Callers that need several
//! concurrent conversations create one `Chatbot` per conversation; nothing is
//! shared between instances and no locking is needed.
//!
//! The conversation context is accumulated but not consulted when replying.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let mut bot = Chatbot::from_config(&Config::default(), Some(7))?;
//! let reply = bot.process_message("hi, my name is Alex");
//! assert!(reply.text.starts_with("Nice to meet you, Alex! "));
//! ```
//!
use crate::core::config::{Config, SessionConfig};
use crate::core::error::Result;
use crate::dialogue::entities::{EntityBundle, EntityExtractor, EntityField};
use crate::dialogue::intent::{classify, Intent};
use crate::dialogue::normalizer::{RuleNormalizer, TextNormalizer};
use crate::dialogue::random::{RandomSource, SeededRandom};
use crate::dialogue::responses::ResponseSynthesizer;
use chrono::{DateTime, Local};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

/// Reply to blank input.
pub const EMPTY_INPUT_PROMPT: &str = "Is there something I can help you with?";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"my name is (\w+)").expect("name pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => f.write_str("user"),
            Speaker::Bot => f.write_str("bot"),
        }
    }
}

/// One recorded message.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Local>,
}

/// Append-only record of the conversation.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    fn push(&mut self, speaker: Speaker, text: &str) {
        self.turns.push(Turn {
            speaker,
            text: text.to_string(),
            at: Local::now(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Latest observed value for each entity field over the whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    values: BTreeMap<EntityField, String>,
}

impl ConversationContext {
    /// Overwrites the stored value of every field present in `entities`.
    /// Absent fields leave earlier values untouched.
    fn absorb(&mut self, entities: &EntityBundle) {
        for (field, value) in entities.present() {
            self.values.insert(field, value.to_string());
        }
    }

    pub fn get(&self, field: EntityField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityField, &str)> + '_ {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything one conversation remembers.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub context: ConversationContext,
    pub history: ConversationHistory,
    pub user_name: Option<String>,
}

/// Tunables for personalization and the typing-delay hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub personalization_rate: f64,
    pub typing_delay_per_char: f64,
    pub max_typing_delay: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for SessionSettings {
    fn from(cfg: &SessionConfig) -> Self {
        Self {
            personalization_rate: cfg.personalization_rate,
            typing_delay_per_char: cfg.typing_delay_per_char,
            max_typing_delay: cfg.max_typing_delay,
        }
    }
}

/// Result of processing one message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Advisory only; the engine never sleeps.
    pub typing_delay_secs: f64,
}

/// What the pipeline makes of a message, without touching any session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<String>,
    pub intent: Intent,
    pub entities: EntityBundle,
}

/// One conversation with the customer-service bot.
pub struct Chatbot {
    normalizer: Arc<dyn TextNormalizer>,
    extractor: EntityExtractor,
    synthesizer: ResponseSynthesizer,
    rng: Box<dyn RandomSource + Send>,
    settings: SessionSettings,
    state: SessionState,
}

impl Chatbot {
    /// Builds a chatbot around the built-in English normalizer.
    pub fn new(
        synthesizer: ResponseSynthesizer,
        settings: SessionSettings,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        Self::with_normalizer(Arc::new(RuleNormalizer::new()), synthesizer, settings, rng)
    }

    pub fn with_normalizer(
        normalizer: Arc<dyn TextNormalizer>,
        synthesizer: ResponseSynthesizer,
        settings: SessionSettings,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        Self {
            extractor: EntityExtractor::new(Arc::clone(&normalizer)),
            normalizer,
            synthesizer,
            rng,
            settings,
            state: SessionState::default(),
        }
    }

    /// Builds a chatbot from configuration. `seed` takes precedence over `session.seed`.
    pub fn from_config(config: &Config, seed: Option<u64>) -> Result<Self> {
        let synthesizer = ResponseSynthesizer::new(config.responses.clone())?;
        let seed = seed.or(config.session.seed);
        match seed {
            Some(s) => debug!("Seeding template selection with {}", s),
            None => debug!("Seeding template selection from OS entropy"),
        }
        Ok(Self::new(
            synthesizer,
            SessionSettings::from(&config.session),
            Box::new(SeededRandom::new(seed)),
        ))
    }

    pub fn process_message(&mut self, raw_text: &str) -> Reply {
        if raw_text.trim().is_empty() {
            debug!("Blank input, answering with the fixed prompt");
            return Reply {
                text: EMPTY_INPUT_PROMPT.to_string(),
                typing_delay_secs: 0.0,
            };
        }

        self.state.history.push(Speaker::User, raw_text);

        let tokens = self.normalizer.normalize(raw_text);
        let entities = self.extractor.extract(raw_text);
        debug!("Tokens: {:?}", tokens);
        debug!("Entities: {:?}", entities);

        self.state.context.absorb(&entities);

        let prefix = match self.state.user_name {
            Some(_) => String::new(),
            None => match learn_name(raw_text) {
                Some(name) => {
                    info!("Learned user name: {}", name);
                    let prefix = format!("Nice to meet you, {}! ", name);
                    self.state.user_name = Some(name);
                    prefix
                }
                None => String::new(),
            },
        };

        let intent = classify(&tokens);
        debug!("Classified intent: {}", intent);
        let mut reply = self
            .synthesizer
            .synthesize(intent, &entities, self.rng.as_mut());

        if let Some(name) = &self.state.user_name {
            if self.rng.unit() < self.settings.personalization_rate {
                debug!("Personalizing reply with the user's name");
                reply = personalize(&reply, name);
            }
        }

        self.state.history.push(Speaker::Bot, &reply);

        let typing_delay_secs = typing_delay(
            reply.chars().count(),
            self.settings.typing_delay_per_char,
            self.settings.max_typing_delay,
        );

        Reply {
            text: prefix + &reply,
            typing_delay_secs,
        }
    }

    pub fn analyze(&self, raw_text: &str) -> Analysis {
        let tokens = self.normalizer.normalize(raw_text);
        let intent = classify(&tokens);
        Analysis {
            entities: self.extractor.extract(raw_text),
            tokens,
            intent,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.state.history
    }

    pub fn context(&self) -> &ConversationContext {
        &self.state.context
    }

    pub fn user_name(&self) -> Option<&str> {
        self.state.user_name.as_deref()
    }

    pub fn synthesizer(&self) -> &ResponseSynthesizer {
        &self.synthesizer
    }
}

/// Finds "my name is X" (case-insensitive) and returns X with its first letter upper-cased.
fn learn_name(raw_text: &str) -> Option<String> {
    let lowered = raw_text.to_lowercase();
    let caps = NAME_RE.captures(&lowered)?;
    let word = caps.get(1)?.as_str();
    let mut chars = word.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Inserts the name after the first sentence, or appends it when there is no period.
fn personalize(reply: &str, name: &str) -> String {
    match reply.split_once('.') {
        Some((first, rest)) => format!("{}, {}.{}", first, name, rest),
        None => format!(
            "{}, {}.",
            reply.trim_end_matches(['?', '!', '.', ',']),
            name
        ),
    }
}

/// `chars * per_char`, capped at `max`.
pub fn typing_delay(chars: usize, per_char: f64, max: f64) -> f64 {
    (chars as f64 * per_char).min(max)
}
