//! # Dialogue Session Integration Tests
//!
//! File: cli/tests/dialogue_session.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Exercises the `techsupport` library through its public API only: a `Chatbot`
//! built from default response pools with a fixed random source, so every reply
//! is predictable.
//!

use techsupport::core::config::Config;
use techsupport::dialogue::entities::EntityField;
use std::sync::Arc;
use techsupport::dialogue::intent::Intent;
use techsupport::dialogue::normalizer::TextNormalizer;
use techsupport::dialogue::random::FixedRandom;
use techsupport::dialogue::responses::{ResponsePools, ResponseSynthesizer};
use techsupport::dialogue::session::{typing_delay, Chatbot, SessionSettings, Speaker};

fn default_synthesizer() -> ResponseSynthesizer {
    ResponseSynthesizer::new(ResponsePools::default()).expect("default pools compile")
}

/// A bot that always picks the first template and never personalizes.
fn predictable_bot() -> Chatbot {
    Chatbot::new(
        default_synthesizer(),
        SessionSettings::default(),
        Box::new(FixedRandom::new(0, 1.0)),
    )
}

/// A bot whose personalization roll always succeeds once a name is known.
fn eager_personalizing_bot() -> Chatbot {
    Chatbot::new(
        default_synthesizer(),
        SessionSettings::default(),
        Box::new(FixedRandom::new(0, 0.0)),
    )
}

/// Ignores the text and always yields the same tokens.
struct CannedNormalizer(Vec<&'static str>);

impl TextNormalizer for CannedNormalizer {
    fn normalize(&self, _text: &str) -> Vec<String> {
        self.0.iter().map(|t| t.to_string()).collect()
    }
}

#[test]
fn test_history_grows_by_two_per_message() {
    let mut bot = predictable_bot();
    let messages = ["hello", "my laptop is broken", "order 123456", "thanks, bye"];
    for (i, message) in messages.iter().enumerate() {
        bot.process_message(message);
        assert_eq!(bot.history().len(), 2 * (i + 1));
    }
    let turns = bot.history().turns();
    assert_eq!(turns[0].speaker, Speaker::User);
    assert_eq!(turns[0].text, "hello");
    assert_eq!(turns[1].speaker, Speaker::Bot);
    assert_eq!(turns[1].text, "Hello! How can I help you today?");
}

#[test]
fn test_blank_input_leaves_session_untouched() {
    let mut bot = predictable_bot();
    bot.process_message("my laptop is broken");
    let before = bot.state().clone();

    for blank in ["", "   ", "\t\n"] {
        let reply = bot.process_message(blank);
        assert_eq!(reply.text, "Is there something I can help you with?");
        assert_eq!(reply.typing_delay_secs, 0.0);
    }
    assert_eq!(bot.history().len(), before.history.len());
    assert_eq!(bot.context().len(), before.context.len());
    assert_eq!(bot.user_name(), None);
}

#[test]
fn test_greeting_outranks_issue_words() {
    let mut bot = predictable_bot();
    assert_eq!(bot.analyze("hi, my phone is broken").intent, Intent::Greeting);
    let reply = bot.process_message("hi, my phone is broken");
    assert_eq!(reply.text, "Hello! How can I help you today?");
    // The entities are still remembered.
    assert_eq!(bot.context().get(EntityField::Product), Some("smartphone"));
    assert_eq!(
        bot.context().get(EntityField::IssueType),
        Some("hardware issue")
    );
}

#[test]
fn test_issue_reply_uses_category_template() {
    let mut bot = predictable_bot();
    let reply = bot.process_message("my laptop is broken");
    assert_eq!(
        reply.text,
        "I'm sorry to hear about the issue with your laptop. Could you describe the problem in more detail?"
    );
}

#[test]
fn test_user_name_is_never_overwritten() {
    let mut bot = predictable_bot();
    let first = bot.process_message("hello, my name is alex");
    assert!(first.text.starts_with("Nice to meet you, Alex! "));
    assert_eq!(bot.user_name(), Some("Alex"));

    let second = bot.process_message("actually my name is Sam");
    assert!(!second.text.contains("Nice to meet you"));
    assert_eq!(bot.user_name(), Some("Alex"));
}

#[test]
fn test_context_keeps_latest_values() {
    let mut bot = predictable_bot();
    bot.process_message("order 11111 for my laptop");
    bot.process_message("and order 22222 please");
    assert_eq!(bot.context().get(EntityField::OrderNumber), Some("22222"));
    assert_eq!(bot.context().get(EntityField::Product), Some("laptop"));
}

#[test]
fn test_order_message_example() {
    let mut bot = predictable_bot();
    let analysis = bot.analyze("My order 123456 hasn't shipped yet");
    assert_eq!(analysis.intent, Intent::Order);
    assert_eq!(analysis.entities.order_number.as_deref(), Some("123456"));
    assert_eq!(analysis.entities.issue_type, None);

    let reply = bot.process_message("My order 123456 hasn't shipped yet");
    assert_eq!(
        reply.text,
        "Let me look up information for order number 123456. Please wait a moment..."
    );
    let expected = typing_delay(reply.text.chars().count(), 0.01, 1.5);
    assert!((reply.typing_delay_secs - expected).abs() < 1e-9);
}

#[test]
fn test_typing_delay_monotonic_and_capped() {
    let mut previous = 0.0;
    for chars in [0, 1, 10, 100, 149, 150, 151, 1_000, 100_000] {
        let delay = typing_delay(chars, 0.01, 1.5);
        assert!(delay >= previous);
        assert!(delay <= 1.5);
        previous = delay;
    }
    assert_eq!(typing_delay(100_000, 0.01, 1.5), 1.5);
}

#[test]
fn test_from_config_with_seed_is_reproducible() {
    let cfg = Config::default();
    let run = || {
        let mut bot = Chatbot::from_config(&cfg, Some(99)).expect("default config builds");
        ["hello", "what is the price", "bye"]
            .iter()
            .map(|m| bot.process_message(m).text)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_no_personalization_without_a_name() {
    let mut bot = eager_personalizing_bot();
    let reply = bot.process_message("hello");
    assert_eq!(reply.text, "Hello! How can I help you today?");
    assert_eq!(bot.history().turns()[1].text, "Hello! How can I help you today?");
    assert_eq!(bot.user_name(), None);

    let reply = bot.process_message("my laptop is broken");
    assert_eq!(
        reply.text,
        "I'm sorry to hear about the issue with your laptop. Could you describe the problem in more detail?"
    );
}

#[test]
fn test_personalization_once_name_is_known() {
    let mut bot = eager_personalizing_bot();
    let reply = bot.process_message("hi, my name is alex");
    assert_eq!(
        reply.text,
        "Nice to meet you, Alex! Hello! How can I help you today, Alex."
    );
    // History keeps the reply without the one-time prefix.
    assert_eq!(
        bot.history().turns()[1].text,
        "Hello! How can I help you today, Alex."
    );
}

#[test]
fn test_injected_normalizer_drives_understanding() {
    let mut bot = Chatbot::with_normalizer(
        Arc::new(CannedNormalizer(vec!["price", "laptop"])),
        default_synthesizer(),
        SessionSettings::default(),
        Box::new(FixedRandom::new(0, 1.0)),
    );

    let analysis = bot.analyze("zzz");
    assert_eq!(analysis.tokens, vec!["price", "laptop"]);
    assert_eq!(analysis.intent, Intent::ProductInfo);
    assert_eq!(analysis.entities.product.as_deref(), Some("laptop"));

    let reply = bot.process_message("zzz");
    assert_eq!(
        reply.text,
        "I'd be happy to provide information about our laptop. What would you like to know?"
    );
    assert_eq!(bot.context().get(EntityField::Product), Some("laptop"));
}

#[test]
fn test_synthesizer_reachable_from_session() {
    let bot = predictable_bot();
    let pools = bot.synthesizer().pools();
    assert_eq!(pools.greeting.len(), 3);
    assert!(pools.issue.contains_key("shipping issue"));

    let mut rng = FixedRandom::new(1, 0.0);
    let fallback = bot.synthesizer().not_understood(&mut rng);
    assert_eq!(fallback, pools.not_understood[1]);
}
