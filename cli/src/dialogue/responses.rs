//! # Response Synthesis
//!
//! File: cli/src/dialogue/responses.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns a classified intent plus the extracted entities into the reply text.
//! Replies come from *response pools*: lists of interchangeable variants from
//! which one is chosen uniformly at random. Pools for product information and
//! for each issue category carry slots (`{{ product }}`, `{{ order_number }}`)
//! and are compiled into a `TemplateRegistry` when the synthesizer is built.
//!
//! ## Policy per intent
//!
//! | Intent        | Reply                                                               |
//! |---------------|---------------------------------------------------------------------|
//! | Greeting      | random greeting                                                     |
//! | Farewell      | random farewell                                                     |
//! | ProductInfo   | random product template, or "Which product ..." when none is known  |
//! | Issue         | category template, else product sentence, else generic clarifier   |
//! | Order         | order lookup sentence, or a request for the order number            |
//! | General       | "I see you're asking about ..." when any entity exists, else random |
//!
//! Issue templates always receive both slots: a missing product renders as
//! `product` and a missing order number as `[order number]`.
//!
//! The `not_understood` pool is not routed to by any intent. It stays available
//! through `ResponseSynthesizer::not_understood`.
//!
use crate::core::error::{ChatbotError, Result};
use crate::core::templating::TemplateRegistry;
use crate::dialogue::entities::EntityBundle;
use crate::dialogue::intent::Intent;
use crate::dialogue::random::{choose_index, choose_uniformly, RandomSource};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error};

pub const PRODUCT_CLARIFY: &str = "Which product would you like information about?";
pub const ISSUE_CLARIFY: &str = "I'd like to help with your issue. Could you please provide more details about the problem and which product it concerns?";
pub const ORDER_CLARIFY: &str =
    "I can help with order-related questions. Do you have your order number handy?";

const PRODUCT_PLACEHOLDER: &str = "product";
const ORDER_NUMBER_PLACEHOLDER: &str = "[order number]";

/// All reply variants, keyed by pool. Each pool replaces its default when given in
/// configuration; issue categories are replaced one by one.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResponsePools {
    #[serde(default = "default_greeting")]
    pub greeting: Vec<String>,
    #[serde(default = "default_farewell")]
    pub farewell: Vec<String>,
    #[serde(default = "default_product_info")]
    pub product_info: Vec<String>,
    #[serde(
        default = "default_issue_pools",
        deserialize_with = "issue_pools_over_defaults"
    )]
    pub issue: BTreeMap<String, Vec<String>>,
    #[serde(default = "default_general")]
    pub general: Vec<String>,
    #[serde(default = "default_not_understood")]
    pub not_understood: Vec<String>,
}

impl Default for ResponsePools {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            farewell: default_farewell(),
            product_info: default_product_info(),
            issue: default_issue_pools(),
            general: default_general(),
            not_understood: default_not_understood(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_greeting() -> Vec<String> {
    strings(&[
        "Hello! How can I help you today?",
        "Hi there! I'm the customer service chatbot. What can I assist you with?",
        "Welcome! How may I assist you with our products or services today?",
    ])
}

fn default_farewell() -> Vec<String> {
    strings(&[
        "Thank you for chatting with us. Have a great day!",
        "Goodbye! Feel free to contact us again if you need further assistance.",
        "Thank you for your time. Is there anything else I can help you with before you go?",
    ])
}

fn default_product_info() -> Vec<String> {
    strings(&[
        "I'd be happy to provide information about our {{ product }}. What would you like to know?",
        "Our {{ product }} comes with a 1-year warranty. What specific details are you looking for?",
        "The {{ product }} is one of our most popular items. Do you have specific questions about it?",
    ])
}

fn default_issue_pools() -> BTreeMap<String, Vec<String>> {
    let mut pools = BTreeMap::new();
    pools.insert(
        "hardware issue".to_string(),
        strings(&[
            "I'm sorry to hear about the issue with your {{ product }}. Could you describe the problem in more detail?",
            "For hardware issues with your {{ product }}, we might need to arrange a repair. Can you tell me when you purchased it?",
        ]),
    );
    pools.insert(
        "performance issue".to_string(),
        strings(&[
            "Performance issues with {{ product }} can often be resolved with updates. Have you tried updating the software?",
            "I understand your {{ product }} is having performance problems. Have you tried restarting it?",
        ]),
    );
    pools.insert(
        "shipping issue".to_string(),
        strings(&[
            "I apologize for the shipping delay. Let me check the status of your order {{ order_number }}.",
            "Shipping issues can be frustrating. I'll help track your order {{ order_number }} right away.",
        ]),
    );
    pools.insert(
        "refund request".to_string(),
        strings(&[
            "I can help process a refund for your {{ product }}. Do you have your order number handy?",
            "For refund requests, I'll need your order number and the reason for return. Can you provide those details?",
        ]),
    );
    pools.insert(
        "billing issue".to_string(),
        strings(&[
            "I'm sorry about the billing concern. Could you verify the last 4 digits of the card used for the purchase?",
            "To help with your billing issue, I'll need some details about the transaction. When was the purchase made?",
        ]),
    );
    pools
}

fn default_general() -> Vec<String> {
    strings(&[
        "I'm here to help. Could you provide more details about your question?",
        "I want to make sure I understand correctly. Could you elaborate a bit more?",
        "Thank you for your question. Can you give me some more information so I can help you better?",
    ])
}

fn default_not_understood() -> Vec<String> {
    strings(&[
        "I'm sorry, I didn't quite understand that. Could you rephrase your question?",
        "I'm still learning and didn't catch that. Could you try explaining it differently?",
        "Hmm, I'm not sure I follow. Can you provide more details or ask in a different way?",
    ])
}

fn issue_pools_over_defaults<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
    let mut pools = default_issue_pools();
    pools.extend(overrides);
    Ok(pools)
}

impl ResponsePools {
    /// Every pool must offer at least one variant.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("greeting", &self.greeting),
            ("farewell", &self.farewell),
            ("product_info", &self.product_info),
            ("general", &self.general),
            ("not_understood", &self.not_understood),
        ];
        for (name, pool) in named {
            if pool.is_empty() {
                return Err(anyhow!(ChatbotError::EmptyPool {
                    pool: name.to_string()
                }));
            }
        }
        for (category, pool) in &self.issue {
            if pool.is_empty() {
                return Err(anyhow!(ChatbotError::EmptyPool {
                    pool: format!("issue.{}", category)
                }));
            }
        }
        Ok(())
    }

    /// Takes each pool from `other` when it differs from `defaults`, otherwise keeps `self`'s.
    pub fn overlay(self, other: ResponsePools, defaults: &ResponsePools) -> ResponsePools {
        fn pick(mine: Vec<String>, theirs: Vec<String>, default: &[String]) -> Vec<String> {
            if theirs.as_slice() != default {
                theirs
            } else {
                mine
            }
        }
        let mut issue = self.issue;
        for (category, pool) in other.issue {
            if defaults.issue.get(&category) != Some(&pool) {
                issue.insert(category, pool);
            }
        }
        ResponsePools {
            greeting: pick(self.greeting, other.greeting, &defaults.greeting),
            farewell: pick(self.farewell, other.farewell, &defaults.farewell),
            product_info: pick(self.product_info, other.product_info, &defaults.product_info),
            issue,
            general: pick(self.general, other.general, &defaults.general),
            not_understood: pick(
                self.not_understood,
                other.not_understood,
                &defaults.not_understood,
            ),
        }
    }
}

/// Maps `(intent, entities)` to reply text.
#[derive(Debug)]
pub struct ResponseSynthesizer {
    pools: ResponsePools,
    templates: TemplateRegistry,
}

impl ResponseSynthesizer {
    /// Validates the pools and compiles every slot-bearing template.
    pub fn new(pools: ResponsePools) -> Result<Self> {
        pools.validate()?;
        let mut templates = TemplateRegistry::new();
        for (i, source) in pools.product_info.iter().enumerate() {
            let name = product_template_name(i);
            register_checked(&mut templates, &name, source, PRODUCT_INFO_SLOTS)?;
        }
        for (category, pool) in &pools.issue {
            for (i, source) in pool.iter().enumerate() {
                let name = issue_template_name(category, i);
                register_checked(&mut templates, &name, source, ISSUE_SLOTS)
                    .with_context(|| format!("Invalid template in issue pool '{}'", category))?;
            }
        }
        debug!(
            "Response synthesizer ready with {} issue categories",
            pools.issue.len()
        );
        Ok(Self { pools, templates })
    }

    pub fn pools(&self) -> &ResponsePools {
        &self.pools
    }

    pub fn synthesize(
        &self,
        intent: Intent,
        entities: &EntityBundle,
        rng: &mut dyn RandomSource,
    ) -> String {
        match intent {
            Intent::Greeting => choose_uniformly(rng, &self.pools.greeting).to_string(),
            Intent::Farewell => choose_uniformly(rng, &self.pools.farewell).to_string(),
            Intent::ProductInfo => match &entities.product {
                Some(product) => {
                    let i = choose_index(rng, self.pools.product_info.len());
                    let mut slots = HashMap::new();
                    slots.insert("product".to_string(), product.clone());
                    self.render_or_raw(&product_template_name(i), &self.pools.product_info[i], &slots)
                }
                None => PRODUCT_CLARIFY.to_string(),
            },
            Intent::Issue => self.issue_reply(entities, rng),
            Intent::Order => match &entities.order_number {
                Some(number) => format!(
                    "Let me look up information for order number {}. Please wait a moment...",
                    number
                ),
                None => ORDER_CLARIFY.to_string(),
            },
            Intent::General => {
                if entities.is_empty() {
                    choose_uniformly(rng, &self.pools.general).to_string()
                } else {
                    format!(
                        "I see you're asking about {}. How can I help with that?",
                        entities.product.as_deref().unwrap_or("a product")
                    )
                }
            }
        }
    }

    /// Reserved reply for messages the engine cannot place.
    pub fn not_understood(&self, rng: &mut dyn RandomSource) -> String {
        choose_uniformly(rng, &self.pools.not_understood).to_string()
    }

    fn issue_reply(&self, entities: &EntityBundle, rng: &mut dyn RandomSource) -> String {
        let category_pool = entities
            .issue_type
            .as_ref()
            .and_then(|category| self.pools.issue.get_key_value(category));

        if let Some((category, pool)) = category_pool {
            let i = choose_index(rng, pool.len());
            let mut slots = HashMap::new();
            slots.insert(
                "product".to_string(),
                entities
                    .product
                    .clone()
                    .unwrap_or_else(|| PRODUCT_PLACEHOLDER.to_string()),
            );
            slots.insert(
                "order_number".to_string(),
                entities
                    .order_number
                    .clone()
                    .unwrap_or_else(|| ORDER_NUMBER_PLACEHOLDER.to_string()),
            );
            return self.render_or_raw(&issue_template_name(category, i), &pool[i], &slots);
        }

        match &entities.product {
            Some(product) => format!(
                "I understand you're having an issue with your {}. Could you describe the problem?",
                product
            ),
            None => ISSUE_CLARIFY.to_string(),
        }
    }

    fn render_or_raw(&self, name: &str, raw: &str, slots: &HashMap<String, String>) -> String {
        self.templates.render(name, slots).unwrap_or_else(|e| {
            error!("Falling back to raw template text: {:#}", e);
            raw.to_string()
        })
    }
}

/// Slots a product-info template may use. `product` is always known on that branch.
const PRODUCT_INFO_SLOTS: &[&str] = &["product"];
/// Slots an issue template may use. Missing values are filled with placeholders.
const ISSUE_SLOTS: &[&str] = &["product", "order_number"];

/// Compiles a template and renders it once with sample values for `slots`, so a
/// template naming any other variable is rejected before the first message.
fn register_checked(
    templates: &mut TemplateRegistry,
    name: &str,
    source: &str,
    slots: &[&str],
) -> Result<()> {
    templates.register(name, source)?;
    let sample: HashMap<String, String> = slots
        .iter()
        .map(|slot| (slot.to_string(), slot.to_string()))
        .collect();
    templates.render(name, &sample).with_context(|| {
        format!(
            "Response template '{}' may only use the slots: {}",
            name,
            slots.join(", ")
        )
    })?;
    Ok(())
}

fn product_template_name(index: usize) -> String {
    format!("product_info/{}", index)
}

fn issue_template_name(category: &str, index: usize) -> String {
    format!("issue/{}/{}", category, index)
}
