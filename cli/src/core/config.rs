//! # TechSupport Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for the TechSupport Assistant,
//! handling loading, merging, validation, and access to configuration data. It
//! combines built-in defaults, user settings, and project-specific overrides.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (the only file read when given)
//! 2. Project-specific `.techsupport.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [bot]
//! name = "Helpdesk"
//!
//! [session]
//! personalization_rate = 0.5
//! seed = 7
//!
//! [responses]
//! greeting = ["Hey! What can I do for you?"]
//!
//! [responses.issue]
//! "billing issue" = ["Billing is on it. When was the {{ product }} purchased?"]
//! ```
//!
//! ```rust,ignore
//! let cfg = config::load_config(None)?;
//! let rate = cfg.session.personalization_rate;
//! ```
//!
use crate::core::error::{ChatbotError, Result};
use crate::dialogue::responses::ResponsePools;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub responses: ResponsePools,
}

/// Presentation settings for the terminal front end.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Speaker label printed in front of every reply.
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// First line shown when an interactive chat starts.
    #[serde(default = "default_welcome")]
    pub welcome: String,
}

/// Per-conversation behaviour of the dialogue session.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Probability in `[0, 1]` that a known user name is woven into a reply.
    #[serde(default = "default_personalization_rate")]
    pub personalization_rate: f64,
    /// Seconds of simulated typing per reply character.
    #[serde(default = "default_typing_delay_per_char")]
    pub typing_delay_per_char: f64,
    /// Upper bound on the simulated typing delay, in seconds.
    #[serde(default = "default_max_typing_delay")]
    pub max_typing_delay: f64,
    /// Fixed seed for template selection. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            welcome: default_welcome(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            personalization_rate: default_personalization_rate(),
            typing_delay_per_char: default_typing_delay_per_char(),
            max_typing_delay: default_max_typing_delay(),
            seed: None,
        }
    }
}

fn default_bot_name() -> String {
    "TechSupport Assistant".to_string()
}
fn default_welcome() -> String {
    "Hello! I'm the TechSupport Assistant. How can I help you today?".to_string()
}
fn default_personalization_rate() -> f64 {
    0.3
}
fn default_typing_delay_per_char() -> f64 {
    0.01
}
fn default_max_typing_delay() -> f64 {
    1.5
}

const PROJECT_CONFIG_FILENAME: &str = ".techsupport.toml";

/// Loads the effective configuration.
///
/// When `explicit_path` is given (after `~` expansion) it is the only file read and
/// must exist. Otherwise the user and project files are merged over the defaults.
pub fn load_config(explicit_path: Option<&str>) -> Result<Config> {
    let config = match explicit_path {
        Some(raw) => {
            let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());
            if !expanded.is_file() {
                return Err(anyhow!(ChatbotError::Config(format!(
                    "Configuration file '{}' does not exist.",
                    expanded.display()
                ))));
            }
            info!("Loading configuration from: {}", expanded.display());
            load_config_from_path(&expanded)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "TechSupport", "techsupport") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.techsupport.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for the project file.
/// The search stops at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the built-in default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    let mut merged = Config::default();

    merged.bot.name = if project_cfg.bot.name != defaults.bot.name {
        project_cfg.bot.name
    } else {
        user.bot.name
    };
    merged.bot.welcome = if project_cfg.bot.welcome != defaults.bot.welcome {
        project_cfg.bot.welcome
    } else {
        user.bot.welcome
    };
    merged.session.personalization_rate =
        if project_cfg.session.personalization_rate != defaults.session.personalization_rate {
            project_cfg.session.personalization_rate
        } else {
            user.session.personalization_rate
        };
    merged.session.typing_delay_per_char =
        if project_cfg.session.typing_delay_per_char != defaults.session.typing_delay_per_char {
            project_cfg.session.typing_delay_per_char
        } else {
            user.session.typing_delay_per_char
        };
    merged.session.max_typing_delay =
        if project_cfg.session.max_typing_delay != defaults.session.max_typing_delay {
            project_cfg.session.max_typing_delay
        } else {
            user.session.max_typing_delay
        };
    merged.session.seed = project_cfg.session.seed.or(user.session.seed);
    merged.responses = user.responses.overlay(project_cfg.responses, &defaults.responses);
    merged
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.bot.name.trim().is_empty() {
        return Err(anyhow!(ChatbotError::Config(
            "bot.name cannot be empty.".to_string()
        )));
    }
    let rate = config.session.personalization_rate;
    if !(0.0..=1.0).contains(&rate) {
        return Err(anyhow!(ChatbotError::Config(format!(
            "session.personalization_rate must be between 0 and 1, got {}.",
            rate
        ))));
    }
    for (key, value) in [
        ("typing_delay_per_char", config.session.typing_delay_per_char),
        ("max_typing_delay", config.session.max_typing_delay),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(anyhow!(ChatbotError::Config(format!(
                "session.{} must be a non-negative number, got {}.",
                key, value
            ))));
        }
    }
    config.responses.validate()?;
    info!("Configuration validation successful.");
    Ok(())
}
