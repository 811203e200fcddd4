//! TOML Configuration File Support
//!
//! Configuration is loaded from `~/.config/botsrig/config.toml` and the
//! environment. The API credential only ever comes from the environment
//! (or a `.env` file in the working directory).
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [completion]
//! api_url = "https://api.groq.com/openai/v1/chat/completions"
//! model = "llama3-70b-8192"
//! max_tokens = 1024
//!
//! [ui]
//! default_topic = "Python"
//! default_style = "Balanced"
//! ```
//!
//! A missing credential is not an error here. It shows up later as an
//! authorization failure on the first completion call.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::GROQ_API_URL;
use crate::router::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::topic::{ResponseStyle, Topic};

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment override for the endpoint URL
pub const API_URL_ENV: &str = "BOTSRIG_API_URL";
/// Environment override for the model identifier
pub const MODEL_ENV: &str = "BOTSRIG_MODEL";
/// Environment override for the reply size bound
pub const MAX_TOKENS_ENV: &str = "BOTSRIG_MAX_TOKENS";
/// Environment override for the topic selected at startup
pub const DEFAULT_TOPIC_ENV: &str = "BOTSRIG_DEFAULT_TOPIC";
/// Environment override for the style selected at startup
pub const DEFAULT_STYLE_ENV: &str = "BOTSRIG_DEFAULT_STYLE";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Completion section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionToml {
    /// Chat-completions endpoint URL
    pub api_url: Option<String>,

    /// Model identifier
    pub model: Option<String>,

    /// Maximum tokens in a reply
    pub max_tokens: Option<u32>,
}

/// UI section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiToml {
    /// Topic selected at startup ("Python", "C++", "Arduino", "Raspberry Pi")
    pub default_topic: Option<String>,

    /// Style selected at startup ("Precise", "Balanced", "Exploratory")
    pub default_style: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotsrigToml {
    /// Completion endpoint section
    pub completion: CompletionToml,

    /// UI section
    pub ui: UiToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Chat-completions endpoint URL
    pub api_url: String,

    /// Bearer credential, if set
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// Maximum tokens in a reply
    pub max_tokens: u32,

    /// Topic selected at startup
    pub default_topic: Topic,

    /// Style selected at startup
    pub default_style: ResponseStyle,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: GROQ_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            default_topic: Topic::default(),
            default_style: ResponseStyle::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("default_topic", &self.default_topic)
            .field("default_style", &self.default_style)
            .field("config_file_path", &self.config_file_path)
            .field("source", &self.source)
            .finish()
    }
}

impl AppConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/botsrig/config.toml` or
/// `~/.config/botsrig/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("botsrig").join("config.toml"))
}

/// Load configuration from all sources with proper priority
///
/// Reads `./.env` into the process environment first, if present.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    match dotenv::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    let mut config = load_file_config(path)?;

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config, |key| std::env::var(key).ok());

    if config.api_key.is_none() {
        tracing::warn!("{API_KEY_ENV} is not set; completion requests will be unauthorized");
    }

    Ok(config)
}

/// Defaults overlaid with the TOML file, without looking at the environment
fn load_file_config(path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    // Start with defaults
    let mut config = AppConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: BotsrigToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut AppConfig, toml: &BotsrigToml) -> Result<(), ConfigError> {
    // Completion settings
    if let Some(ref url) = toml.completion.api_url {
        config.api_url.clone_from(url);
    }
    if let Some(ref model) = toml.completion.model {
        config.model.clone_from(model);
    }
    if let Some(max_tokens) = toml.completion.max_tokens {
        if max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "completion.max_tokens must be greater than zero".to_string(),
            ));
        }
        config.max_tokens = max_tokens;
    }

    // UI settings
    if let Some(ref topic) = toml.ui.default_topic {
        config.default_topic = topic
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("ui.default_topic: {e}")))?;
    }
    if let Some(ref style) = toml.ui.default_style {
        config.default_style = style
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("ui.default_style: {e}")))?;
    }

    Ok(())
}

/// Apply environment variable overrides to the config
///
/// `lookup` returns the value of an environment variable, if set.
/// Unparseable values are logged and ignored.
pub fn apply_env_config(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key);
    }
    if let Some(url) = lookup(API_URL_ENV) {
        config.api_url = url;
        config.source = ConfigSource::Env;
    }
    if let Some(model) = lookup(MODEL_ENV) {
        config.model = model;
        config.source = ConfigSource::Env;
    }
    if let Some(max_tokens) = lookup(MAX_TOKENS_ENV) {
        match max_tokens.parse::<u32>() {
            Ok(n) if n > 0 => {
                config.max_tokens = n;
                config.source = ConfigSource::Env;
            }
            _ => tracing::warn!(value = %max_tokens, "Ignoring invalid {MAX_TOKENS_ENV}"),
        }
    }
    if let Some(topic) = lookup(DEFAULT_TOPIC_ENV) {
        match topic.parse::<Topic>() {
            Ok(t) => {
                config.default_topic = t;
                config.source = ConfigSource::Env;
            }
            Err(e) => tracing::warn!(error = %e, "Ignoring invalid {DEFAULT_TOPIC_ENV}"),
        }
    }
    if let Some(style) = lookup(DEFAULT_STYLE_ENV) {
        match style.parse::<ResponseStyle>() {
            Ok(s) => {
                config.default_style = s;
                config.source = ConfigSource::Env;
            }
            Err(e) => tracing::warn!(error = %e, "Ignoring invalid {DEFAULT_STYLE_ENV}"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
