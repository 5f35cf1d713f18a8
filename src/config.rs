//! Configuration values for the translator facade and its HTTP client
//!
//! Both types have sensible defaults and can be loaded from environment
//! variables, mirroring how providers are usually constructed from the
//! environment in deployment.

use crate::error::{MtError, MtResult};
use std::time::Duration;

/// Source language meaning "let the endpoint detect it"
pub const AUTO_DETECT: &str = "auto";

/// Environment variable holding the default target language
pub const ENV_TARGET_LANG: &str = "GTRANSLATE_TARGET_LANG";
/// Environment variable holding the default source language
pub const ENV_SOURCE_LANG: &str = "GTRANSLATE_SOURCE_LANG";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "GTRANSLATE_TIMEOUT_SECS";

/// Default languages bound to a `Translator`
///
/// Updates return a new value instead of mutating shared state.
///
/// # Example
///
/// ```ignore
/// let config = TranslatorConfig::default()
///     .with_default_target_language("pt")
///     .with_default_source_language("en");
/// assert_eq!(config.default_to, "pt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub default_from: String,
    pub default_to: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            default_from: AUTO_DETECT.to_string(),
            default_to: "en".to_string(),
        }
    }
}

impl TranslatorConfig {
    pub fn new(default_to: &str, default_from: &str) -> Self {
        Self {
            default_from: default_from.to_string(),
            default_to: default_to.to_string(),
        }
    }

    pub fn with_default_target_language(self, lang: &str) -> Self {
        Self {
            default_to: lang.to_string(),
            ..self
        }
    }

    pub fn with_default_source_language(self, lang: &str) -> Self {
        Self {
            default_from: lang.to_string(),
            ..self
        }
    }

    /// Load defaults from `GTRANSLATE_TARGET_LANG` / `GTRANSLATE_SOURCE_LANG`
    ///
    /// Unset variables keep the built-in defaults; a variable set to an
    /// empty string is rejected.
    pub fn from_env() -> MtResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MtResult<Self> {
        let mut config = Self::default();

        if let Some(to) = lookup(ENV_TARGET_LANG) {
            config.default_to = non_empty(ENV_TARGET_LANG, to)?;
        }
        if let Some(from) = lookup(ENV_SOURCE_LANG) {
            config.default_from = non_empty(ENV_SOURCE_LANG, from)?;
        }

        Ok(config)
    }
}

/// Settings for the production HTTP client
///
/// There is no timeout unless one is configured; the endpoint call then
/// waits as long as the underlying connection does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Load settings from `GTRANSLATE_TIMEOUT_SECS`
    pub fn from_env() -> MtResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MtResult<Self> {
        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    MtError::ConfigError(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        ENV_TIMEOUT_SECS, value
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self { timeout })
    }
}

fn non_empty(key: &str, value: String) -> MtResult<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(MtError::ConfigError(format!("{} cannot be empty", key)));
    }
    Ok(value)
}
