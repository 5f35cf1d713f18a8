/// Request options and result records for translation calls
use crate::config::AUTO_DETECT;
use crate::error::{MtError, MtResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Languages for a single translation
///
/// `to` is required at call time; an unset or empty value is rejected
/// before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    pub from: String,
    pub to: Option<String>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            from: AUTO_DETECT.to_string(),
            to: None,
        }
    }
}

impl TranslateOptions {
    /// Options targeting `to`, auto-detecting the source language
    pub fn to(to: &str) -> Self {
        Self {
            to: Some(to.to_string()),
            ..Self::default()
        }
    }

    pub fn source(mut self, from: &str) -> Self {
        self.from = from.to_string();
        self
    }

    /// The target language, if one was given and is non-empty
    pub(crate) fn target(&self) -> Option<&str> {
        self.to.as_deref().filter(|to| !to.is_empty())
    }
}

/// Options for batch translation
///
/// Items are grouped into chunks of at most `batch_size`, each chunk is sent
/// as one request with items joined by `delimiter`, and consecutive requests
/// are spaced by `delay`. Languages left as `None` are filled in by the
/// caller; a bare batch call treats a missing `from` as `auto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub batch_size: usize,
    pub delimiter: String,
    pub delay: Duration,
}

impl BatchOptions {
    pub const DEFAULT_BATCH_SIZE: usize = 50;
    pub const DEFAULT_DELIMITER: &'static str = " ||| ";
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

    /// Options targeting `to` with default chunking and pacing
    pub fn to(to: &str) -> Self {
        Self {
            to: Some(to.to_string()),
            ..Self::default()
        }
    }

    pub fn source(mut self, from: &str) -> Self {
        self.from = Some(from.to_string());
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Separator used to join items within one request
    ///
    /// Translated chunks are always split on `|||`, whatever the delimiter.
    /// A delimiter without `|||` in it brings each chunk back as one item.
    pub fn delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = delimiter.to_string();
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The per-request language options
    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions {
            from: self
                .from
                .clone()
                .filter(|from| !from.is_empty())
                .unwrap_or_else(|| AUTO_DETECT.to_string()),
            to: self.to.clone(),
        }
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            delimiter: Self::DEFAULT_DELIMITER.to_string(),
            delay: Self::DEFAULT_DELAY,
        }
    }
}

/// Flat record form of a translation outcome
///
/// Exactly one of `text` and `error` is set, matching `success`. `raw` only
/// accompanies failures that had a response body worth showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl TranslationResult {
    pub fn success(text: String) -> Self {
        Self {
            success: true,
            text: Some(text),
            error: None,
            raw: None,
        }
    }

    pub fn failure(error: &MtError) -> Self {
        Self {
            success: false,
            text: None,
            error: Some(error.to_string()),
            raw: error.raw().map(str::to_string),
        }
    }
}

impl From<MtResult<String>> for TranslationResult {
    fn from(result: MtResult<String>) -> Self {
        match result {
            Ok(text) => Self::success(text),
            Err(e) => Self::failure(&e),
        }
    }
}
