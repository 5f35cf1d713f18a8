/// Error types for translation requests
///
/// Every failure is returned to the caller as a value; nothing here is
/// retried or treated as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Rejected input (empty text, missing target language, empty batch)
    InvalidInput(String),
    /// The request never produced an HTTP response (DNS, connect, timeout)
    Request(String),
    /// The endpoint answered with a non-2xx status
    HttpStatus { status: u16, raw: String },
    /// The endpoint served an HTML page instead of JSON (rate limit or CAPTCHA)
    Blocked { raw: String },
    /// The body could not be decoded into translated segments
    Format { message: String, raw: String },
    /// A batch chunk failed; wraps the chunk's error
    Batch(Box<MtError>),
    /// Invalid configuration value
    ConfigError(String),
}

impl MtError {
    pub(crate) fn invalid_input(msg: &str) -> Self {
        MtError::InvalidInput(msg.to_string())
    }

    pub(crate) fn format(message: impl Into<String>, raw: impl Into<String>) -> Self {
        MtError::Format {
            message: message.into(),
            raw: raw.into(),
        }
    }

    /// Leading part of the offending response body, when there was one
    pub fn raw(&self) -> Option<&str> {
        let raw = match self {
            MtError::HttpStatus { raw, .. } => raw,
            MtError::Blocked { raw } => raw,
            MtError::Format { raw, .. } => raw,
            MtError::Batch(inner) => return inner.raw(),
            _ => return None,
        };
        if raw.is_empty() { None } else { Some(raw) }
    }

    /// True when the endpoint refused us with an HTML page, directly or inside a batch
    pub fn is_blocked(&self) -> bool {
        match self {
            MtError::Blocked { .. } => true,
            MtError::Batch(inner) => inner.is_blocked(),
            _ => false,
        }
    }
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::InvalidInput(msg) => write!(f, "{}", msg),
            MtError::Request(msg) => write!(f, "Request error: {}", msg),
            MtError::HttpStatus { status, .. } => write!(f, "HTTP {}", status),
            MtError::Blocked { .. } => write!(f, "HTML response (rate limit/captcha)"),
            MtError::Format { message, .. } => write!(f, "{}", message),
            MtError::Batch(inner) => write!(f, "Batch translation failed: {}", inner),
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::Request(err.to_string())
    }
}

/// Result type for translation operations
pub type MtResult<T> = Result<T, MtError>;

/// Keep at most `max_chars` characters of `text`, never splitting a code point
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
