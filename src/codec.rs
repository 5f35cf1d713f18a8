//! Wire format of the `batchexecute` translation RPC
//!
//! The web endpoint takes a form-encoded `f.req` parameter holding a nested
//! array literal whose second element is itself a JSON string. The response
//! mirrors this: an anti-XSSI prefix, an outer JSON array, and the real
//! payload double-encoded as a string at `[0][2]`.
//!
//! # Example
//!
//! ```ignore
//! use gtranslate::codec::{build_request_body, build_translate_url, parse_response};
//!
//! let url = build_translate_url();
//! let body = build_request_body("Hello", "auto", "fr");
//! // ... POST `body` to `url` ...
//! let text = parse_response(&response_body)?;
//! ```

use crate::error::{MtError, MtResult, truncate_chars};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

/// RPC id of the translate call
pub const RPC_ID: &str = "MkEWBc";

/// Base endpoint, without query parameters
pub const TRANSLATE_ENDPOINT: &str =
    "https://translate.google.com/_/TranslateWebserverUi/data/batchexecute";

/// Anti-XSSI line the endpoint prepends to JSON bodies
const SAFETY_PREFIX: &str = ")]}'";

/// Diagnostic prefix length kept from unparseable bodies
pub const RAW_SNIPPET_CHARS: usize = 500;

/// Characters `encodeURIComponent` leaves alone: alphanumerics and `-_.!~*'()`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the `f.req=...&` form body for one translation
///
/// The text is trimmed and escaped so that it survives both JSON decodes
/// on the server: a quote becomes `\\\"` and each line break becomes `\\n`.
/// No validation happens here.
///
/// # Example
///
/// ```ignore
/// let body = build_request_body("Hello", "auto", "pt");
/// assert!(body.starts_with("f.req="));
/// assert!(body.ends_with('&'));
/// ```
pub fn build_request_body(text: &str, from: &str, to: &str) -> String {
    let escaped = text
        .trim()
        .replace('"', "\\\\\\\"")
        .replace("\r\n", "\\\\n")
        .replace(['\r', '\n'], "\\\\n");

    let payload = format!(
        r#"[[["{}","[[\"{}\",\"{}\",\"{}\",1],[]]",null,"generic"]]]"#,
        RPC_ID, escaped, from, to
    );

    format!("f.req={}&", utf8_percent_encode(&payload, URI_COMPONENT))
}

/// Build the endpoint URL with its fixed query parameters
pub fn build_translate_url() -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("rpcids", RPC_ID)
        .append_pair("source-path", "/")
        .append_pair("hl", "en")
        .append_pair("soc-app", "1")
        .append_pair("soc-platform", "1")
        .append_pair("soc-device", "1")
        .finish();

    format!("{}?{}", TRANSLATE_ENDPOINT, query)
}

/// Translated text segments recovered from a decoded payload, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslatedSegments(pub Vec<String>);

impl TranslatedSegments {
    /// Join all segments with single spaces
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Walk `[1][0][0][5]` of the inner payload and collect each segment's `[0]` string
///
/// Returns `None` as soon as any level is missing or has the wrong type.
pub fn decode_segments(payload: &Value) -> Option<TranslatedSegments> {
    let segments = payload
        .get(1)?
        .get(0)?
        .get(0)?
        .get(5)?
        .as_array()?;

    segments
        .iter()
        .map(|segment| segment.get(0)?.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .map(TranslatedSegments)
}

/// Parse a response body into the translated text
///
/// Failure modes, in the order they are checked: empty body, HTML page
/// (rate limit / CAPTCHA), either of the two JSON parses, and finally a
/// payload that lacks the segment array.
pub fn parse_response(data: &str) -> MtResult<String> {
    if data.is_empty() {
        return Err(MtError::format("Empty response", ""));
    }

    let cleaned = strip_safety_prefix(data);
    let raw = || truncate_chars(cleaned, RAW_SNIPPET_CHARS);

    if cleaned.contains("<!DOCTYPE") || cleaned.contains("<html") {
        return Err(MtError::Blocked { raw: raw() });
    }

    let outer: Value = serde_json::from_str(cleaned)
        .map_err(|e| MtError::format(format!("Parse error: {}", e), raw()))?;

    let payload: Value = match outer.get(0).and_then(|entry| entry.get(2)) {
        Some(Value::String(inner)) => serde_json::from_str(inner)
            .map_err(|e| MtError::format(format!("Parse error: {}", e), raw()))?,
        // Scalars parse as JSON on their own and just lack the segment array
        Some(scalar @ (Value::Null | Value::Bool(_) | Value::Number(_))) => scalar.clone(),
        Some(_) | None => {
            return Err(MtError::format(
                "Parse error: no JSON string payload at [0][2]",
                raw(),
            ));
        }
    };

    decode_segments(&payload)
        .map(|segments| segments.joined())
        .ok_or_else(|| MtError::format("Unexpected structure", raw()))
}

fn strip_safety_prefix(data: &str) -> &str {
    match data.strip_prefix(SAFETY_PREFIX) {
        Some(rest) => rest.strip_prefix('\n').unwrap_or(rest),
        None => data,
    }
}
