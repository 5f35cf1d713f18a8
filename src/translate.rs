//! Single-text translation against the web endpoint
//!
//! One call validates its input, sends exactly one POST through the given
//! transport and hands a 2xx body to the codec.
//!
//! # Example
//!
//! ```ignore
//! use gtranslate::{ReqwestTransport, ClientConfig, TranslateOptions, translate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = ReqwestTransport::new(&ClientConfig::default())?;
//!     let text = translate(&transport, "Hello world", &TranslateOptions::to("pt")).await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

use crate::codec::{build_request_body, build_translate_url, parse_response};
use crate::data::TranslateOptions;
use crate::error::{MtError, MtResult, truncate_chars};
use crate::transport::{HttpRequest, HttpTransport};
use tracing::{debug, warn};

/// Browser user agent; the endpoint throttles or rejects non-browser agents
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Form content type of the request body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Diagnostic prefix length kept from non-2xx bodies
pub const HTTP_ERROR_SNIPPET_CHARS: usize = 300;

/// Translate one text
///
/// # Arguments
///
/// * `transport` - HTTP transport used for the single request
/// * `text` - Text to translate; must be non-empty after trimming
/// * `options` - Source (default `auto`) and required target language
///
/// # Returns
///
/// * `Ok(String)` - The translated text
/// * `Err(MtError)` - Validation, transport, HTTP status or response format failure
pub async fn translate<T>(transport: &T, text: &str, options: &TranslateOptions) -> MtResult<String>
where
    T: HttpTransport + ?Sized,
{
    if text.trim().is_empty() {
        return Err(MtError::invalid_input("Text cannot be empty"));
    }

    let to = options
        .target()
        .ok_or_else(|| MtError::invalid_input("Target language is required"))?;

    let request = build_request(text, &options.from, to);
    debug!(
        from = %options.from,
        to = %to,
        chars = text.chars().count(),
        "Sending translation request"
    );

    let response = transport.post(request).await?;

    if !response.is_success() {
        warn!(status = response.status, "Translation endpoint returned an error status");
        return Err(MtError::HttpStatus {
            status: response.status,
            raw: truncate_chars(&response.body, HTTP_ERROR_SNIPPET_CHARS),
        });
    }

    parse_response(&response.body).inspect_err(|e| {
        if e.is_blocked() {
            warn!("Translation endpoint served an HTML page, likely rate limited");
        } else {
            warn!(error = %e, "Could not decode translation response");
        }
    })
}

/// Assemble the POST request for one translation
pub fn build_request(text: &str, from: &str, to: &str) -> HttpRequest {
    HttpRequest {
        url: build_translate_url(),
        headers: vec![
            ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
            ("User-Agent".to_string(), BROWSER_USER_AGENT.to_string()),
        ],
        body: build_request_body(text, from, to),
    }
}
