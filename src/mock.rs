//! Mock HTTP transport for testing
//!
//! Provides a deterministic, network-free stand-in for the translation
//! endpoint so the translate, batch and facade layers can be exercised
//! without hitting Google.
//!
//! # Example
//!
//! ```ignore
//! use gtranslate::{MockMode, MockTransport, translate, TranslateOptions};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTransport::new(MockMode::Suffix);
//!     let result = translate(&mock, "hello", &TranslateOptions::to("fr")).await.unwrap();
//!     assert_eq!(result, "hello_fr");
//! }
//! ```

use crate::codec::RPC_ID;
use crate::error::{MtError, MtResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// How the mock endpoint answers
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Decode the request and answer with a well-formed translation where each
    /// `|||`-separated piece gets a target suffix: "hello" → "hello_fr"
    Suffix,

    /// Answer every request with the same response
    Fixed(HttpResponse),

    /// Answer requests in order from a script; running past the end is a
    /// transport error
    Sequence(Vec<MtResult<HttpResponse>>),

    /// Fail every request at the transport level
    Error(String),
}

/// Text and languages recovered from an `f.req` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRequest {
    pub text: String,
    pub from: String,
    pub to: String,
}

/// Mock transport recording every request it receives
#[derive(Debug)]
pub struct MockTransport {
    mode: MockMode,
    script: Mutex<VecDeque<MtResult<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
}

impl MockTransport {
    pub fn new(mode: MockMode) -> Self {
        let script = match &mode {
            MockMode::Sequence(responses) => responses.iter().cloned().collect(),
            _ => VecDeque::new(),
        };

        Self {
            mode,
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
            delay_ms: 0,
        }
    }

    /// Create a MockTransport with simulated network delay
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .map(|requests| requests.len())
            .unwrap_or_default()
    }

    /// Decoded `f.req` payloads of all requests received so far
    pub fn decoded_requests(&self) -> Vec<DecodedRequest> {
        self.requests()
            .iter()
            .filter_map(|request| decode_request_body(&request.body))
            .collect()
    }

    fn answer(&self, request: &HttpRequest) -> MtResult<HttpResponse> {
        match &self.mode {
            MockMode::Suffix => {
                let decoded = decode_request_body(&request.body).ok_or_else(|| {
                    MtError::Request("mock could not decode request body".to_string())
                })?;
                let translated = decoded
                    .text
                    .split("|||")
                    .map(|piece| format!("{}_{}", piece.trim(), decoded.to))
                    .collect::<Vec<_>>()
                    .join(" ||| ");
                Ok(HttpResponse::new(200, response_body(&[&translated])))
            }
            MockMode::Fixed(response) => Ok(response.clone()),
            MockMode::Sequence(_) => self
                .script
                .lock()
                .ok()
                .and_then(|mut script| script.pop_front())
                .unwrap_or_else(|| Err(MtError::Request("mock script exhausted".to_string()))),
            MockMode::Error(msg) => Err(MtError::Request(msg.clone())),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post(&self, request: HttpRequest) -> MtResult<HttpResponse> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let response = self.answer(&request);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        response
    }
}

/// Build an endpoint-shaped response body carrying the given segments
pub fn response_body(segments: &[&str]) -> String {
    let segments: Vec<Value> = segments.iter().map(|s| json!([s, null, null, []])).collect();
    let payload = json!([
        [null, null, null, null],
        [[[null, null, null, null, null, segments]], "auto", 1, "en"]
    ]);
    let envelope = json!([["wrb.fr", RPC_ID, payload.to_string(), null, null, null, "generic"]]);
    format!(")]}}'\n\n{}", envelope)
}

/// Recover text and languages from an `f.req=...&` body
pub fn decode_request_body(body: &str) -> Option<DecodedRequest> {
    let encoded = body.strip_prefix("f.req=")?.strip_suffix('&')?;
    let decoded = percent_decode_str(encoded).decode_utf8().ok()?;
    let outer: Value = serde_json::from_str(&decoded).ok()?;
    let inner: Value = serde_json::from_str(outer.get(0)?.get(0)?.get(1)?.as_str()?).ok()?;
    let request = inner.get(0)?;

    Some(DecodedRequest {
        text: request.get(0)?.as_str()?.to_string(),
        from: request.get(1)?.as_str()?.to_string(),
        to: request.get(2)?.as_str()?.to_string(),
    })
}
