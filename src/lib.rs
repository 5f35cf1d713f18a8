//! Client for the unofficial Google Translate web endpoint
//!
//! The endpoint behind translate.google.com speaks a `batchexecute` RPC
//! format: a form-encoded, double-JSON-encoded request and a response that is
//! prefixed, nested and double-encoded in the same way. This crate builds
//! those requests, decodes the responses defensively, and layers sequential
//! batch translation and a small facade with default languages on top.
//!
//! # Workflow Example
//!
//! ```ignore
//! use gtranslate::{BatchOptions, TranslateOptions, Translator, translate, translate_batch};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let translator = Translator::new()?;
//!
//!     // 1. One text, default languages (auto → en)
//!     let text = translator.translate("Bonjour le monde", None, None).await?;
//!
//!     // 2. One text through the free function and an explicit transport
//!     let pt = translate(translator.transport(), "Hello", &TranslateOptions::to("pt")).await?;
//!
//!     // 3. Many texts, chunked into requests of at most 50 items
//!     let texts = vec!["Hello".to_string(), "Good morning".to_string()];
//!     let es = translate_batch(translator.transport(), &texts, &BatchOptions::to("es")).await?;
//!
//!     println!("{} / {} / {:?}", text, pt, es);
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod codec;
pub mod config;
pub mod data;
pub mod error;
pub mod mock;
pub mod translate;
pub mod translator;
pub mod transport;


// Re-export main types for convenient access
pub use batch::{clean_text, translate_batch};
pub use codec::{
    TranslatedSegments, build_request_body, build_translate_url, decode_segments, parse_response,
};
pub use config::{ClientConfig, TranslatorConfig};
pub use data::{BatchOptions, TranslateOptions, TranslationResult};
pub use error::{MtError, MtResult};
pub use mock::{MockMode, MockTransport};
pub use translate::translate;
pub use translator::{MachineTranslator, Translator};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
