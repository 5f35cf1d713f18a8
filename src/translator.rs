//! Translator facade and the provider trait
//!
//! `Translator` binds default source and target languages to a transport so
//! callers can translate with just the text. It also implements
//! `MachineTranslator`, the generic provider abstraction, so code written
//! against the trait can use it or a different backend interchangeably.
//!
//! # Example
//!
//! ```ignore
//! use gtranslate::Translator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut translator = Translator::new()?;
//!
//!     // Default target is English, source is auto-detected
//!     println!("{}", translator.translate("Bonjour le monde", None, None).await?);
//!
//!     translator.set_default_target_language("pt");
//!     let texts = vec!["Hello".to_string(), "Thank you".to_string()];
//!     println!("{:?}", translator.translate_batch(&texts, None, None, None).await?);
//!
//!     Ok(())
//! }
//! ```

use crate::batch::translate_batch;
use crate::config::{ClientConfig, TranslatorConfig};
use crate::data::{BatchOptions, TranslateOptions};
use crate::error::MtResult;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::translate::translate;
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// All methods are async to support I/O-bound operations like network requests.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code, or `auto` to detect it
    /// * `target_locale` - Target language code (e.g., "fr", "zh-CN")
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Translate multiple strings, returning results in input order
    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>>;

    /// Get the name of this translation provider
    ///
    /// Used for logging and debugging to identify which provider handled a translation.
    fn provider_name(&self) -> &str;
}

/// Web translation client with bound default languages
pub struct Translator<T: HttpTransport = ReqwestTransport> {
    transport: T,
    config: TranslatorConfig,
}

impl Translator<ReqwestTransport> {
    /// Translator with default languages (`auto` → `en`) and a default HTTP client
    pub fn new() -> MtResult<Self> {
        let transport = ReqwestTransport::new(&ClientConfig::default())?;
        Ok(Self::with_transport(transport, TranslatorConfig::default()))
    }

    /// Translator configured from `GTRANSLATE_*` environment variables
    pub fn from_env() -> MtResult<Self> {
        let transport = ReqwestTransport::new(&ClientConfig::from_env()?)?;
        Ok(Self::with_transport(transport, TranslatorConfig::from_env()?))
    }
}

impl<T: HttpTransport> Translator<T> {
    pub fn with_transport(transport: T, config: TranslatorConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Replace the bound defaults, keeping the transport
    pub fn with_config(self, config: TranslatorConfig) -> Self {
        Self { config, ..self }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_default_target_language(&mut self, lang: &str) {
        self.config = self.config.clone().with_default_target_language(lang);
    }

    pub fn set_default_source_language(&mut self, lang: &str) {
        self.config = self.config.clone().with_default_source_language(lang);
    }

    /// Translate one text, falling back to the bound defaults for omitted languages
    ///
    /// An empty language counts as omitted.
    pub async fn translate(
        &self,
        text: &str,
        to: Option<&str>,
        from: Option<&str>,
    ) -> MtResult<String> {
        let options = TranslateOptions {
            from: pick(&[from], &self.config.default_from),
            to: Some(pick(&[to], &self.config.default_to)),
        };
        translate(&self.transport, text, &options).await
    }

    /// Translate many texts
    ///
    /// Languages set in `options` win, then the per-call languages, then the
    /// bound defaults. Chunk size, delimiter and delay come from `options`
    /// (or their defaults).
    pub async fn translate_batch(
        &self,
        texts: &[String],
        to: Option<&str>,
        from: Option<&str>,
        options: Option<BatchOptions>,
    ) -> MtResult<Vec<String>> {
        let options = options.unwrap_or_default();
        let from = pick(&[options.from.as_deref(), from], &self.config.default_from);
        let to = pick(&[options.to.as_deref(), to], &self.config.default_to);
        let options = BatchOptions {
            from: Some(from),
            to: Some(to),
            ..options
        };

        translate_batch(&self.transport, texts, &options).await
    }
}

/// First non-empty language among `candidates`, else `fallback`
fn pick(candidates: &[Option<&str>], fallback: &str) -> String {
    candidates
        .iter()
        .flatten()
        .find(|lang| !lang.is_empty())
        .copied()
        .unwrap_or(fallback)
        .to_string()
}

impl<T: HttpTransport + std::fmt::Debug> std::fmt::Debug for Translator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("transport", &self.transport)
            .field("default_from", &self.config.default_from)
            .field("default_to", &self.config.default_to)
            .finish()
    }
}

#[async_trait]
impl<T: HttpTransport> MachineTranslator for Translator<T> {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        Translator::<T>::translate(self, text, Some(target_locale), Some(source_locale)).await
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        Translator::<T>::translate_batch(
            self,
            texts,
            Some(target_locale),
            Some(source_locale),
            None,
        )
        .await
    }

    fn provider_name(&self) -> &str {
        "Google Translate (web)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockMode, MockTransport};
    use std::time::Duration;

    fn mock_translator() -> Translator<MockTransport> {
        Translator::with_transport(
            MockTransport::new(MockMode::Suffix),
            TranslatorConfig::default(),
        )
    }

    // ========== Default Language Tests ==========

    #[tokio::test]
    async fn test_uses_bound_defaults() {
        let translator = mock_translator();
        let result = translator.translate("hola", None, None).await.unwrap();
        assert_eq!(result, "hola_en");

        let decoded = &translator.transport().decoded_requests()[0];
        assert_eq!(decoded.from, "auto");
        assert_eq!(decoded.to, "en");
    }

    #[tokio::test]
    async fn test_empty_languages_fall_back_to_defaults() {
        let translator = mock_translator();
        let result = translator.translate("hola", Some(""), Some("")).await.unwrap();
        assert_eq!(result, "hola_en");

        let decoded = &translator.transport().decoded_requests()[0];
        assert_eq!(decoded.from, "auto");
        assert_eq!(decoded.to, "en");
    }

    #[tokio::test]
    async fn test_per_call_languages_override_defaults() {
        let translator = mock_translator();
        translator
            .translate("hello", Some("ja"), Some("en"))
            .await
            .unwrap();

        let decoded = &translator.transport().decoded_requests()[0];
        assert_eq!(decoded.from, "en");
        assert_eq!(decoded.to, "ja");
    }

    #[tokio::test]
    async fn test_set_defaults_affect_later_calls() {
        let mut translator = mock_translator();
        translator.set_default_target_language("pt");
        translator.set_default_source_language("en");

        let result = translator.translate("hello", None, None).await.unwrap();
        assert_eq!(result, "hello_pt");
        assert_eq!(translator.config(), &TranslatorConfig::new("pt", "en"));
        assert_eq!(translator.transport().decoded_requests()[0].from, "en");
    }

    #[tokio::test]
    async fn test_with_config_keeps_transport() {
        let translator = mock_translator();
        translator.translate("one", None, None).await.unwrap();

        let translator = translator.with_config(TranslatorConfig::new("de", "auto"));
        translator.translate("two", None, None).await.unwrap();

        let decoded = translator.transport().decoded_requests();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].to, "de");
    }

    #[tokio::test]
    async fn test_empty_text_still_rejected() {
        let translator = mock_translator();
        let err = translator.translate("   ", None, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Text cannot be empty");
    }

    // ========== Batch Tests ==========

    #[tokio::test]
    async fn test_batch_uses_defaults() {
        let translator = mock_translator().with_config(TranslatorConfig::new("es", "auto"));
        let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
        let options = BatchOptions::default().delay(Duration::ZERO);
        let results = translator
            .translate_batch(&texts, None, None, Some(options))
            .await
            .unwrap();
        assert_eq!(results, vec!["Hello_es", "Goodbye_es"]);
    }

    #[tokio::test]
    async fn test_batch_call_languages_override_defaults() {
        let translator = mock_translator().with_config(TranslatorConfig::new("es", "en"));
        let texts = vec!["a".to_string()];
        let options = BatchOptions::default().delay(Duration::ZERO);

        let results = translator
            .translate_batch(&texts, Some("it"), Some("fr"), Some(options))
            .await
            .unwrap();
        assert_eq!(results, vec!["a_it"]);
        assert_eq!(translator.transport().decoded_requests()[0].from, "fr");
    }

    #[tokio::test]
    async fn test_batch_option_languages_win() {
        let translator = mock_translator().with_config(TranslatorConfig::new("es", "en"));
        let texts = vec!["a".to_string()];

        let options = BatchOptions::to("fr").source("de").delay(Duration::ZERO);
        let results = translator
            .translate_batch(&texts, None, None, Some(options))
            .await
            .unwrap();
        assert_eq!(results, vec!["a_fr"]);
        assert_eq!(translator.transport().decoded_requests()[0].from, "de");

        let options = BatchOptions::to("fr").delay(Duration::ZERO);
        let results = translator
            .translate_batch(&texts, Some("it"), Some("pt"), Some(options))
            .await
            .unwrap();
        assert_eq!(results, vec!["a_fr"]);
        assert_eq!(translator.transport().decoded_requests()[1].from, "pt");
    }

    #[tokio::test]
    async fn test_batch_empty_languages_fall_back_to_defaults() {
        let translator = mock_translator().with_config(TranslatorConfig::new("es", "en"));
        let texts = vec!["a".to_string()];
        let options = BatchOptions::to("").source("").delay(Duration::ZERO);

        let results = translator
            .translate_batch(&texts, Some(""), None, Some(options))
            .await
            .unwrap();
        assert_eq!(results, vec!["a_es"]);
        assert_eq!(translator.transport().decoded_requests()[0].from, "en");
    }

    #[tokio::test]
    async fn test_batch_options_forwarded() {
        let translator = mock_translator();
        let texts: Vec<String> = (0..5).map(|i| format!("t{}", i)).collect();
        let options = BatchOptions::default()
            .batch_size(2)
            .delay(Duration::ZERO);
        let results = translator
            .translate_batch(&texts, None, None, Some(options))
            .await
            .unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(translator.transport().request_count(), 3);
    }

    // ========== Provider Trait Tests ==========

    #[tokio::test]
    async fn test_machine_translator_trait() {
        let provider: Box<dyn MachineTranslator> = Box::new(mock_translator());
        assert_eq!(provider.translate("hello", "en", "fr").await.unwrap(), "hello_fr");
        assert_eq!(provider.provider_name(), "Google Translate (web)");

        let texts = vec!["one".to_string()];
        let results = provider.translate_batch(&texts, "en", "de").await.unwrap();
        assert_eq!(results, vec!["one_de"]);
    }

    #[test]
    fn test_debug_output() {
        let debug_str = format!("{:?}", mock_translator());
        assert!(debug_str.contains("default_to: \"en\""));
    }
}
