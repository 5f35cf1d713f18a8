//! Batch translation on top of single-text translation
//!
//! Texts are cleaned, grouped into chunks, and each chunk is sent as one
//! request with its items joined by a delimiter. The endpoint has no batch
//! API of its own, so the translated chunk is split back apart on the
//! delimiter. Chunks go out strictly one after another with a pause in
//! between.

use crate::data::BatchOptions;
use crate::error::{MtError, MtResult};
use crate::transport::HttpTransport;
use crate::translate::translate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, warn};

/// Marker the translated text is split on; the delimiter without its padding,
/// since the endpoint does not always keep the spaces around it
pub const SPLIT_MARKER: &str = "|||";

/// Brace-delimited escape codes such as `{\an8}` or `{\i1}`
static ESCAPE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\\[^{}]*\}").expect("escape code pattern is valid"));

/// Strip brace escape codes and fold line breaks into single spaces
///
/// # Example
///
/// ```ignore
/// assert_eq!(clean_text("{\\an8}Hello\nworld"), "Hello world");
/// ```
pub fn clean_text(text: &str) -> String {
    ESCAPE_CODE
        .replace_all(text, "")
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

/// Translate many texts, preserving order
///
/// # Arguments
///
/// * `transport` - HTTP transport used for every chunk request
/// * `texts` - Texts to translate; must not be empty
/// * `options` - Languages, chunk size, delimiter and pause between chunks
///
/// # Returns
///
/// * `Ok(Vec<String>)` - One translated piece per delimiter-separated segment, in order
/// * `Err(MtError)` - A validation error, or `MtError::Batch` wrapping the
///   first failing chunk's error; later chunks are not sent
pub async fn translate_batch<T>(
    transport: &T,
    texts: &[String],
    options: &BatchOptions,
) -> MtResult<Vec<String>>
where
    T: HttpTransport + ?Sized,
{
    if texts.is_empty() {
        return Err(MtError::invalid_input("Texts array cannot be empty"));
    }

    let translate_options = options.translate_options();
    if translate_options.target().is_none() {
        return Err(MtError::invalid_input("Target language is required"));
    }

    if options.batch_size == 0 {
        return Err(MtError::invalid_input("Batch size must be greater than zero"));
    }

    let cleaned: Vec<String> = texts.iter().map(|text| clean_text(text)).collect();
    let chunks = chunk_batch(&cleaned, options.batch_size);
    let chunk_count = chunks.len();
    let mut results = Vec::with_capacity(texts.len());

    for (index, chunk) in chunks.into_iter().enumerate() {
        info!(
            chunk = index + 1,
            of = chunk_count,
            items = chunk.len(),
            "Translating batch chunk"
        );

        let joined = chunk.join(options.delimiter.as_str());
        let translated = translate(transport, &joined, &translate_options)
            .await
            .map_err(|e| MtError::Batch(Box::new(e)))?;

        let pieces = split_translation(&translated);
        if pieces.len() != chunk.len() {
            warn!(
                chunk = index + 1,
                expected = chunk.len(),
                received = pieces.len(),
                "Translated chunk split into a different number of items"
            );
        }
        results.extend(pieces);

        if index + 1 < chunk_count && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
    }

    Ok(results)
}

/// Split texts into contiguous chunks of at most `batch_size` items
fn chunk_batch(texts: &[String], batch_size: usize) -> Vec<&[String]> {
    texts.chunks(batch_size).collect()
}

/// Split a translated chunk back into trimmed items
fn split_translation(translated: &str) -> Vec<String> {
    translated
        .split(SPLIT_MARKER)
        .map(|piece| piece.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockMode, MockTransport, response_body};
    use crate::transport::HttpResponse;
    use std::time::{Duration, Instant};

    fn texts(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("text{}", i)).collect()
    }

    fn fast(to: &str) -> BatchOptions {
        BatchOptions::to(to).delay(Duration::ZERO)
    }

    // ========== Cleaning Tests ==========

    #[test]
    fn test_clean_strips_escape_codes() {
        assert_eq!(clean_text(r"{\an8}Hello"), "Hello");
        assert_eq!(clean_text(r"Hi {\i1}there{\i0}"), "Hi there");
        // Plain braces are left alone
        assert_eq!(clean_text("{name} says hi"), "{name} says hi");
    }

    #[test]
    fn test_clean_folds_line_breaks() {
        assert_eq!(clean_text("one\ntwo"), "one two");
        assert_eq!(clean_text("one\r\ntwo\rthree"), "one two three");
    }

    // ========== Chunking Tests ==========

    #[test]
    fn test_chunk_under_limit() {
        let items = texts(2);
        let chunks = chunk_batch(&items, 50);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 2);
    }

    #[test]
    fn test_chunk_partial_chunk() {
        let items = texts(120);
        let chunks = chunk_batch(&items, 50);
        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert_eq!(chunks[2][0], "text100");
    }

    #[test]
    fn test_split_tolerates_spacing() {
        assert_eq!(
            split_translation("uno |||dos|||  tres"),
            vec!["uno", "dos", "tres"]
        );
        assert_eq!(split_translation("solo"), vec!["solo"]);
    }

    // ========== Validation Tests ==========

    #[tokio::test]
    async fn test_empty_batch() {
        let mock = MockTransport::new(MockMode::Suffix);
        let result = translate_batch(&mock, &[], &fast("es")).await;
        assert_eq!(result.unwrap_err().to_string(), "Texts array cannot be empty");
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_missing_target() {
        let mock = MockTransport::new(MockMode::Suffix);
        let options = BatchOptions::default().delay(Duration::ZERO);
        let result = translate_batch(&mock, &texts(3), &options).await;
        assert_eq!(result.unwrap_err().to_string(), "Target language is required");
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_zero_size_rejected() {
        let mock = MockTransport::new(MockMode::Suffix);
        let result = translate_batch(&mock, &texts(3), &fast("es").batch_size(0)).await;
        assert!(matches!(result, Err(MtError::InvalidInput(_))));
        assert_eq!(mock.request_count(), 0);
    }

    // ========== Batch Flow Tests ==========

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let mock = MockTransport::new(MockMode::Suffix);
        let items = vec!["first".to_string(), "second".to_string(), "third".to_string()];
        let results = translate_batch(&mock, &items, &fast("fr")).await.unwrap();
        assert_eq!(results, vec!["first_fr", "second_fr", "third_fr"]);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_batch_chunks_sequentially() {
        let mock = MockTransport::new(MockMode::Suffix);
        let items = texts(120);
        let results = translate_batch(&mock, &items, &fast("de")).await.unwrap();

        let decoded = mock.decoded_requests();
        assert_eq!(decoded.len(), 3);
        let sizes: Vec<usize> = decoded
            .iter()
            .map(|d| d.text.split(" ||| ").count())
            .collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert!(decoded[0].text.starts_with("text0 ||| text1 ||| "));
        assert!(decoded[2].text.ends_with("text119"));

        assert_eq!(results.len(), 120);
        assert_eq!(results[0], "text0_de");
        assert_eq!(results[119], "text119_de");
    }

    #[tokio::test]
    async fn test_batch_custom_delimiter() {
        let mock = MockTransport::new(MockMode::Suffix);
        let options = fast("it").batch_size(2).delimiter("|||");
        let items = texts(3);
        let results = translate_batch(&mock, &items, &options).await.unwrap();

        let decoded = mock.decoded_requests();
        assert_eq!(decoded[0].text, "text0|||text1");
        assert_eq!(decoded[1].text, "text2");
        assert_eq!(results, vec!["text0_it", "text1_it", "text2_it"]);
    }

    #[tokio::test]
    async fn test_delimiter_without_marker_keeps_chunk_whole() {
        let mock = MockTransport::new(MockMode::Suffix);
        let options = fast("it").delimiter(" ## ");
        let items = vec!["uno".to_string(), "dos".to_string()];
        let results = translate_batch(&mock, &items, &options).await.unwrap();

        // Splitting always uses `|||`, so the chunk comes back as one item
        assert_eq!(mock.decoded_requests()[0].text, "uno ## dos");
        assert_eq!(results, vec!["uno ## dos_it"]);
    }

    #[tokio::test]
    async fn test_batch_cleans_before_sending() {
        let mock = MockTransport::new(MockMode::Suffix);
        let items = vec![r"{\an8}Top line".to_string(), "two\nlines".to_string()];
        translate_batch(&mock, &items, &fast("pt")).await.unwrap();
        assert_eq!(mock.decoded_requests()[0].text, "Top line ||| two lines");
    }

    #[tokio::test]
    async fn test_batch_fails_fast_on_second_chunk() {
        let mock = MockTransport::new(MockMode::Sequence(vec![
            Ok(HttpResponse::new(200, response_body(&["a ||| b"]))),
            Ok(HttpResponse::new(503, "unavailable")),
            Ok(HttpResponse::new(200, response_body(&["e ||| f"]))),
        ]));
        let options = fast("es").batch_size(2);
        let err = translate_batch(&mock, &texts(6), &options).await.unwrap_err();

        assert_eq!(err.to_string(), "Batch translation failed: HTTP 503");
        assert_eq!(err.raw(), Some("unavailable"));
        // Third chunk never sent
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_batch_transport_failure() {
        let mock = MockTransport::new(MockMode::Error("timed out".to_string()));
        let err = translate_batch(&mock, &texts(2), &fast("es")).await.unwrap_err();
        assert_eq!(err.to_string(), "Batch translation failed: Request error: timed out");
    }

    #[tokio::test]
    async fn test_batch_count_drift_is_kept() {
        // Endpoint merged two items into one; the pieces are returned as-is
        let mock = MockTransport::new(MockMode::Fixed(HttpResponse::new(
            200,
            response_body(&["uno dos"]),
        )));
        let items = vec!["one".to_string(), "two".to_string()];
        let results = translate_batch(&mock, &items, &fast("es")).await.unwrap();
        assert_eq!(results, vec!["uno dos"]);
    }

    // ========== Pacing Tests ==========

    #[tokio::test]
    async fn test_delay_between_chunks_only() {
        let mock = MockTransport::new(MockMode::Suffix);
        let options = BatchOptions::to("fr")
            .batch_size(1)
            .delay(Duration::from_millis(40));

        let start = Instant::now();
        translate_batch(&mock, &texts(3), &options).await.unwrap();
        let elapsed = start.elapsed();

        // Two pauses for three chunks
        assert!(elapsed >= Duration::from_millis(80));
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_single_chunk_has_no_delay() {
        let mock = MockTransport::new(MockMode::Suffix);
        let options = BatchOptions::to("fr").delay(Duration::from_secs(5));

        let start = Instant::now();
        translate_batch(&mock, &texts(3), &options).await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
