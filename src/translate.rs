//! Advisory translation.

use crate::error::TranslateError;
use async_trait::async_trait;
use reqwest::StatusCode;

/// Translates free text between two language codes (`en`, `tr`, `es`, ...).
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError>;
}

/// Client for the public Google Translate web endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        let url = format!("{}/translate_a/single", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(TranslateError::Status(response.status()));
        }

        let body: serde_json::Value = response.json().await?;
        parse_translation(&body)
    }
}

/// Joins the translated sentence segments of a `translate_a/single` response.
///
/// The response is a nested array whose first element lists one
/// `[translated, original, ...]` entry per sentence.
fn parse_translation(body: &serde_json::Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslateError::Malformed("missing sentence list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0)?.as_str())
        .collect();

    if translated.is_empty() && !segments.is_empty() {
        return Err(TranslateError::Malformed("no translated text".to_string()));
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_translation_joins_segments() {
        let body = json!([
            [
                ["Flask sürümleri ", "Flask versions ", null, null, 10],
                ["XSS'e karşı savunmasızdır.", "are vulnerable to XSS.", null, null, 10]
            ],
            null,
            "en"
        ]);

        assert_eq!(
            parse_translation(&body).unwrap(),
            "Flask sürümleri XSS'e karşı savunmasızdır."
        );
    }

    #[test]
    fn test_parse_translation_malformed() {
        assert!(matches!(
            parse_translation(&json!({"error": "quota"})),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            parse_translation(&json!([[[null, "Hello"]]])),
            Err(TranslateError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_google_translator_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "en"))
            .and(query_param("tl", "es"))
            .and(query_param("q", "Remote code execution & more"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                [["Ejecución remota de código y más", "Remote code execution & more"]],
                null,
                "en"
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let translator = GoogleTranslator::new(build_client(None).unwrap(), server.uri());
        let text = translator
            .translate("Remote code execution & more", "en", "es")
            .await
            .unwrap();
        assert_eq!(text, "Ejecución remota de código y más");
    }

    #[tokio::test]
    async fn test_google_translator_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let translator = GoogleTranslator::new(build_client(None).unwrap(), server.uri());
        let err = translator.translate("text", "en", "tr").await.unwrap_err();
        assert!(matches!(err, TranslateError::Status(s) if s == StatusCode::TOO_MANY_REQUESTS));
    }
}
