//! Client for the public Google Translate endpoint.

use std::thread;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;
use tracing::debug;

use donation_model::TranslationOptions;

use crate::error::{Result, TranslateError};
use crate::service::TranslationService;

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Translates labels one request at a time, pausing after each call.
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    source_lang: String,
    target_lang: String,
    delay: Duration,
}

impl GoogleTranslateClient {
    pub fn new(options: &TranslationOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            source_lang: options.source_lang.clone(),
            target_lang: options.target_lang.clone(),
            delay: Duration::from_millis(options.delay_ms),
        })
    }

    fn request_url(&self, text: &str) -> Result<Url> {
        Url::parse_with_params(
            ENDPOINT,
            &[
                ("client", "gtx"),
                ("sl", self.source_lang.as_str()),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|err| TranslateError::Network(format!("invalid request url: {err}")))
    }

    fn fetch(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .get(self.request_url(text)?)
            .header(
                USER_AGENT,
                concat!("donation-enrich/", env!("CARGO_PKG_VERSION")),
            )
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        parse_response(&body)
    }
}

impl TranslationService for GoogleTranslateClient {
    fn translate(&self, text: &str) -> Result<String> {
        debug!(
            source_lang = %self.source_lang,
            target_lang = %self.target_lang,
            "calling translation service"
        );
        let outcome = self.fetch(text);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        outcome
    }
}

/// Extract the translation from a response body.
///
/// The body is a nested array whose first element lists translated segments;
/// each segment starts with its translated text.
pub fn parse_response(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("missing segment list".to_string()))?;
    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    let translated = translated.trim();
    if translated.is_empty() {
        return Err(TranslateError::Malformed("empty translation".to_string()));
    }
    Ok(translated.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_segment() {
        let body = r#"[[["Water Supply","سقيا الماء",null,null,10]],null,"ar"]"#;
        assert_eq!(parse_response(body).unwrap(), "Water Supply");
    }

    #[test]
    fn joins_multiple_segments() {
        let body = r#"[[["Support ","ادعم",null],["a child","طفلا",null]],null,"ar"]"#;
        assert_eq!(parse_response(body).unwrap(), "Support a child");
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(matches!(
            parse_response("{}"),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            parse_response("[null]"),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            parse_response("[[]]"),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            parse_response("not json"),
            Err(TranslateError::Malformed(_))
        ));
    }

    #[test]
    fn request_url_encodes_label() {
        let client = GoogleTranslateClient::new(&TranslationOptions::default()).unwrap();
        let url = client.request_url("سقيا الماء").unwrap();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        assert!(query.contains(&("sl".to_string(), "ar".to_string())));
        assert!(query.contains(&("tl".to_string(), "en".to_string())));
        assert!(query.contains(&("q".to_string(), "سقيا الماء".to_string())));
    }
}
