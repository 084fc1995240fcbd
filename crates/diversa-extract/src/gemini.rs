//! Gemini API client.
//!
//! Async client for Google's `generateContent` endpoint, used two ways:
//! structured statement extraction (JSON response MIME type, typed
//! deserialization) and free-text commentary generation. One request, one
//! fixed timeout, no retries - a failed call is surfaced, not papered over.

use std::time::Duration;

use base64::Engine;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::pdf::PageImage;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// `generateContent` request.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    Image {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

/// `generateContent` response.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Statement payload as the model reports it, before core validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStatement {
    /// Reported line items.
    pub holdings: Vec<RawHolding>,

    /// Total value stated by the document, if the model found one.
    #[serde(default)]
    pub reported_total: Option<Decimal>,

    /// Currency code, if the model identified one.
    #[serde(default)]
    pub currency: Option<String>,
}

/// One line item as the model reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHolding {
    /// Name or ticker of the investment.
    pub label: String,

    /// Current monetary value.
    pub value: Decimal,
}

/// HTTP client for Gemini API requests.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Creates a client with the default model and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extracts a statement from document text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be parsed as a statement payload.
    pub async fn extract_from_text(&self, document_text: &str) -> ExtractResult<RawStatement> {
        let parts = vec![Part::Text {
            text: format!("{EXTRACTION_PROMPT}\n\nDocument text:\n\n{document_text}"),
        }];

        self.request_statement(parts).await
    }

    /// Extracts a statement from rendered page images.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects it, or the
    /// response cannot be parsed as a statement payload.
    pub async fn extract_from_images(&self, pages: &[PageImage]) -> ExtractResult<RawStatement> {
        let mut parts = vec![Part::Text {
            text: EXTRACTION_PROMPT.to_string(),
        }];

        for page in pages {
            parts.push(Part::Image {
                inline_data: InlineData {
                    mime_type: "image/png".to_string(),
                    data: base64::engine::general_purpose::STANDARD.encode(&page.png_data),
                },
            });
        }

        self.request_statement(parts).await
    }

    /// Generates free text for a prompt (used for commentary).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is empty.
    pub async fn generate_text(&self, prompt: &str) -> ExtractResult<String> {
        let parts = vec![Part::Text {
            text: prompt.to_string(),
        }];

        let text = self.generate(parts, None).await?;
        if text.trim().is_empty() {
            return Err(ExtractError::invalid_response("empty completion"));
        }
        Ok(text)
    }

    async fn request_statement(&self, parts: Vec<Part>) -> ExtractResult<RawStatement> {
        let text = self
            .generate(parts, Some("application/json".to_string()))
            .await?;

        let json = extract_json(&text);
        serde_json::from_str(&json).map_err(|e| {
            ExtractError::invalid_response(format!("statement payload did not parse: {e}"))
        })
    }

    async fn generate(
        &self,
        parts: Vec<Part>,
        response_mime_type: Option<String>,
    ) -> ExtractResult<String> {
        let request = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type,
            },
        };

        let url = format!("{API_BASE}/{}:generateContent", self.model);
        debug!(model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;

        let text: String = body
            .candidates
            .first()
            .ok_or_else(|| ExtractError::invalid_response("no candidates in response"))?
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        Ok(text)
    }
}

/// Extracts JSON from model output, tolerating markdown code fences.
fn extract_json(text: &str) -> String {
    let text = text.trim();

    // Handle ```json ... ``` wrapper
    if text.starts_with("```") {
        if let Some(start) = text.find('\n') {
            let after_first_line = &text[start + 1..];
            if let Some(end) = after_first_line.rfind("```") {
                return after_first_line[..end].trim().to_string();
            }
        }
    }

    // Fall back to the outermost braces
    if let Some(start) = text.find('{') {
        if let Some(end) = text.rfind('}') {
            if end > start {
                return text[start..=end].to_string();
            }
        }
    }

    text.to_string()
}

const EXTRACTION_PROMPT: &str = r#"You are a financial analyst extracting holdings from an investment portfolio statement. Statements vary in format: tables, lists, or narrative text, in any currency.

Identify every investment holding (stocks, bonds, funds, ETFs, treasury titles) with its current monetary value. Use the exact name or ticker the document shows. Prefer current values over invested amounts or quantities. If the document states a portfolio total, report it; do not invent one.

OUTPUT JSON SCHEMA:
{
  "holdings": [
    {"label": "<name or ticker>", "value": <number>}
  ],
  "reported_total": <number or null>,
  "currency": "<ISO 4217 code, e.g. USD or BRL>"
}

Values are plain numbers: no currency symbols, no thousands separators. Return ONLY valid JSON."#;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_extract_json_plain() {
        let json = r#"{"holdings": []}"#;
        assert_eq!(extract_json(json), json);
    }

    #[test]
    fn test_extract_json_fenced() {
        let fenced = "```json\n{\"holdings\": []}\n```";
        assert_eq!(extract_json(fenced), r#"{"holdings": []}"#);
    }

    #[test]
    fn test_extract_json_surrounding_prose() {
        let noisy = "Here is the result:\n{\"holdings\": []}\nLet me know!";
        assert_eq!(extract_json(noisy), r#"{"holdings": []}"#);
    }

    #[test]
    fn test_raw_statement_parses() {
        let payload = r#"{
            "holdings": [
                {"label": "Tesouro IPCA+ 2029", "value": 4230.10},
                {"label": "BIXN39", "value": 1200}
            ],
            "reported_total": 5430.10,
            "currency": "BRL"
        }"#;

        let raw: RawStatement = serde_json::from_str(payload).unwrap();
        assert_eq!(raw.holdings.len(), 2);
        assert_eq!(raw.holdings[0].value, dec!(4230.10));
        assert_eq!(raw.reported_total, Some(dec!(5430.10)));
        assert_eq!(raw.currency.as_deref(), Some("BRL"));
    }

    #[test]
    fn test_raw_statement_optional_fields() {
        let payload = r#"{"holdings": [{"label": "VTI", "value": 100}]}"#;
        let raw: RawStatement = serde_json::from_str(payload).unwrap();
        assert_eq!(raw.reported_total, None);
        assert_eq!(raw.currency, None);
    }

    #[test]
    fn test_client_builders() {
        let client = GeminiClient::new("key")
            .with_model("gemini-2.5-pro")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(client.model(), "gemini-2.5-pro");
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: "hello".into(),
                    },
                    Part::Image {
                        inline_data: InlineData {
                            mime_type: "image/png".into(),
                            data: "AAAA".into(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: Some("application/json".into()),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
    }
}
