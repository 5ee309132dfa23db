//! Direct Gemini integration for style transfer.
//!
//! Sends the selected image together with a rendered style-transfer prompt
//! to the `generateContent` endpoint and extracts the stylized image from
//! the first candidate.

use super::StyleService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
// The session always hands us a JPEG transport encoding.
const SOURCE_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

/// Untagged union of text and inline media parts; variant order matters
/// for `#[serde(untagged)]` decoding.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

pub struct GeminiStyleClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiStyleClient {
    /// Construct a client for the given bare model ID (for example
    /// `gemini-1.5-flash`, not a `models/...`-prefixed path segment).
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();
        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl StyleService for GeminiStyleClient {
    async fn stylize(&self, image_base64: &str, style: &str) -> Result<String> {
        let prompt = prompts::render(prompts::STYLE_TRANSFER, &[("style", style)]);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: SOURCE_MIME_TYPE.to_string(),
                            data: image_base64.to_string(),
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        };

        tracing::debug!(
            "Sending style transfer request to Gemini (model: {})",
            self.model
        );

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::Backend(format!(
                "Gemini API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::Backend(format!("failed to parse Gemini response: {}", e))
        })?;

        let parts = parsed
            .candidates
            .first()
            .map(|c| c.content.parts.as_slice())
            .unwrap_or(&[]);

        if let Some(data) = parts.iter().find_map(|p| match p {
            Part::InlineData { inline_data } => Some(inline_data.data.clone()),
            _ => None,
        }) {
            return Ok(data);
        }

        // A text-only reply is the model explaining why it produced no image.
        let explanation = parts.iter().find_map(|p| match p {
            Part::Text { text } => Some(text.clone()),
            _ => None,
        });
        Err(Error::Backend(
            explanation.unwrap_or_else(|| "Gemini returned no image".to_string()),
        ))
    }
}
