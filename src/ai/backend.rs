use super::StyleService;
use crate::models::{StyleRequest, StyleResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Relays stylization requests through the custom backend's `/stylize`
/// endpoint.
pub struct BackendStyleClient {
    client: Client,
    base_url: String,
}

impl BackendStyleClient {
    pub fn new(base_url: String) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }
}

#[async_trait]
impl StyleService for BackendStyleClient {
    async fn stylize(&self, image_base64: &str, style: &str) -> Result<String> {
        let request = StyleRequest {
            image_base64: image_base64.to_string(),
            style: style.to_string(),
        };

        tracing::debug!("Sending stylization request to backend (style: {})", style);

        let response = self
            .client
            .post(format!("{}/stylize", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to backend: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Backend error (status {}): {}", status, error_text);
            return Err(Error::Backend(format!(
                "stylize endpoint returned status {}: {}",
                status, error_text
            )));
        }

        let body: StyleResponse = response.json().await?;
        if body.stylized_image_base64.is_empty() {
            return Err(Error::Backend(
                "stylize response carried no image".to_string(),
            ));
        }

        Ok(body.stylized_image_base64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_stylize_returns_encoded_image() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/stylize"))
            .and(body_partial_json(serde_json::json!({
                "image_base64": "aW1n",
                "style": "Watercolor"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "stylized_image_base64": "QUJD"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendStyleClient::new(server.uri());
        let encoded = client.stylize("aW1n", "Watercolor").await.unwrap();
        assert_eq!(encoded, "QUJD");
    }

    #[tokio::test]
    async fn test_error_status_is_backend_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/stylize"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream timeout"))
            .mount(&server)
            .await;

        let client = BackendStyleClient::new(server.uri());
        let err = client.stylize("aW1n", "Watercolor").await.unwrap_err();

        assert!(matches!(err, Error::Backend(_)));
        assert!(err.to_string().contains("upstream timeout"));
    }

    #[tokio::test]
    async fn test_empty_image_field_is_backend_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/stylize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "stylized_image_base64": ""
            })))
            .mount(&server)
            .await;

        let client = BackendStyleClient::new(server.uri());
        let err = client.stylize("aW1n", "Watercolor").await.unwrap_err();

        assert!(matches!(err, Error::Backend(_)));
        assert!(err.to_string().contains("no image"));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_tolerated() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/stylize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "stylized_image_base64": "QUJD"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendStyleClient::new(format!("{}/", server.uri()));
        client.stylize("aW1n", "Watercolor").await.unwrap();
    }
}
