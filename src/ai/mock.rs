use super::StyleService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockStyleClient {
    responses: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
    last_style: Arc<Mutex<Option<String>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockStyleClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_style: Arc::new(Mutex::new(None)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_style(&self) -> Option<String> {
        self.last_style.lock().unwrap().clone()
    }
}

impl Default for MockStyleClient {
    fn default() -> Self {
        Self::new()
    }
}

// 1x1 PNG used when no canned response is configured.
fn tiny_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
        0x44, 0x41, // IDAT chunk
        0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE0,
        0x4A, 0x11, 0x60, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
        0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

#[async_trait]
impl StyleService for MockStyleClient {
    async fn stylize(&self, _image_base64: &str, style: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        *self.last_style.lock().unwrap() = Some(style.to_string());

        if *self.should_fail.lock().unwrap() {
            return Err(Error::Backend("mock stylization failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            use base64::Engine as _;
            Ok(base64::engine::general_purpose::STANDARD.encode(tiny_png()))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    #[tokio::test]
    async fn test_default_response_is_a_decodable_image() {
        let client = MockStyleClient::new();

        let encoded = client.stylize("aW1n", "Watercolor").await.unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&encoded)
            .unwrap();
        let image = image::load_from_memory(&bytes).unwrap();

        assert_eq!(image.width(), 1);
        assert_eq!(image.height(), 1);
    }

    #[tokio::test]
    async fn test_custom_responses_cycle() {
        let client = MockStyleClient::new()
            .with_response("Zmlyc3Q=".to_string())
            .with_response("c2Vjb25k".to_string());

        assert_eq!(client.stylize("aW1n", "A").await.unwrap(), "Zmlyc3Q=");
        assert_eq!(client.stylize("aW1n", "B").await.unwrap(), "c2Vjb25k");
        assert_eq!(client.stylize("aW1n", "C").await.unwrap(), "Zmlyc3Q=");
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let client = MockStyleClient::new().with_failure(true);

        let err = client.stylize("aW1n", "Watercolor").await.unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
        assert_eq!(client.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_records_last_style() {
        let client = MockStyleClient::new();

        assert_eq!(client.last_style(), None);
        client.stylize("aW1n", "Watercolor").await.unwrap();
        assert_eq!(client.last_style(), Some("Watercolor".to_string()));
    }
}
