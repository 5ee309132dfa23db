use super::MediaService;
use crate::{Error, Result};
use async_trait::async_trait;
use image::DynamicImage;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockMediaCodec {
    decoded_image: DynamicImage,
    encoded: String,
    file_decode_count: Arc<Mutex<usize>>,
    encode_count: Arc<Mutex<usize>>,
    base64_decode_count: Arc<Mutex<usize>>,
    fail_file_decode: Arc<Mutex<bool>>,
    fail_encode: Arc<Mutex<bool>>,
    fail_base64_decode: Arc<Mutex<bool>>,
}

impl MockMediaCodec {
    pub fn new() -> Self {
        Self {
            decoded_image: DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
                1,
                1,
                image::Rgba([255, 0, 0, 255]),
            )),
            encoded: "bW9jay1qcGVn".to_string(),
            file_decode_count: Arc::new(Mutex::new(0)),
            encode_count: Arc::new(Mutex::new(0)),
            base64_decode_count: Arc::new(Mutex::new(0)),
            fail_file_decode: Arc::new(Mutex::new(false)),
            fail_encode: Arc::new(Mutex::new(false)),
            fail_base64_decode: Arc::new(Mutex::new(false)),
        }
    }

    /// Image returned by both decode operations.
    pub fn with_decoded_image(mut self, image: DynamicImage) -> Self {
        self.decoded_image = image;
        self
    }

    pub fn with_file_decode_failure(self, should_fail: bool) -> Self {
        *self.fail_file_decode.lock().unwrap() = should_fail;
        self
    }

    pub fn with_encode_failure(self, should_fail: bool) -> Self {
        *self.fail_encode.lock().unwrap() = should_fail;
        self
    }

    pub fn with_base64_decode_failure(self, should_fail: bool) -> Self {
        *self.fail_base64_decode.lock().unwrap() = should_fail;
        self
    }

    pub fn get_file_decode_count(&self) -> usize {
        *self.file_decode_count.lock().unwrap()
    }

    pub fn get_encode_count(&self) -> usize {
        *self.encode_count.lock().unwrap()
    }

    pub fn get_base64_decode_count(&self) -> usize {
        *self.base64_decode_count.lock().unwrap()
    }
}

impl Default for MockMediaCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaService for MockMediaCodec {
    async fn decode_file(&self, _path: &Path) -> Result<DynamicImage> {
        *self.file_decode_count.lock().unwrap() += 1;

        if *self.fail_file_decode.lock().unwrap() {
            return Err(Error::Decode("mock media decode failure".to_string()));
        }
        Ok(self.decoded_image.clone())
    }

    async fn encode_jpeg_base64(&self, _image: Arc<DynamicImage>, _quality: u8) -> Result<String> {
        *self.encode_count.lock().unwrap() += 1;

        if *self.fail_encode.lock().unwrap() {
            return Err(Error::Encode("mock encode failure".to_string()));
        }
        Ok(self.encoded.clone())
    }

    async fn decode_base64(&self, _data: &str) -> Result<DynamicImage> {
        *self.base64_decode_count.lock().unwrap() += 1;

        if *self.fail_base64_decode.lock().unwrap() {
            return Err(Error::Decode("mock payload decode failure".to_string()));
        }
        Ok(self.decoded_image.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let codec = MockMediaCodec::new();

        codec.decode_file(Path::new("a.png")).await.unwrap();
        codec
            .encode_jpeg_base64(Arc::new(codec.decoded_image.clone()), 90)
            .await
            .unwrap();
        codec.decode_base64("bW9jaw==").await.unwrap();

        assert_eq!(codec.get_file_decode_count(), 1);
        assert_eq!(codec.get_encode_count(), 1);
        assert_eq!(codec.get_base64_decode_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_with_decoded_image() {
        let image = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            7,
            9,
            image::Rgba([0, 255, 0, 255]),
        ));
        let codec = MockMediaCodec::new().with_decoded_image(image);

        let decoded = codec.decode_file(Path::new("a.png")).await.unwrap();
        assert_eq!(decoded.width(), 7);
        assert_eq!(decoded.height(), 9);
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let codec = MockMediaCodec::new()
            .with_file_decode_failure(true)
            .with_encode_failure(true)
            .with_base64_decode_failure(true);

        assert!(codec.decode_file(Path::new("a.png")).await.is_err());
        assert!(codec
            .encode_jpeg_base64(Arc::new(codec.decoded_image.clone()), 90)
            .await
            .is_err());
        assert!(codec.decode_base64("bW9jaw==").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_probe_shares_counters() {
        let codec = MockMediaCodec::new();
        let probe = codec.clone();

        codec.decode_file(Path::new("a.png")).await.unwrap();
        assert_eq!(probe.get_file_decode_count(), 1);
    }
}
