use super::MediaService;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;

/// Production codec backed by the `image` crate.
///
/// Decoding and encoding are CPU-bound, so every operation runs on the
/// blocking pool rather than the async executor.
pub struct MediaCodec;

impl MediaCodec {
    pub fn new() -> Self {
        Self
    }

    fn encode_jpeg_base64_sync(image: &DynamicImage, quality: u8) -> Result<String> {
        // JPEG has no alpha channel
        let rgb = image.to_rgb8();
        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder
            .encode_image(&rgb)
            .map_err(|e| Error::Encode(format!("JPEG encoding failed: {}", e)))?;
        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    fn decode_base64_sync(data: &str) -> Result<DynamicImage> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data.trim())
            .map_err(|e| Error::Decode(format!("invalid Base64 image payload: {}", e)))?;
        image::load_from_memory(&bytes)
            .map_err(|e| Error::Decode(format!("could not decode image payload: {}", e)))
    }
}

impl Default for MediaCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaService for MediaCodec {
    async fn decode_file(&self, path: &Path) -> Result<DynamicImage> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            image::open(&path)
                .map_err(|e| Error::Decode(format!("could not decode {}: {}", path.display(), e)))
        })
        .await
        .map_err(|e| Error::Unexpected(format!("codec task join error: {}", e)))?
    }

    async fn encode_jpeg_base64(&self, image: Arc<DynamicImage>, quality: u8) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::encode_jpeg_base64_sync(&image, quality))
            .await
            .map_err(|e| Error::Unexpected(format!("codec task join error: {}", e)))?
    }

    async fn decode_base64(&self, data: &str) -> Result<DynamicImage> {
        let data = data.to_string();
        tokio::task::spawn_blocking(move || Self::decode_base64_sync(&data))
            .await
            .map_err(|e| Error::Unexpected(format!("codec task join error: {}", e)))?
    }
}
