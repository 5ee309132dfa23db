//! Media decoding and transport encoding
//!
//! Turns selected media files into in-memory raster images and converts
//! between raster images and the Base64 JPEG wire encoding used on the
//! stylization request path.

pub mod codec;
pub mod mock;

pub use codec::MediaCodec;
pub use mock::MockMediaCodec;

use crate::Result;
use async_trait::async_trait;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;

#[async_trait]
pub trait MediaService: Send + Sync {
    /// Decode the media file at `path` into a raster image.
    async fn decode_file(&self, path: &Path) -> Result<DynamicImage>;

    /// Encode a raster image as Base64 JPEG at the given quality (1-100).
    async fn encode_jpeg_base64(&self, image: Arc<DynamicImage>, quality: u8) -> Result<String>;

    /// Decode a Base64-encoded image payload back into a raster image.
    async fn decode_base64(&self, data: &str) -> Result<DynamicImage>;
}
