//! Stylization service integration
//!
//! Provides the contract for one stylization round trip plus two
//! interchangeable implementations: a direct Gemini call and a relay
//! through a custom backend.

pub mod backend;
pub mod gemini;
pub mod mock;

pub use backend::BackendStyleClient;
pub use gemini::GeminiStyleClient;
pub use mock::MockStyleClient;

use crate::Result;
use async_trait::async_trait;

/// One request/response exchange: an encoded image and a style label in,
/// an encoded stylized image out.
#[async_trait]
pub trait StyleService: Send + Sync {
    async fn stylize(&self, image_base64: &str, style: &str) -> Result<String>;
}
