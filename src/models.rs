//! Data models and configuration
//!
//! Defines the request/response records exchanged with the stylization
//! backend and the environment-driven application configuration.

use serde::{Deserialize, Serialize};

/// Body of `POST /stylize`: the encoded source image plus the style label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleRequest {
    pub image_base64: String,
    pub style: String,
}

/// Backend reply carrying the stylized image, Base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleResponse {
    pub stylized_image_base64: String,
}

/// Which stylization service the application talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleProvider {
    Gemini,
    Backend,
}

impl std::str::FromStr for StyleProvider {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(StyleProvider::Gemini),
            "backend" => Ok(StyleProvider::Backend),
            other => Err(crate::Error::Unexpected(format!(
                "unknown style provider '{}', expected 'gemini' or 'backend'",
                other
            ))),
        }
    }
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: StyleProvider,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub backend_base_url: Option<String>,
    pub jpeg_quality: u8,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let provider = match std::env::var("STYLE_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => StyleProvider::Gemini,
        };

        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        let backend_base_url = std::env::var("BACKEND_BASE_URL").ok();

        match provider {
            StyleProvider::Gemini if gemini_api_key.is_none() => {
                return Err(crate::Error::Unexpected("GEMINI_API_KEY not set".to_string()));
            }
            StyleProvider::Backend if backend_base_url.is_none() => {
                return Err(crate::Error::Unexpected(
                    "BACKEND_BASE_URL not set".to_string(),
                ));
            }
            _ => {}
        }

        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let jpeg_quality = match std::env::var("JPEG_QUALITY") {
            Ok(value) => {
                let quality: u8 = value.parse().map_err(|_| {
                    crate::Error::Unexpected(format!(
                        "JPEG_QUALITY must be a number between 1 and 100, got '{}'",
                        value
                    ))
                })?;
                if !(1..=100).contains(&quality) {
                    return Err(crate::Error::Unexpected(format!(
                        "JPEG_QUALITY must be between 1 and 100, got {}",
                        quality
                    )));
                }
                quality
            }
            Err(_) => DEFAULT_JPEG_QUALITY,
        };

        Ok(Self {
            provider,
            gemini_api_key,
            gemini_model,
            backend_base_url,
            jpeg_quality,
        })
    }
}
