//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror. Every
//! failure that reaches the session's observable state is tagged with one
//! of four user-facing kinds via [`Error::kind`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("media decode failed: {0}")]
    Decode(String),

    #[error("media encode failed: {0}")]
    Encode(String),

    #[error("stylization backend failed: {0}")]
    Backend(String),

    #[error("unexpected failure: {0}")]
    Unexpected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Category tag surfaced to observers alongside the detail text.
    ///
    /// Transport faults count as backend failures, image-library failures
    /// as decode failures.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Decode(_) | Error::Image(_) => "DecodeError",
            Error::Encode(_) => "EncodeError",
            Error::Backend(_) | Error::Http(_) => "BackendError",
            Error::Unexpected(_) | Error::Io(_) | Error::Serialization(_) => "UnexpectedError",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
