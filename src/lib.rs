//! Media style transfer - applies a named visual style to a selected image
//! through a generative-AI backend.
//!
//! Three pieces are wired together: a media codec that moves images between
//! files, memory, and the Base64 wire encoding; a stylization service
//! (a direct Gemini call or a relay through a custom backend); and a session
//! controller that owns the observable UI state around one stylization
//! round trip.

pub mod ai;
pub mod error;
pub mod media;
pub mod models;
pub mod prompts;
pub mod session;

pub use error::{Error, Result};
