//! Application state controller
//!
//! Owns the observable UI state for one stylization session and drives the
//! transitions around media selection and the asynchronous stylization
//! round trip. Every transition goes through the pure function
//! [`UiState::apply`] and is published to subscribers in order.

use crate::ai::StyleService;
use crate::media::MediaService;
use crate::Result;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const CONTACTING_SERVER: &str = "Contacting the server...";
pub const APPLYING_STYLE: &str = "Applying style...";
const MEDIA_LOAD_ERROR: &str = "Failed to load the selected media.";

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Snapshot of everything an observer needs to render the session.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub preview_reference: Option<PathBuf>,
    pub is_generate_enabled: bool,
    pub is_loading: bool,
    pub loading_message: String,
    pub result_image: Option<Arc<DynamicImage>>,
    pub error_message: Option<String>,
}

/// Input to the state transition function.
#[derive(Debug, Clone)]
pub enum UiEvent {
    MediaSelected { reference: PathBuf },
    SelectionFailed { message: String },
    GenerationStarted,
    StatusUpdate { message: String },
    GenerationFinished { image: Arc<DynamicImage> },
    GenerationFailed { message: String },
    ErrorAcknowledged,
}

impl UiState {
    /// The state after applying `event`. The receiver is never mutated;
    /// observers always see a fresh value.
    pub fn apply(&self, event: UiEvent) -> UiState {
        let mut next = self.clone();
        match event {
            UiEvent::MediaSelected { reference } => {
                next.preview_reference = Some(reference);
                next.is_generate_enabled = true;
                next.result_image = None;
            }
            UiEvent::SelectionFailed { message } => {
                // A failed reselect keeps the previous selection usable.
                // TODO: decide whether it should clear the selection instead.
                next.error_message = Some(message);
            }
            UiEvent::GenerationStarted => {
                next.is_loading = true;
                next.loading_message = CONTACTING_SERVER.to_string();
                next.is_generate_enabled = false;
            }
            UiEvent::StatusUpdate { message } => {
                next.loading_message = message;
            }
            UiEvent::GenerationFinished { image } => {
                next.is_loading = false;
                next.result_image = Some(image);
                next.is_generate_enabled = true;
            }
            UiEvent::GenerationFailed { message } => {
                next.is_loading = false;
                next.error_message = Some(message);
                next.is_generate_enabled = true;
            }
            UiEvent::ErrorAcknowledged => {
                next.error_message = None;
            }
        }
        next
    }
}

/// Coordinates media selection, transport encoding, and the stylization
/// round trip for a single user session.
pub struct StyleSession {
    media: Arc<dyn MediaService>,
    stylizer: Arc<dyn StyleService>,
    jpeg_quality: u8,
    session_id: Uuid,
    current: Mutex<UiState>,
    events: broadcast::Sender<UiState>,
    source: Mutex<Option<Arc<DynamicImage>>>,
    generating: AtomicBool,
}

impl StyleSession {
    pub fn new(
        media: Arc<dyn MediaService>,
        stylizer: Arc<dyn StyleService>,
        jpeg_quality: u8,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let session_id = Uuid::new_v4();
        debug!("Created style session {}", session_id);

        Self {
            media,
            stylizer,
            jpeg_quality,
            session_id,
            current: Mutex::new(UiState::default()),
            events,
            source: Mutex::new(None),
            generating: AtomicBool::new(false),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> UiState {
        self.current.lock().unwrap().clone()
    }

    /// Subscribe to every state publication, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<UiState> {
        self.events.subscribe()
    }

    fn publish(&self, event: UiEvent) {
        let mut current = self.current.lock().unwrap();
        let next = current.apply(event);
        *current = next.clone();
        // Nobody listening is fine; state() still reflects the change.
        let _ = self.events.send(next);
    }

    /// Load the media file at `reference` and make it the source for the
    /// next generation. A selection while a request is in flight does not
    /// affect that request.
    pub async fn select_media(&self, reference: &Path) {
        match self.media.decode_file(reference).await {
            Ok(image) => {
                info!(session = %self.session_id, "Selected media: {}", reference.display());
                *self.source.lock().unwrap() = Some(Arc::new(image));
                self.publish(UiEvent::MediaSelected {
                    reference: reference.to_path_buf(),
                });
            }
            Err(e) => {
                warn!(
                    session = %self.session_id,
                    "Failed to decode {}: {}",
                    reference.display(),
                    e
                );
                self.publish(UiEvent::SelectionFailed {
                    message: MEDIA_LOAD_ERROR.to_string(),
                });
            }
        }
    }

    /// Run one stylization round trip for the stored source image.
    ///
    /// A no-op when nothing is selected or a generation is already in
    /// flight. Exactly one settling state (result or error) is published
    /// per accepted call, and `is_loading` never stays true afterwards.
    pub async fn generate(&self, style_label: &str) {
        let source = self.source.lock().unwrap().clone();
        let Some(source) = source else {
            debug!(session = %self.session_id, "generate called with no media selected");
            return;
        };
        if self.generating.swap(true, Ordering::SeqCst) {
            debug!(session = %self.session_id, "generate called while a request is in flight");
            return;
        }

        info!(session = %self.session_id, "Generating '{}' stylization", style_label);
        self.publish(UiEvent::GenerationStarted);

        match self.run_generation(source, style_label).await {
            Ok(image) => {
                info!(session = %self.session_id, "Stylization complete");
                self.publish(UiEvent::GenerationFinished {
                    image: Arc::new(image),
                });
            }
            Err(e) => {
                warn!(session = %self.session_id, "Stylization failed: {}", e);
                self.publish(UiEvent::GenerationFailed {
                    message: format!("{}: {}", e.kind(), e),
                });
            }
        }

        self.generating.store(false, Ordering::SeqCst);
    }

    async fn run_generation(
        &self,
        source: Arc<DynamicImage>,
        style_label: &str,
    ) -> Result<DynamicImage> {
        let encoded = self
            .media
            .encode_jpeg_base64(source, self.jpeg_quality)
            .await?;

        self.publish(UiEvent::StatusUpdate {
            message: APPLYING_STYLE.to_string(),
        });

        let stylized = self.stylizer.stylize(&encoded, style_label).await?;
        self.media.decode_base64(&stylized).await
    }

    /// Clear the error once the observing layer has shown it. Idempotent.
    pub fn acknowledge_error(&self) {
        self.publish(UiEvent::ErrorAcknowledged);
    }
}
