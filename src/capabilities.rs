// Platform capability traits - the narrow interfaces the voice subsystem consumes
// Every capability is injectable so the subsystem runs against fakes in tests

use async_trait::async_trait;

/// Configuration handed to the speech-to-text capability when a capture starts
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionConfig {
    /// BCP 47 locale tag (e.g., "es-ES")
    pub lang: String,
    /// Whether recognition continues after the first final result
    pub continuous: bool,
    /// Whether interim (non-final) transcripts are delivered
    pub interim_results: bool,
    /// Maximum number of alternative transcripts per result
    pub max_alternatives: u8,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            lang: "es-ES".to_string(),
            continuous: false,
            interim_results: true,
            max_alternatives: 3,
        }
    }
}

/// Errors surfaced when starting a capture session
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureError {
    /// The platform has no speech recognition capability
    #[error("speech recognition is not supported on this platform")]
    Unsupported,
    /// The capability exists but refused to start
    #[error("failed to start speech recognition: {0}")]
    StartFailed(String),
}

/// Speech-to-text capability.
///
/// Recognition events (interim, final, error, end) are pushed back into the
/// subsystem by the platform adapter via `VoiceAssistant::handle_event`, so
/// this trait only covers session control. Tests substitute a fake that
/// records `start`/`stop` calls and lets the test inject events directly.
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the platform provides speech recognition at all.
    /// Checked once at mount; when false the whole subsystem is absent.
    fn is_supported(&self) -> bool;

    /// Begin a recognition session with the given configuration
    fn start(&self, config: &RecognitionConfig) -> Result<(), CaptureError>;

    /// Forcibly end the active recognition session (no-op when none)
    fn stop(&self);
}

/// One utterance handed to the text-to-speech capability
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakRequest {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// Text-to-speech capability. Fire-and-forget: completion is never awaited.
pub trait SpeechSynthesizer: Send + Sync {
    /// Queue an utterance for synthesis
    fn speak(&self, request: &SpeakRequest);

    /// Cancel any in-flight synthesis (the output channel is a single
    /// global resource; new requests must cancel prior ones)
    fn cancel(&self);
}

/// Route-change capability: switches the visible application view
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Errors from the download capability
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DownloadError {
    /// The server answered with a non-success status
    #[error("download failed with HTTP status {0}")]
    Http(u16),
    /// The request never completed
    #[error("download failed: {0}")]
    Transport(String),
}

/// Download capability: fetches a URL and triggers a client-side file save.
/// The HTTP/blob mechanics live entirely behind this trait; the dispatcher
/// only selects the (url, filename) pair and reports the outcome.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str, filename: &str) -> Result<(), DownloadError>;
}

/// Durable client-side key-value storage (command history lives here)
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Errors from the keyboard shortcut capability
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShortcutError {
    #[error("failed to register shortcut: {0}")]
    RegisterFailed(String),
}

/// Global keyboard shortcut capability. The callback registered here toggles
/// capture for the lifetime of the mounted assistant; it must be registered
/// on mount and unregistered on shutdown to avoid duplicate handlers.
pub trait ShortcutBackend: Send + Sync {
    fn register(&self, callback: Box<dyn Fn() + Send + Sync>) -> Result<(), ShortcutError>;
    fn unregister(&self);
}
