// Voice-command subsystem for the SmartCoop dashboard
//
// The platform shell injects capability implementations (speech recognition,
// synthesis, navigation, downloads, storage, shortcuts) and mounts a
// VoiceAssistant; recognition events then flow through handle_event and
// every visible state change comes back out as a PanelSnapshot.

pub mod assistant;
pub mod capabilities;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod feedback;
pub mod interpreter;
pub mod session;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use assistant::VoiceAssistant;
pub use capabilities::{
    CaptureError, DownloadError, Downloader, KeyValueStore, Navigator, RecognitionConfig,
    ShortcutBackend, ShortcutError, SpeakRequest, SpeechRecognizer, SpeechSynthesizer,
};
pub use config::AssistantConfig;
pub use events::{PanelEventEmitter, PanelSnapshot};
pub use interpreter::{interpret, Intent, Interpretation};
pub use session::{RecognitionErrorKind, RecognitionEvent, SessionStatus};
