// Assistant configuration - locale, speech parameters, timers, persistence keys

use std::time::Duration;

/// Configuration for the voice assistant.
///
/// The defaults reproduce production behavior; tests shrink the delays so
/// timer-driven paths run in milliseconds.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Locale used for both recognition and synthesis
    pub lang: String,
    /// Synthesis rate (1.0 = normal)
    pub speech_rate: f32,
    /// Synthesis pitch (1.0 = normal)
    pub speech_pitch: f32,
    /// Synthesis volume (1.0 = full)
    pub speech_volume: f32,
    /// Delay between showing a navigation confirmation and changing the route
    pub navigation_delay: Duration,
    /// Delay before auto-dismissing the panel after matched non-help feedback
    pub dismiss_delay: Duration,
    /// Delay before auto-clearing the panel after a recognition error
    pub error_clear_delay: Duration,
    /// Debounce window for the capture toggle shortcut
    pub toggle_debounce: Duration,
    /// Maximum number of retained command history entries
    pub history_capacity: usize,
    /// Storage key under which the JSON-encoded history is persisted
    pub history_key: String,
    /// Base URL of the report-generation endpoints
    pub report_base_url: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            lang: "es-ES".to_string(),
            speech_rate: 1.0,
            speech_pitch: 1.0,
            speech_volume: 1.0,
            navigation_delay: Duration::from_millis(1500),
            dismiss_delay: Duration::from_millis(2000),
            error_clear_delay: Duration::from_millis(3000),
            toggle_debounce: Duration::from_millis(300),
            history_capacity: 5,
            history_key: "voiceCommandHistory".to_string(),
            report_base_url: "http://localhost:8000/api/finanzas/reportes/".to_string(),
        }
    }
}
