// Panel events for the UI shell
// Defines the render contract payload and the emission trait for testability

use crate::feedback::history::HistoryEntry;
use crate::session::SessionStatus;
use serde::Serialize;

/// Event names as constants for consistency
pub mod event_names {
    pub const PANEL_UPDATED: &str = "panel_updated";
}

/// Everything the panel shell needs to render the voice assistant.
/// Emitted after every visible state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSnapshot {
    /// Current recognition session status
    pub status: SessionStatus,
    /// Live non-final transcript (empty outside Listening)
    pub interim_text: String,
    /// Finalized transcript for the current session, if any
    pub final_text: Option<String>,
    /// Confirmation or hint text to display
    pub feedback_message: Option<String>,
    /// Error text to display (recognition or download failure)
    pub error_message: Option<String>,
    /// Recent matched commands, most recent first
    pub history: Vec<HistoryEntry>,
    /// Whether the panel is shown at all
    pub visible: bool,
}

/// Trait for delivering panel updates to the UI shell.
/// Allows mocking in tests while a real shell bridges to the view layer.
pub trait PanelEventEmitter: Send + Sync {
    /// Deliver a fresh snapshot after a visible state change
    fn emit_panel_updated(&self, snapshot: PanelSnapshot);
}

/// Get the current timestamp in ISO 8601 format
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
