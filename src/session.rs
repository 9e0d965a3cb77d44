// Recognition session state machine for the capture controller
// One microphone-capture attempt = one RecognitionSession

use serde::Serialize;
use uuid::Uuid;

/// Status of the active recognition session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No capture in progress, ready to start
    Idle,
    /// Receiving recognition events from the platform
    Listening,
    /// Final transcript delivered, command being interpreted/dispatched
    Processing,
    /// Dispatch completed for this session
    Succeeded,
    /// Recognition or dispatch error ended this session
    Failed,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Typed recognition error taxonomy from the capture capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionErrorKind {
    NoSpeechDetected,
    MicrophoneUnavailable,
    PermissionDenied,
    Other,
}

impl RecognitionErrorKind {
    /// Map a platform error code (Web Speech API style) to a typed kind
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => Self::NoSpeechDetected,
            "audio-capture" => Self::MicrophoneUnavailable,
            "not-allowed" | "service-not-allowed" => Self::PermissionDenied,
            _ => Self::Other,
        }
    }

    /// User-facing Spanish message for this error kind
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoSpeechDetected => "No se detectó voz. Intenta de nuevo.",
            Self::MicrophoneUnavailable => "No se pudo acceder al micrófono.",
            Self::PermissionDenied => "Permiso de micrófono denegado.",
            Self::Other => "Error de reconocimiento. Intenta de nuevo.",
        }
    }
}

/// Events delivered by the speech-recognition capability, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    /// Non-final transcript; may fire many times per session
    Interim(String),
    /// Finalized transcript; at most one per session
    Final(String),
    /// Typed recognition error
    Error(RecognitionErrorKind),
    /// Natural end of the platform session
    End,
}

/// Errors from invalid session operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Invalid state transition attempted
    #[error("invalid session transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },
    /// Operation requires an active session
    #[error("no active recognition session")]
    NoActiveSession,
    /// The final transcript is set exactly once per session
    #[error("final transcript already set for this session")]
    FinalAlreadySet,
}

/// One microphone-capture attempt
#[derive(Debug, Clone)]
struct RecognitionSession {
    id: Uuid,
    status: SessionStatus,
    interim_text: String,
    final_text: Option<String>,
    error_kind: Option<RecognitionErrorKind>,
}

impl RecognitionSession {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: SessionStatus::Listening,
            interim_text: String::new(),
            final_text: None,
            error_kind: None,
        }
    }
}

/// Manager for the recognition session state machine.
///
/// Owns at most one session at a time and validates every transition:
///
/// - Idle -> Listening (on start)
/// - Listening -> Processing (on final transcript)
/// - Processing -> Succeeded (dispatch completed)
/// - Processing -> Failed (dispatch error)
/// - Listening | Processing -> Failed (recognition error, clears interim text)
/// - Listening -> Idle (natural end with no result, or forced stop)
///
/// Designed to be wrapped in a Mutex by the coordinator; events for a session
/// are applied in arrival order by the single-threaded caller.
#[derive(Debug, Default)]
pub struct SessionManager {
    session: Option<RecognitionSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Current status; Idle when no session exists
    pub fn status(&self) -> SessionStatus {
        self.session
            .as_ref()
            .map(|s| s.status)
            .unwrap_or(SessionStatus::Idle)
    }

    /// Id of the current session, if any
    pub fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn interim_text(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.interim_text.as_str())
            .unwrap_or("")
    }

    pub fn final_text(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.final_text.as_deref())
    }

    pub fn error_kind(&self) -> Option<RecognitionErrorKind> {
        self.session.as_ref().and_then(|s| s.error_kind)
    }

    /// Whether a session is currently receiving recognition events
    pub fn is_listening(&self) -> bool {
        self.status() == SessionStatus::Listening
    }

    /// Start a new capture session.
    ///
    /// Starting while a session is `Listening` or `Processing` is rejected
    /// (the caller decides whether to stop the previous session first); a
    /// finished session (Idle/Succeeded/Failed) is replaced.
    #[must_use = "this returns a Result that should be handled"]
    pub fn start(&mut self) -> Result<Uuid, SessionError> {
        let from = self.status();
        if from == SessionStatus::Listening || from == SessionStatus::Processing {
            return Err(SessionError::InvalidTransition {
                from,
                to: SessionStatus::Listening,
            });
        }

        let session = RecognitionSession::new();
        let id = session.id;
        self.session = Some(session);
        Ok(id)
    }

    /// Forcibly end the active session without producing a final transcript.
    ///
    /// Safe to call when no session is active (no-op). A session that already
    /// left Listening keeps its terminal state.
    pub fn stop(&mut self) {
        if let Some(ref mut session) = self.session {
            if session.status == SessionStatus::Listening {
                session.status = SessionStatus::Idle;
                session.interim_text.clear();
            }
        }
    }

    /// Record an interim (non-final) transcript; replaces any previous one.
    /// Must never trigger command interpretation.
    #[must_use = "this returns a Result that should be handled"]
    pub fn apply_interim(&mut self, text: &str) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        if session.status != SessionStatus::Listening {
            return Err(SessionError::InvalidTransition {
                from: session.status,
                to: SessionStatus::Listening,
            });
        }
        session.interim_text = text.to_string();
        Ok(())
    }

    /// Record the finalized transcript and transition to Processing.
    ///
    /// The final transcript is set exactly once; this is the only path into
    /// Processing, which guarantees at-most-once dispatch per utterance.
    #[must_use = "this returns a Result that should be handled"]
    pub fn apply_final(&mut self, text: &str) -> Result<String, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        if session.final_text.is_some() {
            return Err(SessionError::FinalAlreadySet);
        }
        if session.status != SessionStatus::Listening {
            return Err(SessionError::InvalidTransition {
                from: session.status,
                to: SessionStatus::Processing,
            });
        }
        session.final_text = Some(text.to_string());
        session.status = SessionStatus::Processing;
        Ok(text.to_string())
    }

    /// Record a recognition error: transition to Failed and clear the
    /// interim text. Ignored when no session is active.
    pub fn apply_error(&mut self, kind: RecognitionErrorKind) {
        if let Some(ref mut session) = self.session {
            if session.status == SessionStatus::Listening
                || session.status == SessionStatus::Processing
            {
                session.status = SessionStatus::Failed;
                session.error_kind = Some(kind);
                session.interim_text.clear();
            }
        }
    }

    /// Natural end of the platform session with no result: Listening -> Idle.
    /// An end event after a final result or error leaves the state untouched.
    pub fn apply_end(&mut self) {
        if let Some(ref mut session) = self.session {
            if session.status == SessionStatus::Listening {
                session.status = SessionStatus::Idle;
                session.interim_text.clear();
            }
        }
    }

    /// Mark dispatch as completed: Processing -> Succeeded
    #[must_use = "this returns a Result that should be handled"]
    pub fn complete(&mut self) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        if session.status != SessionStatus::Processing {
            return Err(SessionError::InvalidTransition {
                from: session.status,
                to: SessionStatus::Succeeded,
            });
        }
        session.status = SessionStatus::Succeeded;
        Ok(())
    }

    /// Mark dispatch as failed: Processing -> Failed.
    /// The error surfaces through the panel, not through `error_kind` (which
    /// is reserved for the capture capability's taxonomy).
    #[must_use = "this returns a Result that should be handled"]
    pub fn fail_dispatch(&mut self) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        if session.status != SessionStatus::Processing {
            return Err(SessionError::InvalidTransition {
                from: session.status,
                to: SessionStatus::Failed,
            });
        }
        session.status = SessionStatus::Failed;
        Ok(())
    }

    /// Drop any session and return to Idle.
    /// Used by error recovery and when the panel is cleared.
    pub fn reset(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
