// Voice assistant coordinator - wires capture, interpretation, dispatch and
// feedback into one control loop behind the panel render contract

pub mod shortcut;

use crate::capabilities::{
    Downloader, KeyValueStore, Navigator, RecognitionConfig, ShortcutBackend, SpeechRecognizer,
    SpeechSynthesizer,
};
use crate::config::AssistantConfig;
use crate::dispatch::{action_for, DispatchAction, Dispatcher, ReportKind, DOWNLOAD_FAILED_MESSAGE};
use crate::events::{PanelEventEmitter, PanelSnapshot};
use crate::feedback::FeedbackPresenter;
use crate::interpreter::{interpret, Intent};
use crate::session::{RecognitionErrorKind, RecognitionEvent, SessionManager, SessionStatus};
use shortcut::ToggleGuard;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::task::JoinHandle;

/// Visible panel state owned by the coordinator (session and history state
/// live in their own managers)
#[derive(Debug, Default)]
struct PanelState {
    visible: bool,
    feedback_message: Option<String>,
    error_message: Option<String>,
}

/// Handles for the pending delayed actions. All of them must be cancelable
/// when a new session starts or the assistant shuts down, so a stale timer
/// never acts on a newer session's state.
#[derive(Default)]
struct PendingTimers {
    navigation: Option<JoinHandle<()>>,
    dismiss: Option<JoinHandle<()>>,
    error_clear: Option<JoinHandle<()>>,
}

impl PendingTimers {
    fn cancel_all(&mut self) {
        for handle in [
            self.navigation.take(),
            self.dismiss.take(),
            self.error_clear.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
    }
}

/// The voice-command subsystem.
///
/// Owns the recognition session state machine, the interpreter, the action
/// dispatcher and the feedback presenter, and exposes the render contract
/// (`snapshot` plus `toggle_capture`/`dismiss`) to the panel shell. The
/// platform adapter feeds recognition events through `handle_event` in
/// arrival order.
///
/// `mount` must be called within a tokio runtime; the captured handle is
/// used to run the delayed-navigation, auto-dismiss and error-clear timers
/// and the export download.
pub struct VoiceAssistant {
    // Self-reference so timer tasks and the export future can hold the
    // assistant alive without borrowing across spawns
    weak: Weak<VoiceAssistant>,
    config: AssistantConfig,
    session: Mutex<SessionManager>,
    presenter: Mutex<FeedbackPresenter>,
    dispatcher: Dispatcher,
    recognizer: Arc<dyn SpeechRecognizer>,
    shortcut: Arc<dyn ShortcutBackend>,
    emitter: Arc<dyn PanelEventEmitter>,
    panel: Mutex<PanelState>,
    timers: Mutex<PendingTimers>,
    toggle_guard: ToggleGuard,
    runtime: tokio::runtime::Handle,
}

impl VoiceAssistant {
    /// Mount the assistant, wiring all injected capabilities.
    ///
    /// Returns `None` when the platform has no speech recognition: the voice
    /// feature is then entirely absent, not partially rendered. The capture
    /// toggle shortcut is registered here and unregistered in `shutdown`.
    #[allow(clippy::too_many_arguments)]
    pub fn mount(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        navigator: Arc<dyn Navigator>,
        downloader: Arc<dyn Downloader>,
        store: Arc<dyn KeyValueStore>,
        shortcut: Arc<dyn ShortcutBackend>,
        emitter: Arc<dyn PanelEventEmitter>,
        config: AssistantConfig,
    ) -> Option<Arc<Self>> {
        if !recognizer.is_supported() {
            crate::info!("speech recognition unsupported, voice assistant disabled");
            return None;
        }

        let presenter = FeedbackPresenter::new(synthesizer, store, &config);
        let dispatcher = Dispatcher::new(navigator, downloader);
        let toggle_guard = ToggleGuard::new(config.toggle_debounce);

        let assistant = Arc::new_cyclic(|weak| Self {
            weak: weak.clone(),
            config,
            session: Mutex::new(SessionManager::new()),
            presenter: Mutex::new(presenter),
            dispatcher,
            recognizer,
            shortcut: shortcut.clone(),
            emitter,
            panel: Mutex::new(PanelState::default()),
            timers: Mutex::new(PendingTimers::default()),
            toggle_guard,
            runtime: tokio::runtime::Handle::current(),
        });

        let weak: Weak<VoiceAssistant> = Arc::downgrade(&assistant);
        if let Err(e) = shortcut.register(Box::new(move || {
            if let Some(assistant) = weak.upgrade() {
                assistant.toggle_capture();
            }
        })) {
            crate::warn!("failed to register capture shortcut: {}", e);
            crate::warn!("assistant will continue without keyboard shortcut");
        }

        crate::info!("voice assistant mounted");
        Some(assistant)
    }

    /// Start a new capture session.
    ///
    /// Rejected (returns false) while a session is already Listening or
    /// Processing; the toggle path stops the previous session instead.
    pub fn start_capture(&self) -> bool {
        // Stale timers must never act on the new session
        self.cancel_timers();

        {
            let mut session = match lock_or_log(&self.session, "session") {
                Some(guard) => guard,
                None => return false,
            };
            if let Err(e) = session.start() {
                crate::debug!("capture start rejected: {}", e);
                return false;
            }
        }

        if let Some(mut panel) = lock_or_log(&self.panel, "panel") {
            panel.visible = true;
            panel.feedback_message = None;
            panel.error_message = None;
        }

        let recognition_config = RecognitionConfig {
            lang: self.config.lang.clone(),
            ..RecognitionConfig::default()
        };
        if let Err(e) = self.recognizer.start(&recognition_config) {
            crate::error!("failed to start speech recognition: {}", e);
            self.handle_recognition_error(RecognitionErrorKind::MicrophoneUnavailable);
            return false;
        }

        crate::info!("capture started");
        self.emit();
        true
    }

    /// Forcibly end the active capture session. Safe when none is active.
    pub fn stop_capture(&self) {
        self.recognizer.stop();
        if let Some(mut session) = lock_or_log(&self.session, "session") {
            session.stop();
        }
        crate::debug!("capture stopped");
        self.emit();
    }

    /// Toggle capture, debounced. Bound to the global keyboard shortcut for
    /// the lifetime of the mounted assistant, and callable from the panel.
    pub fn toggle_capture(&self) -> bool {
        if !self.toggle_guard.accept() {
            return false;
        }

        let status = self.status();
        crate::debug!("toggle received, current status: {:?}", status);
        match status {
            SessionStatus::Listening => {
                self.stop_capture();
                true
            }
            SessionStatus::Processing => {
                // Busy interpreting/dispatching - ignore the toggle
                crate::debug!("toggle ignored - still processing");
                false
            }
            _ => self.start_capture(),
        }
    }

    /// Process one recognition event from the platform adapter.
    /// Events for a session must arrive in platform emission order.
    pub fn handle_event(&self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Interim(text) => {
                if let Some(mut session) = lock_or_log(&self.session, "session") {
                    if let Err(e) = session.apply_interim(&text) {
                        crate::debug!("ignoring stray interim transcript: {}", e);
                        return;
                    }
                }
                self.emit();
            }
            RecognitionEvent::Final(text) => self.handle_final(text),
            RecognitionEvent::Error(kind) => self.handle_recognition_error(kind),
            RecognitionEvent::End => {
                if let Some(mut session) = lock_or_log(&self.session, "session") {
                    session.apply_end();
                }
                self.emit();
            }
        }
    }

    /// Hide the panel and silence any feedback. Stops an in-progress
    /// capture. Exposed to the panel shell as the dismiss action.
    pub fn dismiss(&self) {
        self.cancel_timers();
        self.recognizer.stop();

        if let Some(mut session) = lock_or_log(&self.session, "session") {
            session.stop();
            session.reset();
        }
        if let Some(presenter) = lock_or_log(&self.presenter, "presenter") {
            presenter.cancel_speech();
        }
        if let Some(mut panel) = lock_or_log(&self.panel, "panel") {
            panel.visible = false;
            panel.feedback_message = None;
            panel.error_message = None;
        }
        self.emit();
    }

    /// Tear down the assistant: cancel timers, stop capture and speech, and
    /// release the keyboard shortcut.
    pub fn shutdown(&self) {
        self.cancel_timers();
        self.recognizer.stop();
        if let Some(presenter) = lock_or_log(&self.presenter, "presenter") {
            presenter.cancel_speech();
        }
        self.shortcut.unregister();
        crate::info!("voice assistant shut down");
    }

    /// Current render contract payload for the panel shell
    pub fn snapshot(&self) -> PanelSnapshot {
        let (status, interim_text, final_text) = match self.session.lock() {
            Ok(session) => (
                session.status(),
                session.interim_text().to_string(),
                session.final_text().map(|t| t.to_string()),
            ),
            Err(e) => {
                crate::error!("failed to acquire session lock: {}", e);
                (SessionStatus::Idle, String::new(), None)
            }
        };

        let (feedback_message, error_message, visible) = match self.panel.lock() {
            Ok(panel) => (
                panel.feedback_message.clone(),
                panel.error_message.clone(),
                panel.visible,
            ),
            Err(e) => {
                crate::error!("failed to acquire panel lock: {}", e);
                (None, None, false)
            }
        };

        let history = match self.presenter.lock() {
            Ok(presenter) => presenter.history(),
            Err(e) => {
                crate::error!("failed to acquire presenter lock: {}", e);
                Vec::new()
            }
        };

        PanelSnapshot {
            status,
            interim_text,
            final_text,
            feedback_message,
            error_message,
            history,
            visible,
        }
    }

    /// Current session status (Idle when no session exists)
    pub fn status(&self) -> SessionStatus {
        lock_or_log(&self.session, "session")
            .map(|s| s.status())
            .unwrap_or(SessionStatus::Idle)
    }

    fn handle_final(&self, text: String) {
        let final_text = {
            let mut session = match lock_or_log(&self.session, "session") {
                Some(guard) => guard,
                None => return,
            };
            match session.apply_final(&text) {
                Ok(t) => t,
                Err(e) => {
                    crate::warn!("ignoring stray final transcript: {}", e);
                    return;
                }
            }
        };

        let interpretation = interpret(&final_text);
        crate::info!(
            "utterance {:?} resolved to {:?}",
            final_text,
            interpretation.intent
        );

        // Close tears everything down without producing feedback content
        if interpretation.intent == Intent::Close {
            self.dismiss();
            return;
        }

        if let Some(mut presenter) = lock_or_log(&self.presenter, "presenter") {
            presenter.announce(&final_text, &interpretation);
        }
        if let Some(mut panel) = lock_or_log(&self.panel, "panel") {
            panel.visible = true;
            panel.feedback_message = Some(interpretation.response.clone());
            panel.error_message = None;
        }

        match action_for(interpretation.intent) {
            DispatchAction::Navigate(route) => {
                self.mark_dispatched();
                self.schedule_navigation(route);
                self.schedule_dismiss();
            }
            DispatchAction::Export(kind) => {
                // Session stays Processing until the download resolves
                self.spawn_export(kind);
                self.schedule_dismiss();
            }
            DispatchAction::Help => {
                // Help stays visible until manually dismissed
                self.mark_dispatched();
            }
            DispatchAction::None => {
                // Unrecognized: hint shown, nothing to execute
                self.mark_dispatched();
            }
            DispatchAction::CloseAssistant => {
                // Handled above before any feedback was produced
            }
        }

        self.emit();
    }

    fn handle_recognition_error(&self, kind: RecognitionErrorKind) {
        crate::warn!("recognition error: {:?}", kind);
        if let Some(mut session) = lock_or_log(&self.session, "session") {
            session.apply_error(kind);
        }

        let message = kind.message();
        if let Some(presenter) = lock_or_log(&self.presenter, "presenter") {
            presenter.speak(message);
        }
        if let Some(mut panel) = lock_or_log(&self.panel, "panel") {
            panel.visible = true;
            panel.error_message = Some(message.to_string());
            panel.feedback_message = None;
        }

        self.schedule_error_clear();
        self.emit();
    }

    /// Processing -> Succeeded once the intent's side effect is under way
    fn mark_dispatched(&self) {
        if let Some(mut session) = lock_or_log(&self.session, "session") {
            if let Err(e) = session.complete() {
                crate::debug!("could not mark session succeeded: {}", e);
            }
        }
    }

    /// Defer the route change so the confirmation is heard/seen first
    fn schedule_navigation(&self, route: &'static str) {
        let assistant = match self.weak.upgrade() {
            Some(a) => a,
            None => return,
        };
        let delay = self.config.navigation_delay;
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            assistant.dispatcher.navigate(route);
        });
        if let Some(mut timers) = lock_or_log(&self.timers, "timers") {
            if let Some(old) = timers.navigation.replace(handle) {
                old.abort();
            }
        }
    }

    /// Auto-dismiss matched non-help feedback after the configured delay
    fn schedule_dismiss(&self) {
        let assistant = match self.weak.upgrade() {
            Some(a) => a,
            None => return,
        };
        let delay = self.config.dismiss_delay;
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            assistant.hide_panel();
        });
        if let Some(mut timers) = lock_or_log(&self.timers, "timers") {
            if let Some(old) = timers.dismiss.replace(handle) {
                old.abort();
            }
        }
    }

    /// Auto-clear the panel a few seconds after a recognition error
    fn schedule_error_clear(&self) {
        let assistant = match self.weak.upgrade() {
            Some(a) => a,
            None => return,
        };
        let delay = self.config.error_clear_delay;
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            assistant.clear_after_error();
        });
        if let Some(mut timers) = lock_or_log(&self.timers, "timers") {
            if let Some(old) = timers.error_clear.replace(handle) {
                old.abort();
            }
        }
    }

    fn spawn_export(&self, kind: ReportKind) {
        let assistant = match self.weak.upgrade() {
            Some(a) => a,
            None => return,
        };
        self.runtime.spawn(async move {
            let result = assistant
                .dispatcher
                .export(kind, &assistant.config.report_base_url)
                .await;
            match result {
                Ok(()) => {
                    assistant.mark_dispatched();
                    assistant.emit();
                }
                Err(_) => assistant.report_download_failure(),
            }
        });
    }

    /// Download failures persist until the next interaction (no auto-clear)
    fn report_download_failure(&self) {
        if let Some(mut session) = lock_or_log(&self.session, "session") {
            if let Err(e) = session.fail_dispatch() {
                crate::debug!("could not mark session failed: {}", e);
            }
        }
        if let Some(mut timers) = lock_or_log(&self.timers, "timers") {
            if let Some(handle) = timers.dismiss.take() {
                handle.abort();
            }
        }
        if let Some(presenter) = lock_or_log(&self.presenter, "presenter") {
            presenter.speak(DOWNLOAD_FAILED_MESSAGE);
        }
        if let Some(mut panel) = lock_or_log(&self.panel, "panel") {
            panel.visible = true;
            panel.error_message = Some(DOWNLOAD_FAILED_MESSAGE.to_string());
            panel.feedback_message = None;
        }
        self.emit();
    }

    fn hide_panel(&self) {
        if let Some(mut panel) = lock_or_log(&self.panel, "panel") {
            panel.visible = false;
            panel.feedback_message = None;
        }
        self.emit();
    }

    fn clear_after_error(&self) {
        if let Some(mut session) = lock_or_log(&self.session, "session") {
            session.reset();
        }
        if let Some(mut panel) = lock_or_log(&self.panel, "panel") {
            panel.visible = false;
            panel.error_message = None;
            panel.feedback_message = None;
        }
        self.emit();
    }

    fn cancel_timers(&self) {
        if let Some(mut timers) = lock_or_log(&self.timers, "timers") {
            timers.cancel_all();
        }
    }

    fn emit(&self) {
        self.emitter.emit_panel_updated(self.snapshot());
    }
}

impl Drop for VoiceAssistant {
    fn drop(&mut self) {
        if let Ok(mut timers) = self.timers.lock() {
            timers.cancel_all();
        }
    }
}

fn lock_or_log<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Option<MutexGuard<'a, T>> {
    match mutex.lock() {
        Ok(guard) => Some(guard),
        Err(e) => {
            crate::error!("failed to acquire {} lock: {}", what, e);
            None
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
