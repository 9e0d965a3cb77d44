// Feedback presenter - spoken confirmations and the command history
// Sole writer of the history; capture and interpretation only feed it values

pub mod history;

use crate::capabilities::{KeyValueStore, SpeakRequest, SpeechSynthesizer};
use crate::config::AssistantConfig;
use crate::interpreter::Interpretation;
use chrono::Utc;
use history::{CommandHistory, HistoryEntry};
use std::sync::Arc;

/// Converts interpreter output into spoken audio and maintains the bounded
/// command history, persisting it to durable storage on every update.
pub struct FeedbackPresenter {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn KeyValueStore>,
    history: CommandHistory,
    lang: String,
    rate: f32,
    pitch: f32,
    volume: f32,
    history_key: String,
}

impl FeedbackPresenter {
    /// Create a presenter, reloading any persisted history from the store
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn KeyValueStore>,
        config: &AssistantConfig,
    ) -> Self {
        let history = match store.get(&config.history_key) {
            Some(json) => CommandHistory::from_json(&json, config.history_capacity),
            None => CommandHistory::new(config.history_capacity),
        };
        crate::debug!("loaded {} command history entries", history.len());

        Self {
            synthesizer,
            store,
            history,
            lang: config.lang.clone(),
            rate: config.speech_rate,
            pitch: config.speech_pitch,
            volume: config.speech_volume,
            history_key: config.history_key.clone(),
        }
    }

    /// Present one interpretation result: cancel any in-flight synthesis,
    /// speak the response, and record a history entry when the intent
    /// matched. Unrecognized utterances are spoken but never persisted.
    pub fn announce(&mut self, utterance: &str, interpretation: &Interpretation) {
        self.speak(&interpretation.response);

        if interpretation.intent.is_matched() {
            self.history.record(HistoryEntry {
                utterance: utterance.to_string(),
                response: interpretation.response.clone(),
                timestamp: Utc::now(),
            });
            self.persist_history();
        }
    }

    /// Speak an arbitrary message (error feedback), cancelling prior audio
    pub fn speak(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        // Only one utterance may be queued at a time
        self.synthesizer.cancel();
        self.synthesizer.speak(&SpeakRequest {
            text: text.to_string(),
            lang: self.lang.clone(),
            rate: self.rate,
            pitch: self.pitch,
            volume: self.volume,
        });
    }

    /// Silence any in-flight synthesis
    pub fn cancel_speech(&self) {
        self.synthesizer.cancel();
    }

    /// Current history entries, most recent first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    fn persist_history(&self) {
        match self.history.to_json() {
            Ok(json) => self.store.set(&self.history_key, &json),
            Err(e) => crate::error!("failed to encode command history: {}", e),
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
