// Debounce guard for the capture toggle shortcut
// Rapid repeated presses within the debounce window are ignored

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Debounces the global shortcut so one physical key press never toggles
/// capture twice.
pub struct ToggleGuard {
    last_toggle: Mutex<Option<Instant>>,
    debounce: Duration,
}

impl ToggleGuard {
    pub fn new(debounce: Duration) -> Self {
        Self {
            last_toggle: Mutex::new(None),
            debounce,
        }
    }

    /// Returns true when the toggle should be acted upon, false when it
    /// falls within the debounce window of the previous accepted toggle.
    pub fn accept(&self) -> bool {
        let now = Instant::now();
        let mut last = match self.last_toggle.lock() {
            Ok(guard) => guard,
            Err(e) => {
                crate::error!("toggle guard lock poisoned: {}", e);
                return false;
            }
        };

        if let Some(prev) = *last {
            if now.duration_since(prev) < self.debounce {
                crate::trace!("toggle debounced");
                return false;
            }
        }

        *last = Some(now);
        true
    }
}

#[cfg(test)]
#[path = "shortcut_test.rs"]
mod tests;
