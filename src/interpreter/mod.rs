// Command interpreter - maps a finalized transcript to an intent
// Pure and deterministic: first matching rule in declared precedence wins

pub mod grammar;

use serde::Serialize;

/// The fixed set of command categories an utterance can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    NavigateDashboard,
    NavigateCropRecommendation,
    NavigateFertilization,
    NavigateHarvest,
    NavigateReports,
    ExportManagerialExcel,
    ExportManagerialPdf,
    ExportLoans,
    ExportAlerts,
    ShowHelp,
    Close,
    Unrecognized,
}

impl Intent {
    /// Whether the interpreter resolved the utterance to a known command
    pub fn is_matched(&self) -> bool {
        !matches!(self, Intent::Unrecognized)
    }
}

/// Result of interpreting one finalized transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub intent: Intent,
    /// Canonical Spanish confirmation, spoken and displayed verbatim
    pub response: String,
}

/// Interpret a free-form utterance.
///
/// Normalizes (lowercase, trim) and evaluates the grammar rules in their
/// declared order: navigation intents first, then exports, then help, then
/// close. The first rule with any matching trigger wins; later rules are not
/// tested even if they would also match. This first-match policy is
/// deliberate: an utterance carrying both a navigation phrase and an export
/// phrase always resolves to the navigation intent.
pub fn interpret(utterance: &str) -> Interpretation {
    let normalized = utterance.trim().to_lowercase();

    for rule in grammar::rules() {
        if rule.matches(&normalized) {
            crate::debug!("utterance matched intent {:?}", rule.intent);
            return Interpretation {
                intent: rule.intent,
                response: rule.response.to_string(),
            };
        }
    }

    crate::debug!("utterance did not match any command");
    Interpretation {
        intent: Intent::Unrecognized,
        response: grammar::UNRECOGNIZED_RESPONSE.to_string(),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
