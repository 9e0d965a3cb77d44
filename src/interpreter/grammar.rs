// Command grammar - the ordered trigger table the interpreter evaluates
// Data, not control flow: edit the table to localize or extend commands

use super::Intent;
use regex::Regex;
use std::sync::OnceLock;

/// A trigger for one intent, tested against the normalized utterance
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Case-insensitive substring containment (not whole-word)
    Phrase(&'static str),
    /// Regular expression over the normalized utterance
    Pattern(&'static str),
}

/// One rule: intent, its triggers, and the canonical confirmation message
struct RuleSpec {
    intent: Intent,
    triggers: &'static [Trigger],
    response: &'static str,
}

/// Response for utterances that match no rule, echoing example phrasings
pub const UNRECOGNIZED_RESPONSE: &str =
    "No entendí el comando. Intenta: \"ir a inicio\", \"abrir reportes\", \"exportar excel\"";

/// Extended help message enumerating every supported command category
pub const HELP_RESPONSE: &str = "Puedes decir:\n\
• \"Ir a inicio\" o \"abrir dashboard\"\n\
• \"Recomendación de siembra\"\n\
• \"Plan de fertilización\"\n\
• \"Estimación de cosecha\"\n\
• \"Abrir reportes\"\n\
• \"Exportar excel\" o \"descargar pdf\"\n\
• \"Exportar préstamos\" o \"exportar alertas\"\n\
• \"Cerrar\" para salir del asistente";

// Evaluation order is part of the contract: navigation intents first
// (dashboard, crop recommendation, fertilization, harvest, reports), then
// exports (excel, pdf, loans, alerts), then help, then close. Accentless
// variants cover recognizers that strip diacritics.
const RULE_SPECS: &[RuleSpec] = &[
    RuleSpec {
        intent: Intent::NavigateDashboard,
        triggers: &[
            Trigger::Phrase("inicio"),
            Trigger::Phrase("dashboard"),
            Trigger::Phrase("panel principal"),
        ],
        response: "✓ Abriendo Dashboard",
    },
    RuleSpec {
        intent: Intent::NavigateCropRecommendation,
        triggers: &[
            Trigger::Phrase("recomendación"),
            Trigger::Phrase("recomendacion"),
            Trigger::Phrase("siembra"),
        ],
        response: "✓ Abriendo Recomendación de Siembra",
    },
    RuleSpec {
        intent: Intent::NavigateFertilization,
        triggers: &[
            Trigger::Phrase("fertilización"),
            Trigger::Phrase("fertilizacion"),
            Trigger::Phrase("fertilizante"),
        ],
        response: "✓ Abriendo Plan de Fertilización",
    },
    RuleSpec {
        intent: Intent::NavigateHarvest,
        triggers: &[
            Trigger::Phrase("cosecha"),
            Trigger::Phrase("estimación"),
            Trigger::Phrase("estimacion"),
        ],
        response: "✓ Abriendo Estimación de Cosecha",
    },
    RuleSpec {
        intent: Intent::NavigateReports,
        triggers: &[Trigger::Phrase("reporte")],
        response: "✓ Abriendo Reportes",
    },
    RuleSpec {
        intent: Intent::ExportManagerialExcel,
        triggers: &[
            Trigger::Pattern(r"(exportar|descargar|generar).*(excel|gerencial)"),
            Trigger::Pattern(r"(excel|gerencial).*(exportar|descargar|generar)"),
        ],
        response: "✓ Generando reporte gerencial en Excel",
    },
    RuleSpec {
        intent: Intent::ExportManagerialPdf,
        triggers: &[
            Trigger::Pattern(r"(exportar|descargar|generar).*pdf"),
            Trigger::Pattern(r"pdf.*(exportar|descargar|generar)"),
        ],
        response: "✓ Generando reporte en PDF",
    },
    RuleSpec {
        intent: Intent::ExportLoans,
        triggers: &[
            Trigger::Pattern(r"(exportar|descargar|generar).*(préstamo|prestamo)"),
            Trigger::Pattern(r"(préstamo|prestamo).*(exportar|descargar|generar)"),
        ],
        response: "✓ Generando reporte de préstamos",
    },
    RuleSpec {
        intent: Intent::ExportAlerts,
        triggers: &[
            Trigger::Pattern(r"(exportar|descargar|generar).*alerta"),
            Trigger::Pattern(r"alerta.*(exportar|descargar|generar)"),
        ],
        response: "✓ Generando reporte de alertas",
    },
    RuleSpec {
        intent: Intent::ShowHelp,
        triggers: &[
            Trigger::Phrase("ayuda"),
            Trigger::Phrase("qué puedo decir"),
            Trigger::Phrase("que puedo decir"),
            Trigger::Phrase("comandos"),
        ],
        response: HELP_RESPONSE,
    },
    RuleSpec {
        intent: Intent::Close,
        triggers: &[
            Trigger::Phrase("cerrar"),
            Trigger::Phrase("cierra"),
            Trigger::Phrase("adiós"),
            Trigger::Phrase("adios"),
            Trigger::Phrase("salir"),
        ],
        response: "",
    },
];

/// A rule with its regex triggers compiled
pub struct CommandRule {
    pub intent: Intent,
    phrases: Vec<&'static str>,
    patterns: Vec<Regex>,
    pub response: &'static str,
}

impl CommandRule {
    /// Test whether the normalized utterance contains any of this rule's
    /// triggers. Substring containment, not whole-word matching.
    pub fn matches(&self, normalized: &str) -> bool {
        self.phrases.iter().any(|p| normalized.contains(p))
            || self.patterns.iter().any(|r| r.is_match(normalized))
    }
}

/// The compiled rule table, in evaluation order. Built once per process.
pub fn rules() -> &'static [CommandRule] {
    static RULES: OnceLock<Vec<CommandRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        RULE_SPECS
            .iter()
            .map(|spec| {
                let mut phrases = Vec::new();
                let mut patterns = Vec::new();
                for trigger in spec.triggers {
                    match trigger {
                        Trigger::Phrase(p) => phrases.push(*p),
                        Trigger::Pattern(src) => patterns.push(
                            Regex::new(src).expect("static trigger pattern must compile"),
                        ),
                    }
                }
                CommandRule {
                    intent: spec.intent,
                    phrases,
                    patterns,
                    response: spec.response,
                }
            })
            .collect()
    })
}

#[cfg(test)]
#[path = "grammar_test.rs"]
mod tests;
