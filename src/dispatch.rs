// Action dispatcher - executes the side effect of a resolved intent
// Navigation and export tables are static data keyed by intent

use crate::capabilities::{DownloadError, Downloader, Navigator};
use crate::interpreter::Intent;
use chrono::NaiveDate;
use std::sync::Arc;

/// User-facing message when a report download fails
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Error al descargar el reporte. Intenta de nuevo.";

/// The four downloadable reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    ManagerialExcel,
    ManagerialPdf,
    Loans,
    Alerts,
}

impl ReportKind {
    /// Path segment under the report base URL
    fn endpoint(&self) -> &'static str {
        match self {
            Self::ManagerialExcel => "gerencial/",
            Self::ManagerialPdf => "gerencial-pdf/",
            Self::Loans => "prestamos-csv/",
            Self::Alerts => "alertas-csv/",
        }
    }

    /// Suggested filename, stamped with the given date
    fn filename(&self, date: NaiveDate) -> String {
        let stamp = date.format("%Y-%m-%d");
        match self {
            Self::ManagerialExcel => format!("Reporte_Gerencial_{}.xlsx", stamp),
            Self::ManagerialPdf => format!("Reporte_Gerencial_{}.pdf", stamp),
            Self::Loans => format!("Prestamos_{}.csv", stamp),
            Self::Alerts => format!("Alertas_Riesgo_{}.csv", stamp),
        }
    }
}

/// The side effect a resolved intent requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchAction {
    /// Change the application route (after the confirmation delay)
    Navigate(&'static str),
    /// Fetch and save a generated report
    Export(ReportKind),
    /// Show the extended help message; no navigation or download
    Help,
    /// Tear down the session and hide the panel
    CloseAssistant,
    /// Nothing to execute (unrecognized utterance)
    None,
}

/// Resolve the statically associated action for an intent
pub fn action_for(intent: Intent) -> DispatchAction {
    match intent {
        Intent::NavigateDashboard => DispatchAction::Navigate("/"),
        Intent::NavigateCropRecommendation => {
            DispatchAction::Navigate("/smart-farming/recommendation")
        }
        Intent::NavigateFertilization => DispatchAction::Navigate("/smart-farming/fertilization"),
        Intent::NavigateHarvest => DispatchAction::Navigate("/smart-farming/harvest"),
        Intent::NavigateReports => DispatchAction::Navigate("/reports"),
        Intent::ExportManagerialExcel => DispatchAction::Export(ReportKind::ManagerialExcel),
        Intent::ExportManagerialPdf => DispatchAction::Export(ReportKind::ManagerialPdf),
        Intent::ExportLoans => DispatchAction::Export(ReportKind::Loans),
        Intent::ExportAlerts => DispatchAction::Export(ReportKind::Alerts),
        Intent::ShowHelp => DispatchAction::Help,
        Intent::Close => DispatchAction::CloseAssistant,
        Intent::Unrecognized => DispatchAction::None,
    }
}

/// A resolved (url, suggested filename) pair for one export
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub url: String,
    pub filename: String,
}

/// Build the download request for a report kind
pub fn report_request(kind: ReportKind, base_url: &str, date: NaiveDate) -> ReportRequest {
    ReportRequest {
        url: format!("{}{}", base_url, kind.endpoint()),
        filename: kind.filename(date),
    }
}

/// Executes navigation and export side effects through the injected
/// capabilities. Timer scheduling (the 1.5 s navigation delay) is owned by
/// the coordinator so pending actions stay cancelable with its lifecycle.
pub struct Dispatcher {
    navigator: Arc<dyn Navigator>,
    downloader: Arc<dyn Downloader>,
}

impl Dispatcher {
    pub fn new(navigator: Arc<dyn Navigator>, downloader: Arc<dyn Downloader>) -> Self {
        Self {
            navigator,
            downloader,
        }
    }

    /// Change the application route
    pub fn navigate(&self, route: &str) {
        crate::info!("navigating to {}", route);
        self.navigator.navigate(route);
    }

    /// Download a report, stamped with today's date.
    /// Failure is reported to the caller; it never tears down the session.
    pub async fn export(&self, kind: ReportKind, base_url: &str) -> Result<(), DownloadError> {
        let request = report_request(kind, base_url, chrono::Utc::now().date_naive());
        crate::info!("downloading report {:?} from {}", kind, request.url);
        match self.downloader.download(&request.url, &request.filename).await {
            Ok(()) => {
                crate::info!("report saved as {}", request.filename);
                Ok(())
            }
            Err(e) => {
                crate::warn!("report download failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
