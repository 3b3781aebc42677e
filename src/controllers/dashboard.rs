//! Admin dashboard — menu-driven listing plus the validation workflow.
//!
//! The menu decides what a refresh fetches: the dashboard pane loads the
//! statistics and the pending list, the listing panes load one filter, and
//! the knowledge/export panes are static placeholders. Selecting a pending
//! triage enters a nested validation sub-state which exits on submit or
//! cancel. Action outcomes surface as modal notices.

use serde::{Deserialize, Serialize};

use crate::backend::BackendClient;
use crate::controllers::{Notice, RemoteData};
use crate::models::{Statistics, TriageFilter, TriageRecord};

pub const MSG_LOAD_FAILED: &str = "Erro ao carregar dados. Por favor, tente novamente.";
pub const MSG_FEEDBACK_REQUIRED: &str = "Por favor, digite um feedback.";
pub const MSG_VALIDATED_OK: &str = "Triagem validada com sucesso!";
pub const MSG_VALIDATE_FAILED: &str = "Erro ao validar triagem. Por favor, tente novamente.";

/// Admin-area menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminMenu {
    Dashboard,
    Pendentes,
    Todas,
    Conhecimento,
    Exportar,
}

impl AdminMenu {
    /// Listing filter this pane fetches, if it fetches one.
    fn filter(&self) -> Option<TriageFilter> {
        match self {
            Self::Dashboard | Self::Pendentes => Some(TriageFilter::Pending),
            Self::Todas => Some(TriageFilter::All),
            Self::Conhecimento | Self::Exportar => None,
        }
    }

    fn loads_statistics(&self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

pub struct DashboardController {
    menu: AdminMenu,
    stats: RemoteData<Statistics>,
    triages: RemoteData<Vec<TriageRecord>>,
    validating: Option<TriageRecord>,
    notice: Option<Notice>,
}

impl Default for DashboardController {
    fn default() -> Self {
        Self {
            menu: AdminMenu::Dashboard,
            stats: RemoteData::Idle,
            triages: RemoteData::Idle,
            validating: None,
            notice: None,
        }
    }
}

/// Serializable page state handed to the browser.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub menu: AdminMenu,
    pub stats: RemoteData<Statistics>,
    pub triages: RemoteData<Vec<TriageRecord>>,
    pub validating: Option<TriageRecord>,
    pub notice: Option<Notice>,
}

impl DashboardController {
    /// Re-fetch whatever the active pane shows.
    pub async fn refresh(&mut self, backend: &BackendClient) {
        if self.menu.loads_statistics() {
            if !self.stats.begin() {
                return;
            }
            match backend.statistics().await {
                Ok(stats) => self.stats.resolve(stats),
                Err(e) => {
                    tracing::error!(error = %e, "Statistics load failed");
                    self.stats.fail(MSG_LOAD_FAILED);
                    self.triages.fail(MSG_LOAD_FAILED);
                    return;
                }
            }
        }

        if let Some(filter) = self.menu.filter() {
            if !self.triages.begin() {
                return;
            }
            match backend.list_triages(filter).await {
                Ok(rows) => self.triages.resolve(rows),
                Err(e) => {
                    tracing::error!(error = %e, filter = filter.query_value(), "Triage list load failed");
                    self.triages.fail(MSG_LOAD_FAILED);
                }
            }
        }
    }

    /// Fetch on first entry only; later calls return the current state.
    pub async fn ensure_loaded(&mut self, backend: &BackendClient) {
        if matches!(self.stats, RemoteData::Idle) && matches!(self.triages, RemoteData::Idle) {
            self.refresh(backend).await;
        }
    }

    /// Switch pane and re-enter the loading cycle for it.
    pub async fn select_menu(&mut self, backend: &BackendClient, menu: AdminMenu) {
        self.menu = menu;
        self.refresh(backend).await;
    }

    // ── Validation sub-state ────────────────────────────────

    /// Open the validation pane for a listed triage. Returns `false` when
    /// the id is not on the currently loaded list.
    pub fn begin_validation(&mut self, triage_id: &str) -> bool {
        let Some(rows) = self.triages.data() else {
            return false;
        };
        match rows.iter().find(|row| row.id == triage_id) {
            Some(row) => {
                self.validating = Some(row.clone());
                true
            }
            None => false,
        }
    }

    pub fn cancel_validation(&mut self) {
        self.validating = None;
    }

    /// Submit the specialist's feedback for the open triage.
    ///
    /// Blank feedback is rejected before any network call. Success closes
    /// the pane and refreshes the counts; failure leaves everything as it
    /// was, plus an error notice.
    pub async fn submit_validation(
        &mut self,
        backend: &BackendClient,
        validated_by: &str,
        feedback: &str,
    ) {
        let Some(record) = self.validating.clone() else {
            return;
        };
        if feedback.trim().is_empty() {
            self.notice = Some(Notice::error(MSG_FEEDBACK_REQUIRED));
            return;
        }

        match backend.validate_triage(&record.id, validated_by, feedback).await {
            Ok(ack) if ack.success => {
                tracing::info!(id = %record.id, validated_by, "Triage validated");
                self.notice = Some(Notice::success(MSG_VALIDATED_OK));
                self.validating = None;
                self.refresh(backend).await;
            }
            Ok(ack) => {
                tracing::warn!(id = %record.id, message = ?ack.message, "Validation refused");
                self.notice = Some(Notice::error(MSG_VALIDATE_FAILED));
            }
            Err(e) => {
                tracing::error!(error = %e, id = %record.id, "Validation request failed");
                self.notice = Some(Notice::error(MSG_VALIDATE_FAILED));
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            menu: self.menu,
            stats: self.stats.clone(),
            triages: self.triages.clone(),
            validating: self.validating.clone(),
            notice: self.notice.clone(),
        }
    }
}
