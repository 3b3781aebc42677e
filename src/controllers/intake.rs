//! Public intake page — one request/response cycle per submission.

use serde::Serialize;

use crate::backend::BackendClient;
use crate::controllers::RemoteData;
use crate::models::{ClassificationView, TriageOutcome};
use crate::segment::{segment, ListStyle};

pub const MSG_EMPTY_SYMPTOMS: &str = "Por favor, insira os sintomas do paciente.";
pub const MSG_ENGINE_UNAVAILABLE: &str =
    "O serviço Ollama não está disponível. Por favor, verifique se o Ollama está instalado e em execução.";
pub const MSG_TRIAGE_FAILED: &str = "Erro ao processar a triagem. Por favor, tente novamente.";

/// Render-ready triage result: classification banner plus the analysis and
/// conduct sections segmented into list items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageView {
    pub id: String,
    pub symptoms: String,
    pub classification: ClassificationView,
    pub analysis_topics: Vec<String>,
    pub conduct_steps: Vec<String>,
    pub recorded_at: String,
}

impl TriageView {
    pub fn from_outcome(outcome: &TriageOutcome) -> Self {
        Self {
            id: outcome.id.clone(),
            symptoms: outcome.symptoms.clone(),
            classification: ClassificationView::from_raw(&outcome.classification),
            analysis_topics: segment(&outcome.justification, ListStyle::Bulleted),
            conduct_steps: segment(&outcome.conduct, ListStyle::Numbered),
            recorded_at: outcome.recorded_at.clone(),
        }
    }
}

/// Controller for the public symptom-intake form.
#[derive(Default)]
pub struct IntakeController {
    result: RemoteData<TriageView>,
}

impl IntakeController {
    /// Submit a symptom description for classification.
    ///
    /// Empty input is rejected before any network call. A 503 from the
    /// backend surfaces the engine-unavailable notice; every other failure
    /// surfaces the generic retry notice.
    pub async fn submit(&mut self, backend: &BackendClient, symptoms: &str) {
        if symptoms.trim().is_empty() {
            self.result.fail(MSG_EMPTY_SYMPTOMS);
            return;
        }
        if !self.result.begin() {
            return;
        }

        match backend.submit_triage(symptoms).await {
            Ok(outcome) => {
                tracing::info!(id = %outcome.id, classification = %outcome.classification, "Triage classified");
                self.result.resolve(TriageView::from_outcome(&outcome));
            }
            Err(e) if e.is_service_unavailable() => {
                tracing::warn!(error = %e, "Classification engine unavailable");
                self.result.fail(MSG_ENGINE_UNAVAILABLE);
            }
            Err(e) => {
                tracing::error!(error = %e, "Triage submission failed");
                self.result.fail(MSG_TRIAGE_FAILED);
            }
        }
    }

    pub fn snapshot(&self) -> RemoteData<TriageView> {
        self.result.clone()
    }
}
