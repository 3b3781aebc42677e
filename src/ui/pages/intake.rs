//! Public intake page endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::controllers::intake::TriageView;
use crate::controllers::RemoteData;
use crate::core_state::CoreState;

#[derive(Debug, Deserialize)]
pub struct IntakeForm {
    pub symptoms: String,
}

/// `POST /ui/triage` — classify a symptom description.
pub async fn submit(
    State(core): State<Arc<CoreState>>,
    Json(form): Json<IntakeForm>,
) -> Json<RemoteData<TriageView>> {
    let mut ctl = core.intake.lock().await;
    ctl.submit(&core.backend, &form.symptoms).await;
    Json(ctl.snapshot())
}

/// `GET /ui/triage` — current intake page state.
pub async fn snapshot(State(core): State<Arc<CoreState>>) -> Json<RemoteData<TriageView>> {
    Json(core.intake.lock().await.snapshot())
}
