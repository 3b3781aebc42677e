//! Backend availability probe for the page header indicator.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::backend::types::ServiceStatus;
use crate::core_state::CoreState;
use crate::ui::error::UiError;

/// `GET /ui/status` — passthrough of the backend's component report.
pub async fn backend_status(
    State(core): State<Arc<CoreState>>,
) -> Result<Json<ServiceStatus>, UiError> {
    let status = core.backend.status().await?;
    Ok(Json(status))
}
