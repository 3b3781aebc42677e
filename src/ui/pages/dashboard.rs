//! Admin dashboard endpoints. Every handler passes the session gate first;
//! an absent session means a 401 with the login redirect and no data fetch.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::controllers::dashboard::{AdminMenu, DashboardSnapshot};
use crate::core_state::CoreState;
use crate::ui::error::UiError;

/// Dashboard page state plus the greeting line.
#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub welcome: String,
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct MenuForm {
    pub menu: AdminMenu,
}

#[derive(Debug, Deserialize)]
pub struct BeginValidationForm {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub feedback: String,
}

/// `GET /ui/dashboard` — page state, fetching on first entry.
pub async fn snapshot(State(core): State<Arc<CoreState>>) -> Result<Json<DashboardPage>, UiError> {
    let user = core.require_session()?;
    let mut ctl = core.dashboard.lock().await;
    ctl.ensure_loaded(&core.backend).await;
    Ok(Json(DashboardPage {
        welcome: user.display_name(),
        snapshot: ctl.snapshot(),
    }))
}

/// `POST /ui/dashboard/refresh` — the explicit "try again" affordance.
pub async fn refresh(State(core): State<Arc<CoreState>>) -> Result<Json<DashboardPage>, UiError> {
    let user = core.require_session()?;
    let mut ctl = core.dashboard.lock().await;
    ctl.refresh(&core.backend).await;
    Ok(Json(DashboardPage {
        welcome: user.display_name(),
        snapshot: ctl.snapshot(),
    }))
}

/// `POST /ui/dashboard/menu`.
pub async fn select_menu(
    State(core): State<Arc<CoreState>>,
    Json(form): Json<MenuForm>,
) -> Result<Json<DashboardPage>, UiError> {
    let user = core.require_session()?;
    let mut ctl = core.dashboard.lock().await;
    ctl.select_menu(&core.backend, form.menu).await;
    Ok(Json(DashboardPage {
        welcome: user.display_name(),
        snapshot: ctl.snapshot(),
    }))
}

/// `POST /ui/dashboard/validate/begin`.
pub async fn begin_validation(
    State(core): State<Arc<CoreState>>,
    Json(form): Json<BeginValidationForm>,
) -> Result<Json<DashboardPage>, UiError> {
    let user = core.require_session()?;
    let mut ctl = core.dashboard.lock().await;
    if !ctl.begin_validation(&form.id) {
        return Err(UiError::BadRequest("Triagem não encontrada".into()));
    }
    Ok(Json(DashboardPage {
        welcome: user.display_name(),
        snapshot: ctl.snapshot(),
    }))
}

/// `POST /ui/dashboard/validate/submit` — the specialist's feedback.
pub async fn submit_validation(
    State(core): State<Arc<CoreState>>,
    Json(form): Json<FeedbackForm>,
) -> Result<Json<DashboardPage>, UiError> {
    let user = core.require_session()?;
    let mut ctl = core.dashboard.lock().await;
    ctl.submit_validation(&core.backend, &user.username, &form.feedback)
        .await;
    Ok(Json(DashboardPage {
        welcome: user.display_name(),
        snapshot: ctl.snapshot(),
    }))
}

/// `POST /ui/dashboard/validate/cancel`.
pub async fn cancel_validation(
    State(core): State<Arc<CoreState>>,
) -> Result<Json<DashboardPage>, UiError> {
    let user = core.require_session()?;
    let mut ctl = core.dashboard.lock().await;
    ctl.cancel_validation();
    Ok(Json(DashboardPage {
        welcome: user.display_name(),
        snapshot: ctl.snapshot(),
    }))
}

/// `POST /ui/dashboard/notice/dismiss`.
pub async fn dismiss_notice(
    State(core): State<Arc<CoreState>>,
) -> Result<Json<DashboardPage>, UiError> {
    let user = core.require_session()?;
    let mut ctl = core.dashboard.lock().await;
    ctl.dismiss_notice();
    Ok(Json(DashboardPage {
        welcome: user.display_name(),
        snapshot: ctl.snapshot(),
    }))
}
