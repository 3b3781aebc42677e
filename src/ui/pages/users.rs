//! User administration endpoints. All pass the admin gate.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::controllers::users::{self, EditUserForm, FormOutcome, NewUserForm, UsersSnapshot};
use crate::core_state::CoreState;
use crate::models::User;
use crate::ui::error::UiError;

/// `GET /ui/users` — fetch and return the roster.
pub async fn list(State(core): State<Arc<CoreState>>) -> Result<Json<UsersSnapshot>, UiError> {
    core.require_admin()?;
    let mut ctl = core.users.lock().await;
    ctl.load(&core.backend).await;
    Ok(Json(ctl.snapshot()))
}

/// `POST /ui/users` — create a user from the registration form.
pub async fn create(
    State(core): State<Arc<CoreState>>,
    Json(form): Json<NewUserForm>,
) -> Result<Json<FormOutcome>, UiError> {
    core.require_admin()?;
    Ok(Json(users::create_user(&core.backend, &form).await))
}

/// `GET /ui/users/:id` — one record for the edit form.
pub async fn detail(
    State(core): State<Arc<CoreState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, UiError> {
    core.require_admin()?;
    users::fetch_user(&core.backend, &id)
        .await
        .map(Json)
        .map_err(UiError::Upstream)
}

/// `PUT /ui/users/:id` — apply the edit form.
pub async fn update(
    State(core): State<Arc<CoreState>>,
    Path(id): Path<String>,
    Json(form): Json<EditUserForm>,
) -> Result<Json<FormOutcome>, UiError> {
    core.require_admin()?;
    Ok(Json(users::update_user(&core.backend, &id, &form).await))
}

/// `DELETE /ui/users/:id` — delete and return the refreshed roster.
pub async fn remove(
    State(core): State<Arc<CoreState>>,
    Path(id): Path<String>,
) -> Result<Json<UsersSnapshot>, UiError> {
    core.require_admin()?;
    let mut ctl = core.users.lock().await;
    ctl.delete(&core.backend, &id).await;
    Ok(Json(ctl.snapshot()))
}
