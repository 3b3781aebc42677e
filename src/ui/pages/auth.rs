//! Login, logout, and the session probe the admin pages gate on.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::controllers::RemoteData;
use crate::core_state::CoreState;
use crate::session::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionReply {
    pub user: Option<CurrentUser>,
}

/// `POST /ui/login`.
pub async fn login(
    State(core): State<Arc<CoreState>>,
    Json(form): Json<LoginForm>,
) -> Json<RemoteData<CurrentUser>> {
    let mut ctl = core.login.lock().await;
    ctl.login(&core.backend, &core.session, &form.username, &form.password)
        .await;
    Json(ctl.snapshot())
}

/// `POST /ui/logout` — clears the session slot.
pub async fn logout(State(core): State<Arc<CoreState>>) -> Json<SessionReply> {
    core.login.lock().await.logout(&core.session);
    Json(SessionReply { user: None })
}

/// `GET /ui/session` — the persisted session, if any. Admin pages call
/// this on mount and navigate to the login route when `user` is null.
pub async fn session(State(core): State<Arc<CoreState>>) -> Json<SessionReply> {
    Json(SessionReply {
        user: core.session.get(),
    })
}
