//! User administration — roster page plus the create/edit form flows.
//!
//! The roster is page state; the create and edit forms are per-submission
//! flows whose outcome goes straight back to the form. All form rules run
//! before any network call, and a blank edit password means "keep the
//! current one" — the payload never carries an empty-string overwrite.

use serde::{Deserialize, Serialize};

use crate::backend::{BackendClient, BackendError};
use crate::controllers::{Notice, RemoteData};
use crate::models::{user, NewUser, Role, User, UserUpdate};

pub const MSG_USERS_LOAD_FAILED: &str =
    "Erro ao carregar usuários. Por favor, tente novamente.";
pub const MSG_USER_DELETE_FAILED: &str =
    "Erro ao excluir usuário. Por favor, tente novamente.";
pub const MSG_USER_CREATE_FAILED: &str =
    "Erro ao cadastrar usuário. Por favor, tente novamente.";
pub const MSG_USER_UPDATE_FAILED: &str =
    "Erro ao atualizar usuário. Por favor, tente novamente.";
pub const MSG_USER_FETCH_FAILED: &str = "Erro ao carregar dados do usuário";
pub const MSG_USER_NOT_FOUND: &str = "Usuário não encontrado";
pub const MSG_INVALID_ROLE: &str = "Por favor, selecione uma função válida.";

/// Roster page controller.
#[derive(Default)]
pub struct UsersController {
    roster: RemoteData<Vec<User>>,
    notice: Option<Notice>,
}

/// Serializable roster page state.
#[derive(Debug, Clone, Serialize)]
pub struct UsersSnapshot {
    pub roster: RemoteData<Vec<User>>,
    pub notice: Option<Notice>,
}

impl UsersController {
    /// (Re)fetch the roster.
    pub async fn load(&mut self, backend: &BackendClient) {
        if !self.roster.begin() {
            return;
        }
        match backend.list_users().await {
            Ok(users) => {
                self.notice = None;
                self.roster.resolve(users);
            }
            Err(e) => {
                tracing::error!(error = %e, "User roster load failed");
                self.roster.fail(MSG_USERS_LOAD_FAILED);
            }
        }
    }

    /// Delete a user, then re-fetch the roster on success.
    pub async fn delete(&mut self, backend: &BackendClient, id: &str) {
        match backend.delete_user(id).await {
            Ok(ack) if ack.success => {
                tracing::info!(id, "User deleted");
                self.load(backend).await;
            }
            Ok(ack) => {
                self.notice = Some(Notice::error(
                    ack.message.unwrap_or_else(|| MSG_USER_DELETE_FAILED.into()),
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, id, "User deletion failed");
                self.notice = Some(Notice::error(MSG_USER_DELETE_FAILED));
            }
        }
    }

    pub fn snapshot(&self) -> UsersSnapshot {
        UsersSnapshot {
            roster: self.roster.clone(),
            notice: self.notice.clone(),
        }
    }
}

// ── Form flows ──────────────────────────────────────────────

/// User-creation form as the page submits it.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserForm {
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    pub email: String,
    pub role: String,
}

/// User-edit form as the page submits it. Blank password keeps the current.
#[derive(Debug, Clone, Deserialize)]
pub struct EditUserForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    pub role: String,
    pub active: bool,
}

/// Per-submission outcome handed back to a form page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl FormOutcome {
    fn ok(message: Option<String>) -> Self {
        Self {
            success: true,
            message,
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Validate and submit the creation form. Validation failures return
/// without any network call.
pub async fn create_user(backend: &BackendClient, form: &NewUserForm) -> FormOutcome {
    if let Err(message) = user::validate_new_user(
        &form.name,
        &form.username,
        &form.password,
        &form.confirm_password,
        &form.email,
    ) {
        return FormOutcome::rejected(message);
    }
    let Some(role) = Role::parse(&form.role) else {
        return FormOutcome::rejected(MSG_INVALID_ROLE);
    };

    let payload = NewUser {
        name: form.name.clone(),
        username: form.username.clone(),
        password: form.password.clone(),
        email: form.email.clone(),
        role,
    };
    match backend.create_user(&payload).await {
        Ok(ack) if ack.success => {
            tracing::info!(username = %form.username, "User created");
            FormOutcome::ok(ack.message)
        }
        Ok(ack) => FormOutcome::rejected(
            ack.message.unwrap_or_else(|| MSG_USER_CREATE_FAILED.into()),
        ),
        Err(e) => {
            tracing::error!(error = %e, "User creation failed");
            FormOutcome::rejected(backend_message(&e, MSG_USER_CREATE_FAILED))
        }
    }
}

/// Load one user for the edit form.
pub async fn fetch_user(backend: &BackendClient, id: &str) -> Result<User, String> {
    match backend.get_user(id).await {
        Ok(reply) => match reply.user {
            Some(user) if reply.success => Ok(user),
            _ => Err(reply.message.unwrap_or_else(|| MSG_USER_NOT_FOUND.into())),
        },
        Err(e) => {
            tracing::error!(error = %e, id, "User fetch failed");
            Err(MSG_USER_FETCH_FAILED.into())
        }
    }
}

/// Validate and submit the edit form.
pub async fn update_user(backend: &BackendClient, id: &str, form: &EditUserForm) -> FormOutcome {
    if let Err(message) = user::validate_user_update(
        &form.name,
        &form.email,
        &form.password,
        &form.confirm_password,
    ) {
        return FormOutcome::rejected(message);
    }
    let Some(role) = Role::parse(&form.role) else {
        return FormOutcome::rejected(MSG_INVALID_ROLE);
    };

    let payload = UserUpdate {
        name: form.name.clone(),
        email: form.email.clone(),
        password: UserUpdate::password_from_form(&form.password),
        role,
        active: form.active,
    };
    match backend.update_user(id, &payload).await {
        Ok(ack) if ack.success => {
            tracing::info!(id, "User updated");
            FormOutcome::ok(ack.message)
        }
        Ok(ack) => FormOutcome::rejected(
            ack.message.unwrap_or_else(|| MSG_USER_UPDATE_FAILED.into()),
        ),
        Err(e) => {
            tracing::error!(error = %e, id, "User update failed");
            FormOutcome::rejected(backend_message(&e, MSG_USER_UPDATE_FAILED))
        }
    }
}

/// Prefer the backend's `detail` message when it sent one.
fn backend_message(error: &BackendError, fallback: &str) -> String {
    error.detail().unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn user_json(id: &str, username: &str) -> Value {
        json!({
            "id": id,
            "nome": "Pessoa Demonstração",
            "username": username,
            "email": format!("{username}@hci.org.br"),
            "role": "enfermeiro",
            "data_criacao": "2026-01-10 08:00:00",
            "ativo": true
        })
    }

    #[tokio::test]
    async fn roster_loads_and_reloads_after_delete() {
        let deleted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&deleted);
        let app = Router::new()
            .route(
                "/api/usuarios",
                get(|| async { Json(json!({"usuarios": [user_json("u-1", "ana"), user_json("u-2", "beto")]})) }),
            )
            .route(
                "/api/usuarios/:id",
                delete(move |Path(id): Path<String>| {
                    let counter = Arc::clone(&counter);
                    async move {
                        assert_eq!(id, "u-2");
                        counter.fetch_add(1, Ordering::SeqCst);
                        Json(json!({"success": true, "message": "Usuário excluído com sucesso"}))
                    }
                }),
            );
        let base = serve(app).await;
        let backend = BackendClient::new(&base);

        let mut ctl = UsersController::default();
        ctl.load(&backend).await;
        assert_eq!(ctl.snapshot().roster.data().unwrap().len(), 2);

        ctl.delete(&backend, "u-2").await;
        assert_eq!(deleted.load(Ordering::SeqCst), 1);
        assert!(ctl.snapshot().roster.is_ready());
        assert!(ctl.snapshot().notice.is_none());
    }

    #[tokio::test]
    async fn roster_failure_surfaces_retry_message() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let mut ctl = UsersController::default();
        ctl.load(&BackendClient::new(&base)).await;
        assert_eq!(
            ctl.snapshot().roster,
            RemoteData::Failed {
                message: MSG_USERS_LOAD_FAILED.into()
            },
        );
    }

    #[tokio::test]
    async fn refused_delete_keeps_roster_and_shows_backend_message() {
        let app = Router::new()
            .route(
                "/api/usuarios",
                get(|| async { Json(json!({"usuarios": [user_json("u-1", "ana")]})) }),
            )
            .route(
                "/api/usuarios/:id",
                delete(|| async { Json(json!({"success": false, "message": "Usuário não encontrado"})) }),
            );
        let base = serve(app).await;
        let backend = BackendClient::new(&base);

        let mut ctl = UsersController::default();
        ctl.load(&backend).await;
        ctl.delete(&backend, "u-9").await;

        let snap = ctl.snapshot();
        assert_eq!(snap.roster.data().unwrap().len(), 1);
        assert_eq!(snap.notice, Some(Notice::error("Usuário não encontrado")));
    }

    fn valid_form() -> NewUserForm {
        NewUserForm {
            name: "Nova Pessoa".into(),
            username: "nova".into(),
            password: "senha123".into(),
            confirm_password: "senha123".into(),
            email: "nova@hci.org.br".into(),
            role: "recepcionista".into(),
        }
    }

    #[tokio::test]
    async fn invalid_create_form_never_reaches_the_network() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let app = Router::new().route(
            "/api/usuarios",
            post(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"success": true, "message": "ok"}))
                }
            }),
        );
        let base = serve(app).await;
        let backend = BackendClient::new(&base);

        let mut form = valid_form();
        form.confirm_password = "outra".into();
        let outcome = create_user(&backend, &form).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("As senhas não coincidem."));

        let mut form = valid_form();
        form.email = "sem-arroba".into();
        assert!(!create_user(&backend, &form).await.success);

        let mut form = valid_form();
        form.role = "gestor".into();
        assert_eq!(
            create_user(&backend, &form).await.message.as_deref(),
            Some(MSG_INVALID_ROLE),
        );

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_surfaces_backend_detail_on_conflict() {
        let app = Router::new().route(
            "/api/usuarios",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Nome de usuário já existe"})),
                )
            }),
        );
        let base = serve(app).await;

        let outcome = create_user(&BackendClient::new(&base), &valid_form()).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Nome de usuário já existe"));
    }

    #[tokio::test]
    async fn fetch_user_distinguishes_missing_from_transport_failure() {
        let app = Router::new().route(
            "/api/usuarios/:id",
            get(|| async { Json(json!({"success": false, "message": "Usuário não encontrado"})) }),
        );
        let base = serve(app).await;
        let err = fetch_user(&BackendClient::new(&base), "u-404").await.unwrap_err();
        assert_eq!(err, MSG_USER_NOT_FOUND);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let err = fetch_user(&BackendClient::new(&base), "u-1").await.unwrap_err();
        assert_eq!(err, MSG_USER_FETCH_FAILED);
    }

    #[tokio::test]
    async fn update_with_blank_password_omits_the_key() {
        let seen = Arc::new(std::sync::Mutex::new(None::<Value>));
        let sink = Arc::clone(&seen);
        let app = Router::new().route(
            "/api/usuarios/:id",
            put(move |Json(body): Json<Value>| {
                let sink = Arc::clone(&sink);
                async move {
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({"success": true, "message": "Usuário atualizado com sucesso"}))
                }
            }),
        );
        let base = serve(app).await;

        let form = EditUserForm {
            name: "Ana Souza".into(),
            email: "ana@hci.org.br".into(),
            password: String::new(),
            confirm_password: String::new(),
            role: "medico".into(),
            active: true,
        };
        let outcome = update_user(&BackendClient::new(&base), "u-1", &form).await;
        assert!(outcome.success);

        let body = seen.lock().unwrap().clone().unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["nome"], "Ana Souza");
        assert_eq!(body["role"], "medico");
    }

    #[tokio::test]
    async fn update_password_mismatch_is_rejected_client_side() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let form = EditUserForm {
            name: "Ana".into(),
            email: "ana@hci.org.br".into(),
            password: "nova".into(),
            confirm_password: "diferente".into(),
            role: "medico".into(),
            active: true,
        };
        // Backend is unreachable — rejection must come from validation,
        // not from a failed request.
        let outcome = update_user(&BackendClient::new(&base), "u-1", &form).await;
        assert_eq!(outcome.message.as_deref(), Some("As senhas não coincidem."));
    }
}
