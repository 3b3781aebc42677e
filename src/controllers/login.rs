//! Admin login page.
//!
//! The backend verifies credentials and returns the operator's role; on
//! success the session slot is the only thing written. The surfaced
//! messages never distinguish which credential was wrong.

use crate::backend::BackendClient;
use crate::controllers::RemoteData;
use crate::models::Role;
use crate::session::{CurrentUser, SessionStore};

pub const MSG_FILL_ALL_FIELDS: &str = "Por favor, preencha todos os campos.";
pub const MSG_BAD_CREDENTIALS: &str = "Usuário ou senha inválidos.";
pub const MSG_LOGIN_FAILED: &str = "Erro ao realizar login. Por favor, tente novamente.";

#[derive(Default)]
pub struct LoginController {
    attempt: RemoteData<CurrentUser>,
}

impl LoginController {
    /// Authenticate against the backend and persist the session on success.
    pub async fn login(
        &mut self,
        backend: &BackendClient,
        session: &SessionStore,
        username: &str,
        password: &str,
    ) {
        if username.trim().is_empty() || password.trim().is_empty() {
            self.attempt.fail(MSG_FILL_ALL_FIELDS);
            return;
        }
        if !self.attempt.begin() {
            return;
        }

        match backend.login(username, password).await {
            Ok(reply) if reply.success => {
                let role = reply.role.as_deref().and_then(Role::parse);
                match role {
                    Some(role) => {
                        let user = CurrentUser {
                            username: reply.user.unwrap_or_else(|| username.to_string()),
                            role,
                        };
                        tracing::info!(username = %user.username, role = role.as_str(), "Login succeeded");
                        session.set(user.clone());
                        self.attempt.resolve(user);
                    }
                    None => {
                        tracing::warn!(role = ?reply.role, "Login reply carried no usable role");
                        self.attempt.fail(MSG_LOGIN_FAILED);
                    }
                }
            }
            Ok(reply) => {
                tracing::debug!(message = ?reply.message, "Login refused");
                self.attempt.fail(MSG_BAD_CREDENTIALS);
            }
            Err(e) => {
                tracing::error!(error = %e, "Login request failed");
                self.attempt.fail(MSG_LOGIN_FAILED);
            }
        }
    }

    /// Drop the session and reset the page.
    pub fn logout(&mut self, session: &SessionStore) {
        session.clear();
        self.attempt = RemoteData::Idle;
        tracing::info!("Logged out");
    }

    pub fn snapshot(&self) -> RemoteData<CurrentUser> {
        self.attempt.clone()
    }
}
