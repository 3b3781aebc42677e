//! Shared application state.
//!
//! One `CoreState` is built at startup and shared via `Arc` with every UI
//! endpoint. It owns the session slot, the backend client, and the page
//! controllers. Controllers sit behind `tokio` mutexes because their
//! methods hold state across backend awaits; the session slot uses its own
//! internal lock and is read on every gated request.

use tokio::sync::Mutex;

use crate::backend::BackendClient;
use crate::config;
use crate::controllers::dashboard::DashboardController;
use crate::controllers::intake::IntakeController;
use crate::controllers::login::LoginController;
use crate::controllers::users::UsersController;
use crate::session::{CurrentUser, SessionStore};

/// Gate failures. Not errors in any operational sense — they route the
/// browser back to the login page.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No active session")]
    NoActiveSession,
    #[error("Administrator role required")]
    NotAdmin,
}

pub struct CoreState {
    pub session: SessionStore,
    pub backend: BackendClient,
    pub intake: Mutex<IntakeController>,
    pub login: Mutex<LoginController>,
    pub dashboard: Mutex<DashboardController>,
    pub users: Mutex<UsersController>,
}

impl CoreState {
    /// State wired to the configured backend and session file.
    pub fn new() -> Self {
        Self::with(
            BackendClient::from_env(),
            SessionStore::open(config::session_file()),
        )
    }

    /// State over explicit collaborators. Tests use this with a mock
    /// backend and a scratch session file.
    pub fn with(backend: BackendClient, session: SessionStore) -> Self {
        Self {
            session,
            backend,
            intake: Mutex::new(IntakeController::default()),
            login: Mutex::new(LoginController::default()),
            dashboard: Mutex::new(DashboardController::default()),
            users: Mutex::new(UsersController::default()),
        }
    }

    /// Session gate for admin pages: the current user, or a redirect to
    /// the login route. Runs on every admin request.
    pub fn require_session(&self) -> Result<CurrentUser, CoreError> {
        self.session.get().ok_or(CoreError::NoActiveSession)
    }

    /// Admin gate for user management: `require_session` plus the role
    /// check. A UI convenience only — the backend authorizes for real.
    pub fn require_admin(&self) -> Result<CurrentUser, CoreError> {
        let user = self.require_session()?;
        if !user.is_admin() {
            return Err(CoreError::NotAdmin);
        }
        Ok(user)
    }
}
