//! Session gate — the single persisted current-user slot.
//!
//! Presence of a user here is the only signal the admin pages check before
//! rendering; absence sends the browser to the login route. This is a UI
//! gate, not a security boundary — the backend verifies credentials and
//! role at login, and this slot just remembers the outcome across reloads.
//!
//! No operation in this module returns an error to its caller. A missing
//! session is a normal branch, and persistence failures are logged and
//! swallowed while the in-memory slot stays authoritative.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// The logged-in operator, as verified by the backend at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Greeting form of the login name ("medico" → "Medico").
    pub fn display_name(&self) -> String {
        let mut chars = self.username.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// One reload-surviving slot holding the active session, backed by a JSON
/// file under the app data directory.
pub struct SessionStore {
    path: PathBuf,
    slot: RwLock<Option<CurrentUser>>,
}

impl SessionStore {
    /// Open the store, loading any persisted session. Unreadable or
    /// malformed files count as "no session".
    pub fn open(path: PathBuf) -> Self {
        let slot = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<CurrentUser>(&raw) {
                Ok(user) => {
                    tracing::debug!(username = %user.username, "Session restored from disk");
                    Some(user)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed session file");
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            path,
            slot: RwLock::new(slot),
        }
    }

    /// The active session, if any.
    pub fn get(&self) -> Option<CurrentUser> {
        self.slot.read().ok().and_then(|guard| guard.clone())
    }

    /// Set the active session (login) and persist it.
    pub fn set(&self, user: CurrentUser) {
        if let Ok(mut guard) = self.slot.write() {
            *guard = Some(user.clone());
        }
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string(&user) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::warn!(error = %e, "Failed to persist session");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize session"),
        }
    }

    /// Clear the active session (logout) and remove the persisted file.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.slot.write() {
            *guard = None;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %e, "Failed to remove session file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open(dir.path().join("session.json"))
    }

    fn medico() -> CurrentUser {
        CurrentUser {
            username: "medico".into(),
            role: Role::Medico,
        }
    }

    #[test]
    fn fresh_store_has_no_session() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).get().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set(medico());
        assert_eq!(store.get(), Some(medico()));
    }

    #[test]
    fn session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        SessionStore::open(path.clone()).set(medico());

        let reopened = SessionStore::open(path);
        assert_eq!(reopened.get(), Some(medico()));
    }

    #[test]
    fn clear_removes_slot_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::open(path.clone());
        store.set(medico());
        store.clear();

        assert!(store.get().is_none());
        assert!(!path.exists());
        // Clearing again is a no-op, not an error.
        store.clear();
    }

    #[test]
    fn malformed_file_counts_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(SessionStore::open(path).get().is_none());
    }

    #[test]
    fn admin_check_uses_role_not_name() {
        let imposter = CurrentUser {
            username: "admin".into(),
            role: Role::Enfermeiro,
        };
        assert!(!imposter.is_admin());

        let real = CurrentUser {
            username: "chefe".into(),
            role: Role::Admin,
        };
        assert!(real.is_admin());
    }

    #[test]
    fn display_name_capitalizes_first_letter() {
        assert_eq!(medico().display_name(), "Medico");
        let empty = CurrentUser {
            username: String::new(),
            role: Role::Admin,
        };
        assert_eq!(empty.display_name(), "");
    }
}
