//! Page controllers — one per screen, all built on the same remote-data
//! cell.
//!
//! Every screen follows the same cycle: an action enters `Loading`, the
//! backend call resolves to `Ready` or `Failed`, and `Failed` keeps a retry
//! affordance. `RemoteData` is that cycle factored out once; controllers
//! hold one cell per fetched resource plus whatever sub-state their page
//! needs.

pub mod dashboard;
pub mod intake;
pub mod login;
pub mod users;

use serde::Serialize;

/// State of one remotely-fetched resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RemoteData<T> {
    /// Nothing fetched yet.
    Idle,
    /// A request is outstanding; duplicate submissions are suppressed.
    Loading,
    Ready { data: T },
    /// The request failed; `message` is the user-facing notice and the
    /// page keeps its retry affordance.
    Failed { message: String },
}

impl<T> RemoteData<T> {
    /// Enter `Loading`. Returns `false` (and changes nothing) when a
    /// request is already outstanding — the duplicate-submission guard.
    pub fn begin(&mut self) -> bool {
        if matches!(self, Self::Loading) {
            return false;
        }
        *self = Self::Loading;
        true
    }

    pub fn resolve(&mut self, data: T) {
        *self = Self::Ready { data };
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Self::Failed {
            message: message.into(),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready { data } => Some(data),
            _ => None,
        }
    }
}

impl<T> Default for RemoteData<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Modal notice shown over a page after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}
