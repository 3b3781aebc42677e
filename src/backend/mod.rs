//! HTTP client for the remote triage backend.
//!
//! One method per endpoint, one outbound request per call. Nothing here
//! retries, caches, or deduplicates — a page action that fires twice sends
//! two requests, exactly as the pages intend. Only a connect timeout is
//! configured; requests otherwise run on the transport default.
//!
//! HTTP 503 gets its own error variant because the intake page must tell
//! "the classification engine is down" apart from every other failure.

pub mod types;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::models::{NewUser, Statistics, TriageFilter, TriageOutcome, TriageRecord, User, UserUpdate};

use types::{
    Ack, LoginReply, LoginRequest, ServiceStatus, TriageListReply, TriageRequest, UserDetailReply,
    UsersReply, ValidationRequest,
};

/// Errors from backend calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend answered 503: the classification engine (or one of its
    /// services) is down. Distinct from every other failure by contract.
    #[error("Triage service unavailable: {0}")]
    ServiceUnavailable(String),
    /// The backend could not be reached at all.
    #[error("Cannot reach triage service: {0}")]
    Connection(String),
    /// Any other non-2xx answer.
    #[error("Triage service returned HTTP {status}")]
    Status { status: u16, body: String },
    /// 2xx answer with a body we could not decode.
    #[error("Unexpected response from triage service: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_))
    }

    /// The backend's `{"detail": ...}` message from an error body, if any.
    pub fn detail(&self) -> Option<String> {
        let body = match self {
            Self::ServiceUnavailable(body) | Self::Status { body, .. } => body,
            _ => return None,
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("detail")?.as_str().map(str::to_string)
    }
}

/// Client for the triage backend REST API.
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Client pointed at the configured backend (`AMPARO_BACKEND_URL`).
    pub fn from_env() -> Self {
        Self::new(&config::backend_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Endpoints ───────────────────────────────────────────

    /// POST `/api/login`. Bad credentials come back as a normal reply with
    /// `success=false`; only transport problems are errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginReply, BackendError> {
        let url = format!("{}/api/login", self.base_url);
        let body = LoginRequest { username, password };
        self.post_json(&url, &body).await
    }

    /// POST `/api/triagem` — synchronous classification of a symptom text.
    pub async fn submit_triage(&self, symptoms: &str) -> Result<TriageOutcome, BackendError> {
        let url = format!("{}/api/triagem", self.base_url);
        let body = TriageRequest { symptoms };
        self.post_json(&url, &body).await
    }

    /// GET `/api/estatisticas` — validated/pending counts.
    pub async fn statistics(&self) -> Result<Statistics, BackendError> {
        let url = format!("{}/api/estatisticas", self.base_url);
        self.get_json(&url).await
    }

    /// GET `/api/triagens?filtro=…` — triage listing, newest first.
    pub async fn list_triages(
        &self,
        filter: TriageFilter,
    ) -> Result<Vec<TriageRecord>, BackendError> {
        let url = format!(
            "{}/api/triagens?filtro={}",
            self.base_url,
            filter.query_value(),
        );
        let reply: TriageListReply = self.get_json(&url).await?;
        Ok(reply.triages)
    }

    /// POST `/api/validar` — record a specialist validation.
    pub async fn validate_triage(
        &self,
        triage_id: &str,
        validated_by: &str,
        feedback: &str,
    ) -> Result<Ack, BackendError> {
        let url = format!("{}/api/validar", self.base_url);
        let body = ValidationRequest {
            triage_id,
            validated_by,
            feedback,
        };
        self.post_json(&url, &body).await
    }

    /// GET `/api/usuarios`.
    pub async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        let url = format!("{}/api/usuarios", self.base_url);
        let reply: UsersReply = self.get_json(&url).await?;
        Ok(reply.users)
    }

    /// GET `/api/usuarios/{id}`.
    pub async fn get_user(&self, id: &str) -> Result<UserDetailReply, BackendError> {
        let url = format!("{}/api/usuarios/{id}", self.base_url);
        self.get_json(&url).await
    }

    /// POST `/api/usuarios`.
    pub async fn create_user(&self, user: &NewUser) -> Result<Ack, BackendError> {
        let url = format!("{}/api/usuarios", self.base_url);
        self.post_json(&url, user).await
    }

    /// PUT `/api/usuarios/{id}`. A blank form password never reaches the
    /// wire — `UserUpdate` omits the key entirely.
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<Ack, BackendError> {
        let url = format!("{}/api/usuarios/{id}", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(response).await
    }

    /// DELETE `/api/usuarios/{id}`.
    pub async fn delete_user(&self, id: &str) -> Result<Ack, BackendError> {
        let url = format!("{}/api/usuarios/{id}", self.base_url);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(response).await
    }

    /// GET `/api/status` — backend component availability.
    pub async fn status(&self) -> Result<ServiceStatus, BackendError> {
        let url = format!("{}/api/status", self.base_url);
        self.get_json(&url).await
    }

    // ── Shared plumbing ─────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, BackendError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(response).await
    }

    fn transport_error(&self, e: reqwest::Error) -> BackendError {
        BackendError::Connection(format!("{}: {e}", self.base_url))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::ServiceUnavailable(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}
