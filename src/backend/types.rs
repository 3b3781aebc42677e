//! Request/response bodies of the triage backend, verbatim wire names.

use serde::{Deserialize, Serialize};

use crate::models::{TriageRecord, User};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login outcome. `success=false` carries the refusal in `message`; on
/// success `user` and `role` identify the verified operator.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TriageRequest<'a> {
    #[serde(rename = "sintomas")]
    pub symptoms: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TriageListReply {
    #[serde(rename = "triagens")]
    pub triages: Vec<TriageRecord>,
}

#[derive(Debug, Serialize)]
pub struct ValidationRequest<'a> {
    #[serde(rename = "triagem_id")]
    pub triage_id: &'a str,
    #[serde(rename = "validado_por")]
    pub validated_by: &'a str,
    pub feedback: &'a str,
}

/// Generic `{success, message}` acknowledgement; user creation also
/// returns the new record id.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsersReply {
    #[serde(rename = "usuarios")]
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct UserDetailReply {
    pub success: bool,
    #[serde(rename = "usuario", default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Component availability report from `/api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub api: String,
    #[serde(default)]
    pub embedding_service: Option<String>,
    #[serde(default)]
    pub ollama_service: Option<String>,
    #[serde(default)]
    pub chromadb: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub ollama_available: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}
