//! User records and the admin CRUD payloads.
//!
//! Passwords are write-only: they appear in outbound payloads, never in
//! anything stored or displayed, and a blank password on update means
//! "keep the current one" — the key is omitted from the payload entirely.

use serde::{Deserialize, Serialize};

/// Access role, verified by the backend at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Medico,
    Enfermeiro,
    Recepcionista,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Medico => "medico",
            Self::Enfermeiro => "enfermeiro",
            Self::Recepcionista => "recepcionista",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "medico" => Some(Self::Medico),
            "enfermeiro" => Some(Self::Enfermeiro),
            "recepcionista" => Some(Self::Recepcionista),
            _ => None,
        }
    }

    /// Badge label shown on the user roster.
    pub fn badge_label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Medico => "Médico",
            Self::Enfermeiro => "Enfermeiro",
            Self::Recepcionista => "Recepcionista",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "data_criacao", default)]
    pub created_at: Option<String>,
    #[serde(rename = "ativo")]
    pub active: bool,
}

/// Creation payload. All fields required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(rename = "nome")]
    pub name: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: Role,
}

/// Update payload. A `None` password is omitted from the JSON body, so the
/// backend never receives an empty-string overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    #[serde(rename = "ativo")]
    pub active: bool,
}

impl UserUpdate {
    /// Normalize a form password: blank means "keep current".
    pub fn password_from_form(value: &str) -> Option<String> {
        if value.trim().is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

// ── Form validation (shared by the create and edit pages) ───

/// First failing rule of the user-creation form, as the inline notice text.
pub fn validate_new_user(
    name: &str,
    username: &str,
    password: &str,
    confirm: &str,
    email: &str,
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Por favor, informe o nome completo.".into());
    }
    if username.trim().is_empty() {
        return Err("Por favor, informe o nome de usuário.".into());
    }
    if password.trim().is_empty() {
        return Err("Por favor, informe uma senha.".into());
    }
    if password != confirm {
        return Err("As senhas não coincidem.".into());
    }
    if !is_plausible_email(email) {
        return Err("Por favor, informe um email válido.".into());
    }
    Ok(())
}

/// First failing rule of the user-edit form. Password is optional here and
/// only checked against its confirmation when present.
pub fn validate_user_update(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Por favor, informe o nome completo.".into());
    }
    if !is_plausible_email(email) {
        return Err("Por favor, informe um email válido.".into());
    }
    if !password.is_empty() && password != confirm {
        return Err("As senhas não coincidem.".into());
    }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    !email.trim().is_empty() && email.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for (role, s) in [
            (Role::Admin, "admin"),
            (Role::Medico, "medico"),
            (Role::Enfermeiro, "enfermeiro"),
            (Role::Recepcionista, "recepcionista"),
        ] {
            assert_eq!(role.as_str(), s);
            assert_eq!(Role::parse(s), Some(role));
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{s}\""));
        }
        assert_eq!(Role::parse("gestor"), None);
    }

    #[test]
    fn user_deserializes_portuguese_wire_names() {
        let json = r#"{
            "id": "u-1",
            "nome": "Médico Demonstração",
            "username": "medico",
            "email": "medico@hci.org.br",
            "role": "medico",
            "data_criacao": "2026-01-10 08:00:00",
            "ativo": true
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Médico Demonstração");
        assert_eq!(user.role, Role::Medico);
        assert!(user.active);
    }

    #[test]
    fn blank_password_is_omitted_from_update_payload() {
        let update = UserUpdate {
            name: "Ana".into(),
            email: "ana@hci.org.br".into(),
            password: UserUpdate::password_from_form("   "),
            role: Role::Enfermeiro,
            active: true,
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(!json.contains("password"));
    }

    #[test]
    fn set_password_is_sent_in_update_payload() {
        let update = UserUpdate {
            name: "Ana".into(),
            email: "ana@hci.org.br".into(),
            password: UserUpdate::password_from_form("nova-senha"),
            role: Role::Enfermeiro,
            active: false,
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"password\":\"nova-senha\""));
        assert!(json.contains("\"ativo\":false"));
    }

    #[test]
    fn new_user_form_rules_fire_in_order() {
        assert!(validate_new_user("", "u", "p", "p", "a@b").is_err());
        assert!(validate_new_user("Nome", " ", "p", "p", "a@b").is_err());
        assert!(validate_new_user("Nome", "u", " ", " ", "a@b").is_err());
        assert_eq!(
            validate_new_user("Nome", "u", "p1", "p2", "a@b"),
            Err("As senhas não coincidem.".to_string()),
        );
        assert!(validate_new_user("Nome", "u", "p", "p", "sem-arroba").is_err());
        assert!(validate_new_user("Nome", "u", "p", "p", "a@b").is_ok());
    }

    #[test]
    fn edit_form_allows_blank_password() {
        assert!(validate_user_update("Nome", "a@b", "", "").is_ok());
        assert!(validate_user_update("Nome", "a@b", "x", "y").is_err());
        assert!(validate_user_update("Nome", "a@b", "x", "x").is_ok());
    }
}
