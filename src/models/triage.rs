//! Triage entities as the classification backend ships them.
//!
//! Wire field names are the backend's Portuguese ones; Rust field names are
//! ours. Two shapes exist on the wire: the full intake response and the
//! slimmer list row (which carries validation fields but no classification
//! fields).

use serde::{Deserialize, Serialize};

/// Manchester-protocol classification tag, parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Vermelho,
    Laranja,
    Amarelo,
    Verde,
    Azul,
}

impl Classification {
    /// Parse a backend tag. Unrecognized values yield `None` and are
    /// displayed as-is by `ClassificationView`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "vermelho" => Some(Self::Vermelho),
            "laranja" => Some(Self::Laranja),
            "amarelo" => Some(Self::Amarelo),
            "verde" => Some(Self::Verde),
            "azul" => Some(Self::Azul),
            _ => None,
        }
    }

    /// Severity label shown in the result header.
    pub fn severity_text(&self) -> &'static str {
        match self {
            Self::Vermelho => "EMERGÊNCIA (VERMELHO)",
            Self::Laranja => "MUITO URGENTE (LARANJA)",
            Self::Amarelo => "URGENTE (AMARELO)",
            Self::Verde => "POUCO URGENTE (VERDE)",
            Self::Azul => "NÃO URGENTE (AZUL)",
        }
    }

    /// CSS class the page styles the severity banner with.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Vermelho => "classification-red",
            Self::Laranja => "classification-orange",
            Self::Amarelo => "classification-yellow",
            Self::Verde => "classification-green",
            Self::Azul => "classification-blue",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Vermelho => "🔴",
            Self::Laranja => "🟠",
            Self::Amarelo => "🟡",
            Self::Verde => "🟢",
            Self::Azul => "🔵",
        }
    }
}

/// Render-ready classification payload.
///
/// Unknown tags pass through uppercased with empty class and emoji, so a
/// backend vocabulary change degrades to plain text instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationView {
    pub raw: String,
    pub text: String,
    pub css_class: String,
    pub emoji: String,
}

impl ClassificationView {
    pub fn from_raw(raw: &str) -> Self {
        match Classification::parse(raw) {
            Some(tag) => Self {
                raw: raw.to_string(),
                text: tag.severity_text().to_string(),
                css_class: tag.css_class().to_string(),
                emoji: tag.emoji().to_string(),
            },
            None => Self {
                raw: raw.to_string(),
                text: raw.to_uppercase(),
                css_class: String::new(),
                emoji: String::new(),
            },
        }
    }
}

/// Full response to an intake submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageOutcome {
    pub id: String,
    #[serde(rename = "sintomas")]
    pub symptoms: String,
    #[serde(rename = "resposta")]
    pub raw_response: String,
    #[serde(rename = "classificacao")]
    pub classification: String,
    #[serde(rename = "justificativa")]
    pub justification: String,
    #[serde(rename = "condutas")]
    pub conduct: String,
    #[serde(rename = "data_hora")]
    pub recorded_at: String,
}

/// Row of the triage listing. `validado` is a 0/1 integer on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRecord {
    pub id: String,
    #[serde(rename = "sintomas")]
    pub symptoms: String,
    #[serde(rename = "resposta")]
    pub raw_response: String,
    #[serde(rename = "data_hora")]
    pub recorded_at: String,
    #[serde(rename = "validado", default)]
    pub validated: i64,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(rename = "validado_por", default)]
    pub validated_by: Option<String>,
    #[serde(rename = "data_validacao", default)]
    pub validated_at: Option<String>,
    #[serde(rename = "classificacao", default)]
    pub classification: Option<String>,
    #[serde(rename = "justificativa", default)]
    pub justification: Option<String>,
    #[serde(rename = "condutas", default)]
    pub conduct: Option<String>,
}

impl TriageRecord {
    pub fn is_validated(&self) -> bool {
        self.validated == 1
    }
}

/// System-wide triage counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: i64,
    #[serde(rename = "validadas")]
    pub validated: i64,
    #[serde(rename = "pendentes")]
    pub pending: i64,
}

/// Listing filter, mapped to the `filtro` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageFilter {
    Pending,
    All,
}

impl TriageFilter {
    pub fn query_value(&self) -> &'static str {
        match self {
            Self::Pending => "pendentes",
            Self::All => "todas",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_parses_case_insensitively() {
        for (raw, tag) in [
            ("VERMELHO", Classification::Vermelho),
            ("Laranja", Classification::Laranja),
            ("amarelo", Classification::Amarelo),
            (" verde ", Classification::Verde),
            ("Azul", Classification::Azul),
        ] {
            assert_eq!(Classification::parse(raw), Some(tag));
        }
        assert_eq!(Classification::parse("roxo"), None);
        assert_eq!(Classification::parse(""), None);
    }

    #[test]
    fn uppercase_tag_maps_to_red_emergency() {
        let view = ClassificationView::from_raw("VERMELHO");
        assert_eq!(view.text, "EMERGÊNCIA (VERMELHO)");
        assert_eq!(view.css_class, "classification-red");
        assert_eq!(view.emoji, "🔴");
    }

    #[test]
    fn every_tag_has_distinct_display() {
        let views: Vec<ClassificationView> = ["vermelho", "laranja", "amarelo", "verde", "azul"]
            .iter()
            .map(|raw| ClassificationView::from_raw(raw))
            .collect();
        for pair in views.windows(2) {
            assert_ne!(pair[0].text, pair[1].text);
            assert_ne!(pair[0].css_class, pair[1].css_class);
        }
    }

    #[test]
    fn unknown_tag_passes_through_uppercased() {
        let view = ClassificationView::from_raw("indefinido");
        assert_eq!(view.text, "INDEFINIDO");
        assert!(view.css_class.is_empty());
        assert!(view.emoji.is_empty());
    }

    #[test]
    fn list_row_deserializes_without_classification_fields() {
        let json = r#"{
            "id": "abc-123",
            "sintomas": "febre e tosse",
            "resposta": "texto bruto",
            "data_hora": "2026-03-01 10:00:00",
            "validado": 0,
            "feedback": null,
            "validado_por": null,
            "data_validacao": null
        }"#;
        let record: TriageRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_validated());
        assert!(record.classification.is_none());
        assert_eq!(record.symptoms, "febre e tosse");
    }

    #[test]
    fn validated_flag_folds_from_integer() {
        let json = r#"{
            "id": "x",
            "sintomas": "s",
            "resposta": "r",
            "data_hora": "2026-03-01 10:00:00",
            "validado": 1,
            "feedback": "ok",
            "validado_por": "medico"
        }"#;
        let record: TriageRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_validated());
        assert_eq!(record.validated_by.as_deref(), Some("medico"));
    }

    #[test]
    fn statistics_read_portuguese_wire_names() {
        let stats: Statistics =
            serde_json::from_str(r#"{"total": 10, "validadas": 4, "pendentes": 6}"#).unwrap();
        assert_eq!(stats.total, 10);
        assert_eq!(stats.validated, 4);
        assert_eq!(stats.pending, 6);
    }

    #[test]
    fn filter_query_values() {
        assert_eq!(TriageFilter::Pending.query_value(), "pendentes");
        assert_eq!(TriageFilter::All.query_value(), "todas");
    }
}
