use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded administration of a vaccine dose to a person.
///
/// `vacina_nome` / `pessoa_nome` are denormalized display conveniences the
/// server may or may not include; they are never authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacinacao {
    pub id: String,
    pub pessoa_id: String,
    pub vacina_id: String,
    pub dose: u32,
    pub data_aplicacao: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacina_nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pessoa_nome: Option<String>,
}

/// Create payload for a vaccination event (`id` is server-assigned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaVacinacao {
    pub pessoa_id: String,
    pub vacina_id: String,
    pub dose: u32,
    pub data_aplicacao: DateTime<Utc>,
}

/// Partial update for a vaccination event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VacinacaoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pessoa_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacina_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_aplicacao: Option<DateTime<Utc>>,
}
