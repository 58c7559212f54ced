use serde::{Deserialize, Serialize};

/// A named vaccine product registered in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacina {
    pub id: String,
    pub nome: String,
}

/// Create payload for a vaccine (`id` is server-assigned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovaVacina {
    pub nome: String,
}

/// Partial update for a vaccine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VacinaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
}
