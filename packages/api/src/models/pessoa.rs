use serde::{Deserialize, Serialize};

/// Sex options accepted by the registry. Serialized as the exact
/// Portuguese labels the API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sexo {
    Masculino,
    Feminino,
    Outro,
}

impl Sexo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sexo::Masculino => "Masculino",
            Sexo::Feminino => "Feminino",
            Sexo::Outro => "Outro",
        }
    }

    /// Parse a form value back into a variant.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Masculino" => Some(Sexo::Masculino),
            "Feminino" => Some(Sexo::Feminino),
            "Outro" => Some(Sexo::Outro),
            _ => None,
        }
    }
}

/// A registered person eligible for vaccination tracking.
///
/// `documento` uniqueness is enforced server-side; the client only reacts to
/// the 409 the server answers with on a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pessoa {
    pub id: String,
    pub nome: String,
    pub idade: u32,
    pub sexo: Sexo,
    pub documento: String,
}

/// Create payload for a person (`id` is server-assigned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovaPessoa {
    pub nome: String,
    pub idade: u32,
    pub sexo: Sexo,
    pub documento: String,
}

/// Partial update for a person; omitted fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PessoaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sexo: Option<Sexo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documento: Option<String>,
}
