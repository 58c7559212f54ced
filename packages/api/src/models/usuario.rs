use serde::{Deserialize, Serialize};

/// An operator account, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: String,
    pub email: String,
    pub nome: String,
    pub ativo: bool,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriarContaRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub confirmar_senha: String,
}

/// Successful login / registration response. The token is a JWT whose `exp`
/// claim mirrors `expires_in` (seconds from issue).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub usuario: Usuario,
    pub expires_in: i64,
}

/// Partial profile update for `PUT /auth/perfil`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerfilUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
