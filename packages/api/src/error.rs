//! # Error normalization at the transport boundary
//!
//! Every remote-call failure is collapsed into an [`ApiError`] before it
//! reaches store logic or views, so raw transport errors never leak through.
//! The two variants match the two ways a request can fail:
//!
//! | Variant | Meaning | Message |
//! |---------|---------|---------|
//! | [`ApiError::Client`] | The request never produced a response (DNS failure, refused connection, aborted fetch) | `"Erro: <detail>"` |
//! | [`ApiError::Server`] | The server answered with an error status | A fixed message keyed by status and [`Resource`] |
//!
//! The status tables reproduce what the registry's operators are used to
//! reading: a 409 on `/Vacinas` means a duplicate name, on `/Vacinacao` a
//! duplicate dose, on `/auth` an email already in use, and so on. Anything
//! outside the known statuses degrades to `"Erro {status}"`.

use thiserror::Error;

/// Which endpoint group a request touched; selects the message table.
/// Variants mirror the API path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Pessoas,
    Vacinas,
    Vacinacoes,
    Auth,
}

/// Normalized remote-call failure. The `Display` text is the only thing the
/// UI ever shows for a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport-level failure: no response reached the client.
    #[error("Erro: {message}")]
    Client { message: String },
    /// The server rejected the request with an error status.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    pub fn client(detail: impl Into<String>) -> Self {
        ApiError::Client {
            message: detail.into(),
        }
    }

    pub fn server(resource: Resource, status: u16) -> Self {
        ApiError::Server {
            status,
            message: status_message(resource, status),
        }
    }

    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Client { .. } => None,
            ApiError::Server { status, .. } => Some(*status),
        }
    }
}

fn status_message(resource: Resource, status: u16) -> String {
    let fixed = match (resource, status) {
        (Resource::Auth, 400) => "Dados inválidos",
        (_, 400) => "Dados inválidos enviados para o servidor",
        (Resource::Auth, 401) => "Email ou senha incorretos",
        (_, 401) => "Não autorizado",
        (_, 403) => "Acesso negado",
        (Resource::Pessoas, 404) => "Pessoa não encontrada",
        (Resource::Vacinas, 404) => "Vacina não encontrada",
        (Resource::Vacinacoes, 404) => "Vacinação não encontrada",
        (Resource::Auth, 404) => "Usuário não encontrado",
        (Resource::Pessoas, 409) => {
            "Já existe uma pessoa cadastrada com este número de identificação"
        }
        (Resource::Vacinas, 409) => "Já existe uma vacina cadastrada com este nome",
        (Resource::Vacinacoes, 409) => "Esta dose da vacina já foi registrada para esta pessoa",
        (Resource::Auth, 409) => "Email já está em uso",
        (_, 422) => "Dados de entrada inválidos",
        (_, 500) => "Erro interno do servidor",
        _ => return format!("Erro {status}"),
    };
    fixed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_vaccine_name_message() {
        let err = ApiError::server(Resource::Vacinas, 409);
        assert_eq!(
            err.to_string(),
            "Já existe uma vacina cadastrada com este nome"
        );
    }

    #[test]
    fn missing_vaccination_message() {
        let err = ApiError::server(Resource::Vacinacoes, 404);
        assert_eq!(err.to_string(), "Vacinação não encontrada");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn duplicate_document_message() {
        let err = ApiError::server(Resource::Pessoas, 409);
        assert_eq!(
            err.to_string(),
            "Já existe uma pessoa cadastrada com este número de identificação"
        );
    }

    #[test]
    fn auth_statuses_use_their_own_table() {
        assert_eq!(
            ApiError::server(Resource::Auth, 401).to_string(),
            "Email ou senha incorretos"
        );
        assert_eq!(
            ApiError::server(Resource::Pessoas, 401).to_string(),
            "Não autorizado"
        );
        assert_eq!(
            ApiError::server(Resource::Auth, 409).to_string(),
            "Email já está em uso"
        );
    }

    #[test]
    fn unknown_status_falls_back_to_generic_message() {
        assert_eq!(
            ApiError::server(Resource::Vacinas, 418).to_string(),
            "Erro 418"
        );
    }

    #[test]
    fn transport_failures_carry_the_client_prefix() {
        let err = ApiError::client("connection refused");
        assert_eq!(err.to_string(), "Erro: connection refused");
        assert_eq!(err.status(), None);
    }
}
