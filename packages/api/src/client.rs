//! # HTTP client for the registry API
//!
//! [`HttpApi`] implements every trait in [`crate::remote`] against the real
//! endpoints. It is cheap to clone (reqwest's `Client` and the [`TokenCell`]
//! are both handles over shared state), so each store owns its own copy.
//!
//! ## Request pipeline
//!
//! Every request goes through [`HttpApi::execute`]:
//!
//! 1. `Accept: application/json` is set (bodies additionally get
//!    `Content-Type` from `.json(..)`).
//! 2. When the [`TokenCell`] holds a token it is attached as
//!    `Authorization: Bearer <token>`.
//! 3. Transport failures (no response at all) become
//!    [`ApiError::Client`]; error statuses become [`ApiError::Server`]
//!    with the message table selected by [`Resource`].
//! 4. A 401 from **any** endpoint clears the [`TokenCell`]; the session
//!    layer watches the cell and tears the local session down.
//!
//! Nothing is retried and no client-side timeout is imposed beyond the
//! transport default.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{ApiError, Resource};
use crate::models::{
    AuthResponse, CriarContaRequest, LoginRequest, NovaPessoa, NovaVacina, NovaVacinacao,
    PerfilUpdate, Pessoa, PessoaUpdate, Usuario, Vacina, VacinaUpdate, Vacinacao,
    VacinacaoUpdate,
};
use crate::remote::{AuthApi, PessoasApi, VacinasApi, VacinacoesApi};

/// Shared bearer-token slot.
///
/// One cell is shared between the [`HttpApi`] (which reads it on every
/// request and clears it on a 401) and the session store (which fills it on
/// login and clears it on logout). Interested parties can [`watch`] the cell
/// to observe those transitions.
///
/// [`watch`]: TokenCell::watch
#[derive(Clone)]
pub struct TokenCell {
    tx: Arc<watch::Sender<Option<String>>>,
}

impl TokenCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    pub fn set(&self, token: &str) {
        self.tx.send_replace(Some(token.to_string()));
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Subscribe to token changes (login, logout, 401 teardown).
    pub fn watch(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

impl Default for TokenCell {
    fn default() -> Self {
        Self::new()
    }
}

/// The reqwest-backed client for every endpoint group.
#[derive(Clone)]
pub struct HttpApi {
    http: Client,
    base_url: String,
    token: TokenCell,
}

impl HttpApi {
    /// `base_url` is the API root, e.g. `https://host/api`; a trailing slash
    /// is tolerated.
    pub fn new(base_url: impl Into<String>, token: TokenCell) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            token,
        }
    }

    pub fn token_cell(&self) -> &TokenCell {
        &self.token
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(
        &self,
        req: reqwest::RequestBuilder,
        resource: Resource,
    ) -> Result<reqwest::Response, ApiError> {
        let req = req.header(header::ACCEPT, "application/json");
        let req = match self.token.get() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await.map_err(|err| {
            tracing::error!("request failed: {err}");
            ApiError::client(err.to_string())
        })?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::UNAUTHORIZED {
            // An unauthorized answer from any endpoint invalidates the
            // local session; the session layer watches the cell.
            self.token.clear();
        }
        Err(ApiError::server(resource, status.as_u16()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        resource: Resource,
    ) -> Result<T, ApiError> {
        let req = self.http.get(self.url(path)).query(query);
        into_json(self.execute(req, resource).await?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        resource: Resource,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.url(path)).json(body);
        into_json(self.execute(req, resource).await?).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        resource: Resource,
    ) -> Result<T, ApiError> {
        let req = self.http.put(self.url(path)).json(body);
        into_json(self.execute(req, resource).await?).await
    }

    async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        resource: Resource,
    ) -> Result<(), ApiError> {
        let req = self.http.post(self.url(path)).json(body);
        self.execute(req, resource).await?;
        Ok(())
    }

    async fn put_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        resource: Resource,
    ) -> Result<(), ApiError> {
        let req = self.http.put(self.url(path)).json(body);
        self.execute(req, resource).await?;
        Ok(())
    }

    async fn delete_unit(&self, path: &str, resource: Resource) -> Result<(), ApiError> {
        let req = self.http.delete(self.url(path));
        self.execute(req, resource).await?;
        Ok(())
    }
}

async fn into_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    resp.json()
        .await
        .map_err(|err| ApiError::client(err.to_string()))
}

impl PessoasApi for HttpApi {
    async fn list(&self) -> Result<Vec<Pessoa>, ApiError> {
        self.get_json("/Pessoas", &[], Resource::Pessoas).await
    }

    async fn get(&self, id: &str) -> Result<Pessoa, ApiError> {
        self.get_json(&format!("/Pessoas/{id}"), &[], Resource::Pessoas)
            .await
    }

    async fn create(&self, nova: &NovaPessoa) -> Result<Pessoa, ApiError> {
        self.post_json("/Pessoas", nova, Resource::Pessoas).await
    }

    async fn update(&self, id: &str, update: &PessoaUpdate) -> Result<Pessoa, ApiError> {
        self.put_json(&format!("/Pessoas/{id}"), update, Resource::Pessoas)
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/Pessoas/{id}"), Resource::Pessoas)
            .await
    }

    async fn get_by_documento(&self, documento: &str) -> Result<Pessoa, ApiError> {
        self.get_json(
            &format!("/Pessoas/documento/{documento}"),
            &[],
            Resource::Pessoas,
        )
        .await
    }
}

impl VacinasApi for HttpApi {
    async fn list(&self) -> Result<Vec<Vacina>, ApiError> {
        self.get_json("/Vacinas", &[], Resource::Vacinas).await
    }

    async fn get(&self, id: &str) -> Result<Vacina, ApiError> {
        self.get_json(&format!("/Vacinas/{id}"), &[], Resource::Vacinas)
            .await
    }

    async fn create(&self, nova: &NovaVacina) -> Result<Vacina, ApiError> {
        self.post_json("/Vacinas", nova, Resource::Vacinas).await
    }

    async fn update(&self, id: &str, update: &VacinaUpdate) -> Result<Vacina, ApiError> {
        self.put_json(&format!("/Vacinas/{id}"), update, Resource::Vacinas)
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/Vacinas/{id}"), Resource::Vacinas)
            .await
    }

    async fn search(&self, nome: &str) -> Result<Vec<Vacina>, ApiError> {
        self.get_json(
            "/Vacinas/buscar",
            &[("nome", nome.to_string())],
            Resource::Vacinas,
        )
        .await
    }
}

impl VacinacoesApi for HttpApi {
    async fn list(&self) -> Result<Vec<Vacinacao>, ApiError> {
        self.get_json("/Vacinacao", &[], Resource::Vacinacoes).await
    }

    async fn get(&self, id: &str) -> Result<Vacinacao, ApiError> {
        self.get_json(&format!("/Vacinacao/{id}"), &[], Resource::Vacinacoes)
            .await
    }

    async fn create(&self, nova: &NovaVacinacao) -> Result<Vacinacao, ApiError> {
        self.post_json("/Vacinacao", nova, Resource::Vacinacoes).await
    }

    async fn update(&self, id: &str, update: &VacinacaoUpdate) -> Result<Vacinacao, ApiError> {
        self.put_json(&format!("/Vacinacao/{id}"), update, Resource::Vacinacoes)
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/Vacinacao/{id}"), Resource::Vacinacoes)
            .await
    }

    async fn card_for(&self, pessoa_id: &str) -> Result<Vec<Vacinacao>, ApiError> {
        self.get_json(
            "/Vacinacao/cartao-vacinacao",
            &[("pessoaId", pessoa_id.to_string())],
            Resource::Vacinacoes,
        )
        .await
    }

    async fn delete_card(&self, pessoa_id: &str) -> Result<(), ApiError> {
        self.delete_unit(
            &format!("/Vacinacao/cartao-vacinacao/{pessoa_id}"),
            Resource::Vacinacoes,
        )
        .await
    }

    async fn by_vaccine(&self, vacina_id: &str) -> Result<Vec<Vacinacao>, ApiError> {
        self.get_json(
            &format!("/Vacinacao/vacina/{vacina_id}"),
            &[],
            Resource::Vacinacoes,
        )
        .await
    }

    async fn by_period(&self, inicio: NaiveDate, fim: NaiveDate) -> Result<Vec<Vacinacao>, ApiError> {
        self.get_json(
            "/Vacinacao/periodo",
            &[
                ("dataInicio", inicio.format("%Y-%m-%d").to_string()),
                ("dataFim", fim.format("%Y-%m-%d").to_string()),
            ],
            Resource::Vacinacoes,
        )
        .await
    }
}

#[derive(Serialize)]
struct EmailQuery<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct EmailExists {
    existe: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlterarSenha<'a> {
    senha_atual: &'a str,
    nova_senha: &'a str,
}

impl AuthApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/login", request, Resource::Auth).await
    }

    async fn register(&self, request: &CriarContaRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/register", request, Resource::Auth)
            .await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.post_unit("/auth/logout", &serde_json::json!({}), Resource::Auth)
            .await
    }

    async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        let resp: EmailExists = self
            .post_json("/auth/verificar-email", &EmailQuery { email }, Resource::Auth)
            .await?;
        Ok(resp.existe)
    }

    async fn update_profile(&self, update: &PerfilUpdate) -> Result<Usuario, ApiError> {
        self.put_json("/auth/perfil", update, Resource::Auth).await
    }

    async fn change_password(&self, senha_atual: &str, nova_senha: &str) -> Result<(), ApiError> {
        self.put_unit(
            "/auth/alterar-senha",
            &AlterarSenha {
                senha_atual,
                nova_senha,
            },
            Resource::Auth,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_cell_roundtrip() {
        let cell = TokenCell::new();
        assert_eq!(cell.get(), None);

        cell.set("abc");
        assert_eq!(cell.get(), Some("abc".to_string()));

        cell.clear();
        assert_eq!(cell.get(), None);
    }

    #[tokio::test]
    async fn token_cell_watch_sees_clears() {
        let cell = TokenCell::new();
        let mut rx = cell.watch();

        cell.set("abc");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some("abc".to_string()));

        cell.clear();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HttpApi::new("http://localhost:5000/api/", TokenCell::new());
        assert_eq!(client.url("/Pessoas"), "http://localhost:5000/api/Pessoas");
    }
}
