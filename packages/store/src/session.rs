//! # Session store
//!
//! Tracks the operator's login state: `anonymous` ⇄ `authenticated`. The
//! session token and serialized user persist under two well-known storage
//! keys and survive reloads until logout or expiry.
//!
//! - Construction validates any persisted token's `exp` claim locally (JWT
//!   payload decode, no remote call) and discards expired or malformed
//!   tokens, so a stale reload starts anonymous.
//! - [`login`](SessionStore::login) / [`create_account`](SessionStore::create_account)
//!   persist the returned token + user, fill the shared [`TokenCell`], and
//!   publish the authenticated state. The published `expires_in` lets the UI
//!   layer schedule the auto-logout timer.
//! - [`logout`](SessionStore::logout) calls the remote endpoint best-effort
//!   when a token exists; local state is cleared regardless of the outcome.
//! - [`clear_local`](SessionStore::clear_local) is the teardown used when a
//!   401 from any endpoint empties the token cell.

use api::error::ApiError;
use api::models::{AuthResponse, CriarContaRequest, LoginRequest, PerfilUpdate, Usuario};
use api::remote::AuthApi;
use api::TokenCell;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tokio::sync::watch;

use crate::storage::SessionStorage;
use crate::stream::EntityStream;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

/// Published login state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub usuario: Option<Usuario>,
    /// Seconds until the current token expires, measured when published.
    pub expires_in: Option<i64>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.usuario.is_some()
    }
}

/// Login state + token persistence over the `/auth` endpoints.
pub struct SessionStore<A, S> {
    api: A,
    storage: S,
    token: TokenCell,
    tx: watch::Sender<SessionState>,
}

impl<A: AuthApi, S: SessionStorage> SessionStore<A, S> {
    /// Restores any persisted session, discarding it when the token's `exp`
    /// claim is past or unreadable.
    pub fn new(api: A, storage: S, token: TokenCell) -> Self {
        let state = restore(&storage, &token);
        let (tx, _rx) = watch::channel(state);
        let store = Self {
            api,
            storage,
            token,
            tx,
        };
        if !store.tx.borrow().is_authenticated() {
            store.discard_persisted();
        }
        store
    }

    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> EntityStream<SessionState> {
        EntityStream::new(self.tx.subscribe())
    }

    /// The current bearer token, when one is held.
    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<AuthResponse, ApiError> {
        let resposta = self.api.login(&credentials).await?;
        self.store_session(&resposta);
        Ok(resposta)
    }

    /// Same contract as [`login`](Self::login), against the register
    /// endpoint: success lands authenticated.
    pub async fn create_account(
        &self,
        request: CriarContaRequest,
    ) -> Result<AuthResponse, ApiError> {
        let resposta = self.api.register(&request).await?;
        self.store_session(&resposta);
        Ok(resposta)
    }

    /// Remote logout is attempted only when a token exists and its outcome
    /// never blocks the local teardown.
    pub async fn logout(&self) {
        if self.token.get().is_some() {
            if let Err(err) = self.api.logout().await {
                tracing::warn!("remote logout failed: {err}");
            }
        }
        self.clear_local();
    }

    /// Clear persisted and published session state without a remote call.
    pub fn clear_local(&self) {
        self.discard_persisted();
        self.token.clear();
        self.tx.send_replace(SessionState::default());
    }

    pub async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        self.api.check_email(email).await
    }

    /// Update the operator's profile; the refreshed user is re-persisted and
    /// republished under the current token.
    pub async fn update_profile(&self, update: PerfilUpdate) -> Result<Usuario, ApiError> {
        let usuario = self.api.update_profile(&update).await?;
        if let Ok(json) = serde_json::to_string(&usuario) {
            self.storage.set(USER_KEY, &json);
        }
        let expires_in = self.tx.borrow().expires_in;
        self.tx.send_replace(SessionState {
            usuario: Some(usuario.clone()),
            expires_in,
        });
        Ok(usuario)
    }

    pub async fn change_password(
        &self,
        senha_atual: &str,
        nova_senha: &str,
    ) -> Result<(), ApiError> {
        self.api.change_password(senha_atual, nova_senha).await
    }

    fn store_session(&self, resposta: &AuthResponse) {
        self.storage.set(TOKEN_KEY, &resposta.token);
        if let Ok(json) = serde_json::to_string(&resposta.usuario) {
            self.storage.set(USER_KEY, &json);
        }
        self.token.set(&resposta.token);
        self.tx.send_replace(SessionState {
            usuario: Some(resposta.usuario.clone()),
            expires_in: Some(resposta.expires_in),
        });
    }

    fn discard_persisted(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }
}

fn restore<S: SessionStorage>(storage: &S, token: &TokenCell) -> SessionState {
    let Some(raw_token) = storage.get(TOKEN_KEY) else {
        return SessionState::default();
    };
    let Some(exp) = token_expiry(&raw_token) else {
        return SessionState::default();
    };
    let remaining = exp - now_secs();
    if remaining <= 0 {
        return SessionState::default();
    }
    let Some(usuario) = storage
        .get(USER_KEY)
        .and_then(|json| serde_json::from_str::<Usuario>(&json).ok())
    else {
        return SessionState::default();
    };
    token.set(&raw_token);
    SessionState {
        usuario: Some(usuario),
        expires_in: Some(remaining),
    }
}

/// The `exp` claim of a JWT, when the payload segment decodes.
fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_i64()
}

/// Seconds since the Unix epoch, on both wasm and native.
pub(crate) fn now_secs() -> i64 {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{jwt_with_exp, operadora, MockApi};
    use crate::storage::MemoryStorage;
    use api::error::Resource;
    use api::models::AuthResponse;

    fn persisted(storage: &MemoryStorage, exp_offset: i64) {
        storage.set(TOKEN_KEY, &jwt_with_exp(now_secs() + exp_offset));
        storage.set(
            USER_KEY,
            &serde_json::to_string(&operadora()).unwrap(),
        );
    }

    #[test]
    fn expired_persisted_token_starts_anonymous_and_is_discarded() {
        let storage = MemoryStorage::new();
        persisted(&storage, -60);

        let session = SessionStore::new(MockApi::default(), storage.clone(), TokenCell::new());

        assert!(!session.state().is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn malformed_persisted_token_starts_anonymous() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "not-a-jwt");
        storage.set(USER_KEY, &serde_json::to_string(&operadora()).unwrap());

        let session = SessionStore::new(MockApi::default(), storage.clone(), TokenCell::new());

        assert!(!session.state().is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn valid_persisted_token_restores_the_session() {
        let storage = MemoryStorage::new();
        persisted(&storage, 3600);

        let token = TokenCell::new();
        let session = SessionStore::new(MockApi::default(), storage, token.clone());

        let state = session.state();
        assert!(state.is_authenticated());
        assert_eq!(state.usuario.unwrap().nome, "Operadora");
        assert!(state.expires_in.unwrap() > 0);
        assert!(token.get().is_some());
    }

    #[tokio::test]
    async fn login_persists_and_publishes_authenticated_state() {
        let api = MockApi::default();
        let storage = MemoryStorage::new();
        let token = TokenCell::new();
        let session = SessionStore::new(api.clone(), storage.clone(), token.clone());

        let mut stream = session.subscribe();
        session
            .login(LoginRequest {
                email: "operadora@clinica.com".to_string(),
                senha: "segredo".to_string(),
            })
            .await
            .unwrap();

        let state = stream.changed().await.unwrap();
        assert!(state.is_authenticated());
        assert_eq!(state.expires_in, Some(3600));
        assert!(storage.get(TOKEN_KEY).is_some());
        assert!(storage.get(USER_KEY).is_some());
        assert!(token.get().is_some());
    }

    #[tokio::test]
    async fn failed_login_stays_anonymous() {
        let api = MockApi::default();
        let storage = MemoryStorage::new();
        let session = SessionStore::new(api.clone(), storage.clone(), TokenCell::new());

        api.fail_next(ApiError::server(Resource::Auth, 401));
        let err = session
            .login(LoginRequest {
                email: "x@y.z".to_string(),
                senha: "errada".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email ou senha incorretos");
        assert!(!session.state().is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn logout_with_token_calls_remote_and_clears_even_on_failure() {
        let api = MockApi::default();
        let storage = MemoryStorage::new();
        let token = TokenCell::new();
        let session = SessionStore::new(api.clone(), storage.clone(), token.clone());
        session
            .login(LoginRequest {
                email: "a@b.c".to_string(),
                senha: "s".to_string(),
            })
            .await
            .unwrap();

        api.fail_next(ApiError::server(Resource::Auth, 500));
        session.logout().await;

        assert_eq!(
            api.state.logout_calls.load(std::sync::atomic::Ordering::SeqCst),
            1
        );
        assert!(!session.state().is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(token.get(), None);
    }

    #[tokio::test]
    async fn logout_without_token_skips_the_remote_call() {
        let api = MockApi::default();
        let session =
            SessionStore::new(api.clone(), MemoryStorage::new(), TokenCell::new());

        session.logout().await;

        assert_eq!(
            api.state.logout_calls.load(std::sync::atomic::Ordering::SeqCst),
            0
        );
        assert!(!session.state().is_authenticated());
    }

    #[tokio::test]
    async fn create_account_lands_authenticated() {
        let api = MockApi::default();
        api.set_auth_response(AuthResponse {
            token: jwt_with_exp(now_secs() + 120),
            usuario: operadora(),
            expires_in: 120,
        });
        let session =
            SessionStore::new(api.clone(), MemoryStorage::new(), TokenCell::new());

        session
            .create_account(CriarContaRequest {
                nome: "Operadora".to_string(),
                email: "operadora@clinica.com".to_string(),
                senha: "segredo1".to_string(),
                confirmar_senha: "segredo1".to_string(),
            })
            .await
            .unwrap();

        let state = session.state();
        assert!(state.is_authenticated());
        assert_eq!(state.expires_in, Some(120));
    }

    #[tokio::test]
    async fn cleared_token_cell_teardown_publishes_anonymous() {
        let api = MockApi::default();
        let storage = MemoryStorage::new();
        let token = TokenCell::new();
        let session = SessionStore::new(api.clone(), storage.clone(), token.clone());
        session
            .login(LoginRequest {
                email: "a@b.c".to_string(),
                senha: "s".to_string(),
            })
            .await
            .unwrap();

        // What the UI does when it observes the cell emptied by a 401.
        token.clear();
        session.clear_local();

        assert!(!session.state().is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn check_email_and_change_password_pass_through() {
        let api = MockApi::default();
        let session = SessionStore::new(api.clone(), MemoryStorage::new(), TokenCell::new());

        assert!(!session.check_email("nova@clinica.com").await.unwrap());
        session.change_password("antiga", "nova123").await.unwrap();

        api.fail_next(ApiError::server(Resource::Auth, 400));
        let err = session.change_password("antiga", "curta").await.unwrap_err();
        assert_eq!(err.to_string(), "Dados inválidos");
    }

    #[tokio::test]
    async fn update_profile_republishes_and_repersists_the_user() {
        let api = MockApi::default();
        let storage = MemoryStorage::new();
        let session = SessionStore::new(api.clone(), storage.clone(), TokenCell::new());
        session
            .login(LoginRequest {
                email: "a@b.c".to_string(),
                senha: "s".to_string(),
            })
            .await
            .unwrap();

        let usuario = session
            .update_profile(PerfilUpdate {
                nome: Some("Nova Operadora".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(usuario.nome, "Nova Operadora");
        let state = session.state();
        assert_eq!(state.usuario.unwrap().nome, "Nova Operadora");
        assert!(storage
            .get(USER_KEY)
            .unwrap()
            .contains("Nova Operadora"));
    }
}
