//! Trait seams for the remote registry API.
//!
//! The stores are generic over these traits so the remote layer can be
//! substituted in tests with recording mocks. [`crate::HttpApi`] implements
//! all four against the real endpoints.

use chrono::NaiveDate;

use crate::error::ApiError;
use crate::models::{
    AuthResponse, CriarContaRequest, LoginRequest, NovaPessoa, NovaVacina, NovaVacinacao,
    PerfilUpdate, Pessoa, PessoaUpdate, Usuario, Vacina, VacinaUpdate, Vacinacao,
    VacinacaoUpdate,
};

/// `/Pessoas` endpoint group.
pub trait PessoasApi {
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Pessoa>, ApiError>>;
    fn get(&self, id: &str) -> impl std::future::Future<Output = Result<Pessoa, ApiError>>;
    fn create(
        &self,
        nova: &NovaPessoa,
    ) -> impl std::future::Future<Output = Result<Pessoa, ApiError>>;
    fn update(
        &self,
        id: &str,
        update: &PessoaUpdate,
    ) -> impl std::future::Future<Output = Result<Pessoa, ApiError>>;
    fn delete(&self, id: &str) -> impl std::future::Future<Output = Result<(), ApiError>>;
    fn get_by_documento(
        &self,
        documento: &str,
    ) -> impl std::future::Future<Output = Result<Pessoa, ApiError>>;
}

/// `/Vacinas` endpoint group.
pub trait VacinasApi {
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Vacina>, ApiError>>;
    fn get(&self, id: &str) -> impl std::future::Future<Output = Result<Vacina, ApiError>>;
    fn create(
        &self,
        nova: &NovaVacina,
    ) -> impl std::future::Future<Output = Result<Vacina, ApiError>>;
    fn update(
        &self,
        id: &str,
        update: &VacinaUpdate,
    ) -> impl std::future::Future<Output = Result<Vacina, ApiError>>;
    fn delete(&self, id: &str) -> impl std::future::Future<Output = Result<(), ApiError>>;
    fn search(&self, nome: &str)
        -> impl std::future::Future<Output = Result<Vec<Vacina>, ApiError>>;
}

/// `/Vacinacao` endpoint group.
pub trait VacinacoesApi {
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Vacinacao>, ApiError>>;
    fn get(&self, id: &str) -> impl std::future::Future<Output = Result<Vacinacao, ApiError>>;
    fn create(
        &self,
        nova: &NovaVacinacao,
    ) -> impl std::future::Future<Output = Result<Vacinacao, ApiError>>;
    fn update(
        &self,
        id: &str,
        update: &VacinacaoUpdate,
    ) -> impl std::future::Future<Output = Result<Vacinacao, ApiError>>;
    fn delete(&self, id: &str) -> impl std::future::Future<Output = Result<(), ApiError>>;
    /// The vaccination card: every event recorded for one person.
    fn card_for(
        &self,
        pessoa_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Vacinacao>, ApiError>>;
    /// Bulk delete of one person's card.
    fn delete_card(
        &self,
        pessoa_id: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>>;
    fn by_vaccine(
        &self,
        vacina_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Vacinacao>, ApiError>>;
    /// Events applied between `inicio` and `fim` inclusive. Dates travel as
    /// `YYYY-MM-DD` query parameters.
    fn by_period(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<Vacinacao>, ApiError>>;
}

/// `/auth` endpoint group.
pub trait AuthApi {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl std::future::Future<Output = Result<AuthResponse, ApiError>>;
    fn register(
        &self,
        request: &CriarContaRequest,
    ) -> impl std::future::Future<Output = Result<AuthResponse, ApiError>>;
    fn logout(&self) -> impl std::future::Future<Output = Result<(), ApiError>>;
    /// Whether an account already exists for `email`.
    fn check_email(&self, email: &str)
        -> impl std::future::Future<Output = Result<bool, ApiError>>;
    fn update_profile(
        &self,
        update: &PerfilUpdate,
    ) -> impl std::future::Future<Output = Result<Usuario, ApiError>>;
    fn change_password(
        &self,
        senha_atual: &str,
        nova_senha: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>>;
}
