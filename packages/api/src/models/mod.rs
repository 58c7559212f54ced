//! Wire models for the registry API.
//!
//! All types serialize to the JSON shapes the remote API speaks: field names
//! are camelCase on the wire, identifiers are server-assigned strings, and
//! the `Nova*` payloads are the create bodies (everything except `id`). The
//! `*Update` payloads are partial — unset fields are omitted entirely so the
//! server leaves them untouched.

mod pessoa;
mod usuario;
mod vacina;
mod vacinacao;

pub use pessoa::{NovaPessoa, Pessoa, PessoaUpdate, Sexo};
pub use usuario::{AuthResponse, CriarContaRequest, LoginRequest, PerfilUpdate, Usuario};
pub use vacina::{NovaVacina, Vacina, VacinaUpdate};
pub use vacinacao::{NovaVacinacao, Vacinacao, VacinacaoUpdate};
