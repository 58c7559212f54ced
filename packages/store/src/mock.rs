//! Recording in-memory implementation of the remote API, for tests.
//!
//! Behaves like a tiny registry server: create assigns ids, reads filter the
//! backing vectors, deletes are counted at entry so tests can assert which
//! endpoints were (or were not) invoked. `fail_next` arms a failure that the
//! next remote call consumes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use api::error::ApiError;
use api::models::{
    AuthResponse, CriarContaRequest, LoginRequest, NovaPessoa, NovaVacina, NovaVacinacao,
    PerfilUpdate, Pessoa, PessoaUpdate, Sexo, Usuario, Vacina, VacinaUpdate, Vacinacao,
    VacinacaoUpdate,
};
use api::remote::{AuthApi, PessoasApi, VacinasApi, VacinacoesApi};
use api::Resource;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::NaiveDate;

#[derive(Default)]
pub struct MockState {
    pub pessoas: Mutex<Vec<Pessoa>>,
    pub vacinas: Mutex<Vec<Vacina>>,
    pub vacinacoes: Mutex<Vec<Vacinacao>>,
    pub next_id: AtomicUsize,
    pub fail_next: Mutex<Option<ApiError>>,
    pub pessoa_deletes: AtomicUsize,
    pub card_deletes: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub auth_response: Mutex<Option<AuthResponse>>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    pub state: Arc<MockState>,
}

impl MockApi {
    /// Arm a failure; the next remote call consumes it.
    pub fn fail_next(&self, err: ApiError) {
        *self.state.fail_next.lock().unwrap() = Some(err);
    }

    fn take_failure(&self) -> Result<(), ApiError> {
        match self.state.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let n = self.state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}{n}")
    }

    pub fn seed_pessoa(&self, id: &str, nome: &str, documento: &str) {
        self.state.pessoas.lock().unwrap().push(Pessoa {
            id: id.to_string(),
            nome: nome.to_string(),
            idade: 30,
            sexo: Sexo::Outro,
            documento: documento.to_string(),
        });
    }

    pub fn set_auth_response(&self, response: AuthResponse) {
        *self.state.auth_response.lock().unwrap() = Some(response);
    }
}

/// The scenario person from the registration flow.
pub fn ana() -> NovaPessoa {
    NovaPessoa {
        nome: "Ana".to_string(),
        idade: 30,
        sexo: Sexo::Feminino,
        documento: "123".to_string(),
    }
}

/// A structurally valid JWT whose payload carries the given `exp` claim.
pub fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{exp}}}"#));
    format!("{header}.{payload}.assinatura")
}

pub fn operadora() -> Usuario {
    Usuario {
        id: "u1".to_string(),
        email: "operadora@clinica.com".to_string(),
        nome: "Operadora".to_string(),
        ativo: true,
    }
}

impl PessoasApi for MockApi {
    async fn list(&self) -> Result<Vec<Pessoa>, ApiError> {
        self.take_failure()?;
        Ok(self.state.pessoas.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Pessoa, ApiError> {
        self.take_failure()?;
        self.state
            .pessoas
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::server(Resource::Pessoas, 404))
    }

    async fn create(&self, nova: &NovaPessoa) -> Result<Pessoa, ApiError> {
        self.take_failure()?;
        let pessoa = Pessoa {
            id: self.fresh_id("p"),
            nome: nova.nome.clone(),
            idade: nova.idade,
            sexo: nova.sexo,
            documento: nova.documento.clone(),
        };
        self.state.pessoas.lock().unwrap().push(pessoa.clone());
        Ok(pessoa)
    }

    async fn update(&self, id: &str, update: &PessoaUpdate) -> Result<Pessoa, ApiError> {
        self.take_failure()?;
        let mut pessoas = self.state.pessoas.lock().unwrap();
        let pessoa = pessoas
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::server(Resource::Pessoas, 404))?;
        if let Some(nome) = &update.nome {
            pessoa.nome = nome.clone();
        }
        if let Some(idade) = update.idade {
            pessoa.idade = idade;
        }
        if let Some(sexo) = update.sexo {
            pessoa.sexo = sexo;
        }
        if let Some(documento) = &update.documento {
            pessoa.documento = documento.clone();
        }
        Ok(pessoa.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.state.pessoa_deletes.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        self.state.pessoas.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn get_by_documento(&self, documento: &str) -> Result<Pessoa, ApiError> {
        self.take_failure()?;
        self.state
            .pessoas
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.documento == documento)
            .cloned()
            .ok_or_else(|| ApiError::server(Resource::Pessoas, 404))
    }
}

impl VacinasApi for MockApi {
    async fn list(&self) -> Result<Vec<Vacina>, ApiError> {
        self.take_failure()?;
        Ok(self.state.vacinas.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Vacina, ApiError> {
        self.take_failure()?;
        self.state
            .vacinas
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| ApiError::server(Resource::Vacinas, 404))
    }

    async fn create(&self, nova: &NovaVacina) -> Result<Vacina, ApiError> {
        self.take_failure()?;
        let vacina = Vacina {
            id: self.fresh_id("v"),
            nome: nova.nome.clone(),
        };
        self.state.vacinas.lock().unwrap().push(vacina.clone());
        Ok(vacina)
    }

    async fn update(&self, id: &str, update: &VacinaUpdate) -> Result<Vacina, ApiError> {
        self.take_failure()?;
        let mut vacinas = self.state.vacinas.lock().unwrap();
        let vacina = vacinas
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| ApiError::server(Resource::Vacinas, 404))?;
        if let Some(nome) = &update.nome {
            vacina.nome = nome.clone();
        }
        Ok(vacina.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.take_failure()?;
        self.state.vacinas.lock().unwrap().retain(|v| v.id != id);
        Ok(())
    }

    async fn search(&self, nome: &str) -> Result<Vec<Vacina>, ApiError> {
        self.take_failure()?;
        Ok(self
            .state
            .vacinas
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.nome.contains(nome))
            .cloned()
            .collect())
    }
}

impl VacinacoesApi for MockApi {
    async fn list(&self) -> Result<Vec<Vacinacao>, ApiError> {
        self.take_failure()?;
        Ok(self.state.vacinacoes.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Vacinacao, ApiError> {
        self.take_failure()?;
        self.state
            .vacinacoes
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| ApiError::server(Resource::Vacinacoes, 404))
    }

    async fn create(&self, nova: &NovaVacinacao) -> Result<Vacinacao, ApiError> {
        self.take_failure()?;
        let vacinacao = Vacinacao {
            id: self.fresh_id("vac"),
            pessoa_id: nova.pessoa_id.clone(),
            vacina_id: nova.vacina_id.clone(),
            dose: nova.dose,
            data_aplicacao: nova.data_aplicacao,
            vacina_nome: None,
            pessoa_nome: None,
        };
        self.state.vacinacoes.lock().unwrap().push(vacinacao.clone());
        Ok(vacinacao)
    }

    async fn update(&self, id: &str, update: &VacinacaoUpdate) -> Result<Vacinacao, ApiError> {
        self.take_failure()?;
        let mut vacinacoes = self.state.vacinacoes.lock().unwrap();
        let vacinacao = vacinacoes
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| ApiError::server(Resource::Vacinacoes, 404))?;
        if let Some(pessoa_id) = &update.pessoa_id {
            vacinacao.pessoa_id = pessoa_id.clone();
        }
        if let Some(vacina_id) = &update.vacina_id {
            vacinacao.vacina_id = vacina_id.clone();
        }
        if let Some(dose) = update.dose {
            vacinacao.dose = dose;
        }
        if let Some(data) = update.data_aplicacao {
            vacinacao.data_aplicacao = data;
        }
        Ok(vacinacao.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.take_failure()?;
        self.state.vacinacoes.lock().unwrap().retain(|v| v.id != id);
        Ok(())
    }

    async fn card_for(&self, pessoa_id: &str) -> Result<Vec<Vacinacao>, ApiError> {
        self.take_failure()?;
        Ok(self
            .state
            .vacinacoes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.pessoa_id == pessoa_id)
            .cloned()
            .collect())
    }

    async fn delete_card(&self, pessoa_id: &str) -> Result<(), ApiError> {
        self.state.card_deletes.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        self.state
            .vacinacoes
            .lock()
            .unwrap()
            .retain(|v| v.pessoa_id != pessoa_id);
        Ok(())
    }

    async fn by_vaccine(&self, vacina_id: &str) -> Result<Vec<Vacinacao>, ApiError> {
        self.take_failure()?;
        Ok(self
            .state
            .vacinacoes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.vacina_id == vacina_id)
            .cloned()
            .collect())
    }

    async fn by_period(&self, inicio: NaiveDate, fim: NaiveDate) -> Result<Vec<Vacinacao>, ApiError> {
        self.take_failure()?;
        Ok(self
            .state
            .vacinacoes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| {
                let data = v.data_aplicacao.date_naive();
                data >= inicio && data <= fim
            })
            .cloned()
            .collect())
    }
}

impl MockApi {
    fn auth_response(&self) -> AuthResponse {
        self.state
            .auth_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| AuthResponse {
                token: jwt_with_exp(crate::session::now_secs() + 3600),
                usuario: operadora(),
                expires_in: 3600,
            })
    }
}

impl AuthApi for MockApi {
    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.take_failure()?;
        Ok(self.auth_response())
    }

    async fn register(&self, _request: &CriarContaRequest) -> Result<AuthResponse, ApiError> {
        self.take_failure()?;
        Ok(self.auth_response())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.state.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        Ok(())
    }

    async fn check_email(&self, _email: &str) -> Result<bool, ApiError> {
        self.take_failure()?;
        Ok(false)
    }

    async fn update_profile(&self, update: &PerfilUpdate) -> Result<Usuario, ApiError> {
        self.take_failure()?;
        let mut usuario = operadora();
        if let Some(nome) = &update.nome {
            usuario.nome = nome.clone();
        }
        if let Some(email) = &update.email {
            usuario.email = email.clone();
        }
        Ok(usuario)
    }

    async fn change_password(&self, _atual: &str, _nova: &str) -> Result<(), ApiError> {
        self.take_failure()?;
        Ok(())
    }
}
