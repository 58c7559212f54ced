//! The three entity stores over one shared client, plus the cross-entity
//! person-removal protocol.

use api::error::ApiError;
use api::remote::{PessoasApi, VacinacoesApi, VacinasApi};

use crate::pessoas::PessoaStore;
use crate::vacinacoes::VacinacaoStore;
use crate::vacinas::VacinaStore;

/// Process-wide bundle of entity stores. Construct one per application and
/// hand it to views through an explicit context — there is no ambient
/// singleton.
pub struct Stores<A> {
    pub pessoas: PessoaStore<A>,
    pub vacinas: VacinaStore<A>,
    pub vacinacoes: VacinacaoStore<A>,
}

impl<A> Stores<A>
where
    A: PessoasApi + VacinasApi + VacinacoesApi + Clone,
{
    pub fn new(api: A) -> Self {
        Self {
            pessoas: PessoaStore::new(api.clone()),
            vacinas: VacinaStore::new(api.clone()),
            vacinacoes: VacinacaoStore::new(api),
        }
    }

    /// Initial fetch of every collection.
    pub async fn load_all(&self) {
        self.pessoas.load().await;
        self.vacinas.load().await;
        self.vacinacoes.load().await;
    }

    /// Two-step, non-transactional person removal: first the person's
    /// vaccination card, then the person. When the first step fails the
    /// person delete is never issued. When the second step fails the card is
    /// already gone and the person remains — there is no compensating
    /// action.
    pub async fn remove_person(&self, id: &str) -> Result<(), ApiError> {
        self.vacinacoes.delete_all_for_person(id).await?;
        self.pessoas.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ana, MockApi};
    use api::error::Resource;
    use api::models::NovaVacinacao;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::Ordering;

    async fn populated() -> (MockApi, Stores<MockApi>, String) {
        let api = MockApi::default();
        let stores = Stores::new(api.clone());
        let pessoa = stores.pessoas.create(ana()).await.unwrap();
        stores
            .vacinacoes
            .create(NovaVacinacao {
                pessoa_id: pessoa.id.clone(),
                vacina_id: "1".to_string(),
                dose: 1,
                data_aplicacao: Utc.with_ymd_and_hms(2026, 8, 4, 0, 0, 0).unwrap(),
            })
            .await
            .unwrap();
        (api, stores, pessoa.id)
    }

    #[tokio::test]
    async fn removal_deletes_card_then_person() {
        let (api, stores, pessoa_id) = populated().await;

        stores.remove_person(&pessoa_id).await.unwrap();

        assert_eq!(api.state.card_deletes.load(Ordering::SeqCst), 1);
        assert_eq!(api.state.pessoa_deletes.load(Ordering::SeqCst), 1);
        assert!(stores.pessoas.subscribe().current().is_empty());
        assert!(stores.vacinacoes.subscribe().current().is_empty());
    }

    #[tokio::test]
    async fn failed_card_delete_never_issues_the_person_delete() {
        let (api, stores, pessoa_id) = populated().await;

        api.fail_next(ApiError::server(Resource::Vacinacoes, 500));
        let err = stores.remove_person(&pessoa_id).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(api.state.pessoa_deletes.load(Ordering::SeqCst), 0);
        // Consistent: the person still has the card.
        assert_eq!(stores.pessoas.subscribe().current().len(), 1);
        assert_eq!(stores.vacinacoes.subscribe().current().len(), 1);
    }

    #[tokio::test]
    async fn registration_scenario_builds_a_one_event_card() {
        let api = MockApi::default();
        let stores = Stores::new(api.clone());

        let pessoa = stores.pessoas.create(ana()).await.unwrap();
        let lista = stores.pessoas.subscribe().current();
        assert_eq!(lista.len(), 1);
        assert!(!lista[0].id.is_empty());
        assert_eq!(lista[0].nome, "Ana");

        let hoje = Utc::now();
        let evento = stores
            .vacinacoes
            .create(NovaVacinacao {
                pessoa_id: pessoa.id.clone(),
                vacina_id: "1".to_string(),
                dose: 1,
                data_aplicacao: hoje,
            })
            .await
            .unwrap();

        let cartao = stores.vacinacoes.card_for(&pessoa.id).await.unwrap();
        assert_eq!(cartao, vec![evento]);
    }
}
