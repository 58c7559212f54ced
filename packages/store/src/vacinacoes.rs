//! # Vaccination store
//!
//! [`VacinacaoStore`] caches the `/Vacinacao` collection and adds the
//! card-oriented queries. The card view ([`card_for`]) and the search
//! queries go to the server every time — the cache backs the general list
//! only, so the card is always fresh.
//!
//! [`card_for`]: VacinacaoStore::card_for

use api::error::ApiError;
use api::models::{NovaVacinacao, Vacinacao, VacinacaoUpdate};
use api::remote::VacinacoesApi;
use chrono::NaiveDate;
use tokio::sync::watch;

use crate::stream::EntityStream;

/// Client-side cache of the `/Vacinacao` collection.
pub struct VacinacaoStore<A> {
    api: A,
    tx: watch::Sender<Vec<Vacinacao>>,
}

impl<A: VacinacoesApi> VacinacaoStore<A> {
    pub fn new(api: A) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { api, tx }
    }

    pub fn subscribe(&self) -> EntityStream<Vec<Vacinacao>> {
        EntityStream::new(self.tx.subscribe())
    }

    pub async fn load(&self) {
        match self.api.list().await {
            Ok(vacinacoes) => {
                self.tx.send_replace(vacinacoes);
            }
            Err(err) => {
                tracing::error!("failed to load vaccinations: {err}");
                self.tx.send_replace(Vec::new());
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Vacinacao, ApiError> {
        self.api.get(id).await
    }

    /// One person's vaccination card, fetched remotely for freshness.
    pub async fn card_for(&self, pessoa_id: &str) -> Result<Vec<Vacinacao>, ApiError> {
        self.api.card_for(pessoa_id).await
    }

    pub async fn find_by_vaccine(&self, vacina_id: &str) -> Result<Vec<Vacinacao>, ApiError> {
        self.api.by_vaccine(vacina_id).await
    }

    pub async fn find_by_date_range(
        &self,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<Vec<Vacinacao>, ApiError> {
        self.api.by_period(inicio, fim).await
    }

    pub async fn create(&self, nova: NovaVacinacao) -> Result<Vacinacao, ApiError> {
        let vacinacao = self.api.create(&nova).await?;
        let mut lista = self.tx.borrow().clone();
        lista.push(vacinacao.clone());
        self.tx.send_replace(lista);
        Ok(vacinacao)
    }

    pub async fn update(&self, id: &str, update: VacinacaoUpdate) -> Result<Vacinacao, ApiError> {
        let vacinacao = self.api.update(id, &update).await?;
        let mut lista = self.tx.borrow().clone();
        if let Some(slot) = lista.iter_mut().find(|v| v.id == id) {
            *slot = vacinacao.clone();
            self.tx.send_replace(lista);
        }
        Ok(vacinacao)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(id).await?;
        let mut lista = self.tx.borrow().clone();
        let before = lista.len();
        lista.retain(|v| v.id != id);
        if lista.len() != before {
            self.tx.send_replace(lista);
        }
        Ok(())
    }

    /// Bulk delete of one person's events: one remote call, then one local
    /// filter and a single republish. First step of person removal.
    pub async fn delete_all_for_person(&self, pessoa_id: &str) -> Result<(), ApiError> {
        self.api.delete_card(pessoa_id).await?;
        let lista: Vec<Vacinacao> = self
            .tx
            .borrow()
            .iter()
            .filter(|v| v.pessoa_id != pessoa_id)
            .cloned()
            .collect();
        self.tx.send_replace(lista);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockApi;
    use api::error::Resource;
    use chrono::{TimeZone, Utc};

    fn dose(pessoa_id: &str, vacina_id: &str, dose: u32) -> NovaVacinacao {
        NovaVacinacao {
            pessoa_id: pessoa_id.to_string(),
            vacina_id: vacina_id.to_string(),
            dose,
            data_aplicacao: Utc.with_ymd_and_hms(2026, 8, 4, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_then_card_query_returns_the_event() {
        let api = MockApi::default();
        let store = VacinacaoStore::new(api.clone());

        let criada = store.create(dose("p1", "1", 1)).await.unwrap();

        let cartao = store.card_for("p1").await.unwrap();
        assert_eq!(cartao.len(), 1);
        assert_eq!(cartao[0], criada);
        assert!(store.card_for("p2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_vaccination_fetch_surfaces_exact_message() {
        let api = MockApi::default();
        let store = VacinacaoStore::new(api.clone());

        api.fail_next(ApiError::server(Resource::Vacinacoes, 404));
        let err = store.get("vac9").await.unwrap_err();
        assert_eq!(err.to_string(), "Vacinação não encontrada");
    }

    #[tokio::test]
    async fn delete_all_for_person_clears_card_in_one_publish() {
        let api = MockApi::default();
        let store = VacinacaoStore::new(api.clone());
        store.create(dose("p1", "1", 1)).await.unwrap();
        store.create(dose("p1", "2", 1)).await.unwrap();
        store.create(dose("p2", "1", 1)).await.unwrap();

        let mut stream = store.subscribe();
        store.delete_all_for_person("p1").await.unwrap();

        let snapshot = stream.changed().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].pessoa_id, "p2");
        assert!(store.card_for("p1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_leaves_snapshot_untouched() {
        let api = MockApi::default();
        let store = VacinacaoStore::new(api.clone());
        let criada = store.create(dose("p1", "1", 1)).await.unwrap();

        let before = store.subscribe().current();
        api.fail_next(ApiError::server(Resource::Vacinacoes, 500));
        let err = store.delete(&criada.id).await.unwrap_err();

        assert_eq!(err.to_string(), "Erro interno do servidor");
        assert_eq!(store.subscribe().current(), before);
    }

    #[tokio::test]
    async fn period_and_vaccine_queries_pass_through() {
        let api = MockApi::default();
        let store = VacinacaoStore::new(api.clone());
        store.create(dose("p1", "1", 1)).await.unwrap();
        store.create(dose("p2", "2", 1)).await.unwrap();

        let por_vacina = store.find_by_vaccine("2").await.unwrap();
        assert_eq!(por_vacina.len(), 1);

        let inicio = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let fim = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert_eq!(store.find_by_date_range(inicio, fim).await.unwrap().len(), 2);

        let antes = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let fim_julho = NaiveDate::from_ymd_opt(2026, 7, 31).unwrap();
        assert!(store
            .find_by_date_range(antes, fim_julho)
            .await
            .unwrap()
            .is_empty());
    }
}
