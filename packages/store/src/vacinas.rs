//! Vaccine store: cache of the `/Vacinas` collection.

use api::error::ApiError;
use api::models::{NovaVacina, Vacina, VacinaUpdate};
use api::remote::VacinasApi;
use tokio::sync::watch;

use crate::stream::EntityStream;

/// Client-side cache of the `/Vacinas` collection. Same contract as
/// [`crate::PessoaStore`]: remote first, snapshot publish on success.
pub struct VacinaStore<A> {
    api: A,
    tx: watch::Sender<Vec<Vacina>>,
}

impl<A: VacinasApi> VacinaStore<A> {
    pub fn new(api: A) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { api, tx }
    }

    pub fn subscribe(&self) -> EntityStream<Vec<Vacina>> {
        EntityStream::new(self.tx.subscribe())
    }

    pub async fn load(&self) {
        match self.api.list().await {
            Ok(vacinas) => {
                self.tx.send_replace(vacinas);
            }
            Err(err) => {
                tracing::error!("failed to load vaccines: {err}");
                self.tx.send_replace(Vec::new());
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Vacina, ApiError> {
        self.api.get(id).await
    }

    /// Name search, remote pass-through; results are not cached.
    pub async fn search(&self, nome: &str) -> Result<Vec<Vacina>, ApiError> {
        self.api.search(nome).await
    }

    pub async fn create(&self, nova: NovaVacina) -> Result<Vacina, ApiError> {
        let vacina = self.api.create(&nova).await?;
        let mut lista = self.tx.borrow().clone();
        lista.push(vacina.clone());
        self.tx.send_replace(lista);
        Ok(vacina)
    }

    pub async fn update(&self, id: &str, update: VacinaUpdate) -> Result<Vacina, ApiError> {
        let vacina = self.api.update(id, &update).await?;
        let mut lista = self.tx.borrow().clone();
        if let Some(slot) = lista.iter_mut().find(|v| v.id == id) {
            *slot = vacina.clone();
            self.tx.send_replace(lista);
        }
        Ok(vacina)
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockApi;
    use api::error::Resource;

    fn bcg() -> NovaVacina {
        NovaVacina {
            nome: "BCG".to_string(),
        }
    }

    #[tokio::test]
    async fn create_publishes_grown_snapshot() {
        let api = MockApi::default();
        let store = VacinaStore::new(api.clone());
        store.load().await;

        let mut stream = store.subscribe();
        let criada = store.create(bcg()).await.unwrap();

        let snapshot = stream.changed().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0], criada);
    }

    #[tokio::test]
    async fn duplicate_name_conflict_surfaces_exact_message() {
        let api = MockApi::default();
        let store = VacinaStore::new(api.clone());
        store.create(bcg()).await.unwrap();

        let before = store.subscribe().current();
        api.fail_next(ApiError::server(Resource::Vacinas, 409));
        let err = store.create(bcg()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Já existe uma vacina cadastrada com este nome"
        );
        assert_eq!(store.subscribe().current(), before);
    }

    #[tokio::test]
    async fn search_does_not_touch_the_cache() {
        let api = MockApi::default();
        let store = VacinaStore::new(api.clone());
        store.create(bcg()).await.unwrap();
        store
            .create(NovaVacina {
                nome: "Hepatite B".to_string(),
            })
            .await
            .unwrap();

        let achadas = store.search("BCG").await.unwrap();
        assert_eq!(achadas.len(), 1);
        assert_eq!(store.subscribe().current().len(), 2);
    }
}
