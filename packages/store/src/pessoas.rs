//! # People store
//!
//! [`PessoaStore`] caches the `/Pessoas` collection. The cache backs list
//! views only; single-person reads always go to the server. Mutations follow
//! the shared store contract:
//!
//! - the remote call happens first; the local list changes only on success,
//! - every change publishes a whole snapshot to subscribers,
//! - a failed [`load`](PessoaStore::load) publishes an empty list and logs,
//!   so subscribers are never left without a value.

use api::error::ApiError;
use api::models::{NovaPessoa, Pessoa, PessoaUpdate};
use api::remote::PessoasApi;
use tokio::sync::watch;

use crate::stream::EntityStream;

/// Client-side cache of the `/Pessoas` collection.
pub struct PessoaStore<A> {
    api: A,
    tx: watch::Sender<Vec<Pessoa>>,
}

impl<A: PessoasApi> PessoaStore<A> {
    /// Creates an empty store. Call [`load`](Self::load) to fetch the
    /// initial collection.
    pub fn new(api: A) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { api, tx }
    }

    /// Current snapshot immediately, then every snapshot after a successful
    /// mutation or reload.
    pub fn subscribe(&self) -> EntityStream<Vec<Pessoa>> {
        EntityStream::new(self.tx.subscribe())
    }

    /// Replace the cache with a fresh server fetch. On failure the cache
    /// becomes empty and the error is logged, never surfaced.
    pub async fn load(&self) {
        match self.api.list().await {
            Ok(pessoas) => {
                self.tx.send_replace(pessoas);
            }
            Err(err) => {
                tracing::error!("failed to load people: {err}");
                self.tx.send_replace(Vec::new());
            }
        }
    }

    /// Fetch one person from the server; the cache is never consulted.
    pub async fn get(&self, id: &str) -> Result<Pessoa, ApiError> {
        self.api.get(id).await
    }

    pub async fn get_by_documento(&self, documento: &str) -> Result<Pessoa, ApiError> {
        self.api.get_by_documento(documento).await
    }

    pub async fn create(&self, nova: NovaPessoa) -> Result<Pessoa, ApiError> {
        let pessoa = self.api.create(&nova).await?;
        let mut lista = self.tx.borrow().clone();
        lista.push(pessoa.clone());
        self.tx.send_replace(lista);
        Ok(pessoa)
    }

    /// Remote update; on success the cached entry is replaced in place, so
    /// list position is preserved.
    pub async fn update(&self, id: &str, update: PessoaUpdate) -> Result<Pessoa, ApiError> {
        let pessoa = self.api.update(id, &update).await?;
        let mut lista = self.tx.borrow().clone();
        if let Some(slot) = lista.iter_mut().find(|p| p.id == id) {
            *slot = pessoa.clone();
            self.tx.send_replace(lista);
        }
        Ok(pessoa)
    }

    /// Remote delete. A missing cache entry is not an error; the remote
    /// outcome is authoritative either way.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(id).await?;
        let mut lista = self.tx.borrow().clone();
        let before = lista.len();
        lista.retain(|p| p.id != id);
        if lista.len() != before {
            self.tx.send_replace(lista);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ana, MockApi};
    use api::error::Resource;
    use api::models::Sexo;

    #[tokio::test]
    async fn create_appends_exactly_once() {
        let api = MockApi::default();
        let store = PessoaStore::new(api.clone());
        store.load().await;

        let stream = store.subscribe();
        assert!(stream.current().is_empty());

        let criada = store.create(ana()).await.unwrap();
        assert!(!criada.id.is_empty());

        let snapshot = stream.current();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.iter().filter(|p| p.id == criada.id).count(),
            1
        );
        assert_eq!(snapshot[0].nome, "Ana");
        assert_eq!(snapshot[0].documento, "123");
        assert_eq!(snapshot[0].sexo, Sexo::Feminino);
        assert_eq!(snapshot[0].idade, 30);
    }

    #[tokio::test]
    async fn failed_create_leaves_snapshot_untouched() {
        let api = MockApi::default();
        let store = PessoaStore::new(api.clone());
        store.create(ana()).await.unwrap();

        let stream = store.subscribe();
        let before = stream.current();

        api.fail_next(ApiError::server(Resource::Pessoas, 409));
        let err = store.create(ana()).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(stream.current(), before);
    }

    #[tokio::test]
    async fn update_preserves_position() {
        let api = MockApi::default();
        let store = PessoaStore::new(api.clone());
        let primeira = store.create(ana()).await.unwrap();
        let segunda = store
            .create(NovaPessoa {
                nome: "Bruno".to_string(),
                idade: 41,
                sexo: Sexo::Masculino,
                documento: "456".to_string(),
            })
            .await
            .unwrap();

        let update = PessoaUpdate {
            idade: Some(31),
            ..Default::default()
        };
        store.update(&primeira.id, update).await.unwrap();

        let snapshot = store.subscribe().current();
        assert_eq!(snapshot[0].id, primeira.id);
        assert_eq!(snapshot[0].idade, 31);
        assert_eq!(snapshot[1].id, segunda.id);
    }

    #[tokio::test]
    async fn delete_of_uncached_id_still_calls_remote() {
        let api = MockApi::default();
        let store = PessoaStore::new(api.clone());
        store.create(ana()).await.unwrap();

        let before = store.subscribe().current();
        store.delete("missing").await.unwrap();

        assert_eq!(api.state.pessoa_deletes.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(store.subscribe().current(), before);
    }

    #[tokio::test]
    async fn failed_load_publishes_empty_snapshot() {
        let api = MockApi::default();
        api.seed_pessoa("p0", "Clara", "789");
        let store = PessoaStore::new(api.clone());
        store.load().await;
        assert_eq!(store.subscribe().current().len(), 1);

        api.fail_next(ApiError::server(Resource::Pessoas, 500));
        store.load().await;
        assert!(store.subscribe().current().is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_each_publish() {
        let api = MockApi::default();
        let store = PessoaStore::new(api.clone());
        let mut stream = store.subscribe();

        let criada = store.create(ana()).await.unwrap();
        let snapshot = stream.changed().await.unwrap();
        assert_eq!(snapshot.len(), 1);

        store.delete(&criada.id).await.unwrap();
        let snapshot = stream.changed().await.unwrap();
        assert!(snapshot.is_empty());
    }
}
