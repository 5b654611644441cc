//! [`LocalStorage`] of user data.

pub mod file;
pub mod memory;

use std::{future::Future, io};

use common::operations::{By, Delete, Insert, Select, Update};
use derive_more::{Display, Error as StdError, From};
use serde_json::Value;
use tokio::sync::Mutex;
use tracerr::Traced;

use crate::{
    domain::{saved_filter, SavedFilter},
    infra::Database,
};

pub use self::{file::File, memory::Memory};

/// Key under which [`SavedFilter`]s are stored.
pub const SAVED_FILTERS_KEY: &str = "saved_filters";

/// Key/value store of JSON documents.
pub trait Backend: Send + Sync {
    /// Returns the document stored under the provided `key`, if any.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Value>, Traced<Error>>> + Send;

    /// Stores the provided document under the provided `key`, replacing the
    /// existing one.
    fn set(
        &self,
        key: &str,
        value: Value,
    ) -> impl Future<Output = Result<(), Traced<Error>>> + Send;

    /// Removes the document stored under the provided `key`, if any.
    fn remove(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<(), Traced<Error>>> + Send;
}

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error of a [`File`] backend.
    #[display("Storage I/O failed: {_0}")]
    Io(io::Error),

    /// Stored document is not a valid JSON of the expected shape.
    #[display("Malformed stored document: {_0}")]
    Json(serde_json::Error),

    /// [`SavedFilter`] with the same ID exists already.
    #[display("`SavedFilter(id: {_0})` already exists")]
    #[from(ignore)]
    AlreadyExists(#[error(not(source))] saved_filter::Id),

    /// [`SavedFilter`] doesn't exist.
    #[display("`SavedFilter(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] saved_filter::Id),
}

/// Typed storage of [`SavedFilter`]s on top of a [`Backend`].
#[derive(Debug, Default)]
pub struct LocalStorage<B> {
    /// [`Backend`] storing the documents.
    backend: B,

    /// Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl<B> LocalStorage<B> {
    /// Creates a new [`LocalStorage`] on top of the provided [`Backend`].
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    /// Returns the underlying [`Backend`].
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: Backend> LocalStorage<B> {
    /// Loads all the stored [`SavedFilter`]s in their storage order.
    ///
    /// An unreadable document is logged and treated as empty.
    async fn load(&self) -> Result<Vec<SavedFilter>, Traced<Error>> {
        let Some(doc) = self
            .backend
            .get(SAVED_FILTERS_KEY)
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(vec![]);
        };
        Ok(serde_json::from_value(doc).unwrap_or_else(|e| {
            tracing::warn!("discarding malformed saved filters: {e}");
            vec![]
        }))
    }

    /// Stores the provided [`SavedFilter`]s, replacing the existing ones.
    async fn store(
        &self,
        filters: &[SavedFilter],
    ) -> Result<(), Traced<Error>> {
        let doc = serde_json::to_value(filters)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        self.backend
            .set(SAVED_FILTERS_KEY, doc)
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<B: Backend> Database<Select<By<Vec<SavedFilter>, ()>>>
    for LocalStorage<B>
{
    type Ok = Vec<SavedFilter>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<SavedFilter>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.load().await
    }
}

impl<B: Backend> Database<Select<By<Option<SavedFilter>, saved_filter::Id>>>
    for LocalStorage<B>
{
    type Ok = Option<SavedFilter>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<SavedFilter>, saved_filter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.load().await?.into_iter().find(|f| f.id == id))
    }
}

impl<B: Backend>
    Database<Select<By<Option<SavedFilter>, saved_filter::Fingerprint>>>
    for LocalStorage<B>
{
    type Ok = Option<SavedFilter>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<SavedFilter>, saved_filter::Fingerprint>>,
    ) -> Result<Self::Ok, Self::Err> {
        let fingerprint = by.into_inner();
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|f| f.fingerprint == fingerprint))
    }
}

impl<B: Backend> Database<Insert<SavedFilter>> for LocalStorage<B> {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(filter): Insert<SavedFilter>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;

        let mut filters = self.load().await?;
        if filters.iter().any(|f| f.id == filter.id) {
            return Err(tracerr::new!(Error::AlreadyExists(filter.id)));
        }
        filters.push(filter);
        self.store(&filters).await
    }
}

impl<B: Backend> Database<Update<SavedFilter>> for LocalStorage<B> {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(filter): Update<SavedFilter>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;

        let mut filters = self.load().await?;
        let existing = filters
            .iter_mut()
            .find(|f| f.id == filter.id)
            .ok_or_else(|| tracerr::new!(Error::NotExists(filter.id)))?;
        *existing = filter;
        self.store(&filters).await
    }
}

impl<B: Backend> Database<Delete<saved_filter::Id>> for LocalStorage<B> {
    /// Whether the [`SavedFilter`] existed.
    type Ok = bool;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(id): Delete<saved_filter::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;

        let mut filters = self.load().await?;
        let before = filters.len();
        filters.retain(|f| f.id != id);
        if filters.len() == before {
            return Ok(false);
        }
        if filters.is_empty() {
            self.backend
                .remove(SAVED_FILTERS_KEY)
                .await
                .map_err(tracerr::wrap!())?;
        } else {
            self.store(&filters).await?;
        }
        Ok(true)
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use common::{
        operations::{By, Delete, Insert, Select, Update},
        DateTime,
    };

    use crate::{
        domain::{
            saved_filter::{self, Fingerprint, Query},
            SavedFilter, SearchParams,
        },
        infra::Database as _,
    };

    use super::{Backend as _, LocalStorage, Memory, SAVED_FILTERS_KEY};

    /// Creates a new [`SavedFilter`] of the provided `query`.
    pub(crate) fn saved_filter(name: &str, query: &str) -> SavedFilter {
        let query = Query::from(&SearchParams::from_query(query));
        let now = DateTime::now();
        SavedFilter {
            id: saved_filter::Id::new(),
            name: name.parse().unwrap(),
            fingerprint: Fingerprint::of(&query),
            query,
            result_count: 0,
            new_count: 0,
            created_at: now.coerce(),
            updated_at: now.coerce(),
            refreshed_at: now.coerce(),
        }
    }

    #[tokio::test]
    async fn crud() {
        let storage = LocalStorage::new(Memory::default());
        let mut first = saved_filter("Sochi", "location=sochi");
        let second = saved_filter("Houses", "propertyType=house");

        storage.execute(Insert(first.clone())).await.unwrap();
        storage.execute(Insert(second.clone())).await.unwrap();
        assert!(storage.execute(Insert(first.clone())).await.is_err());

        first.name = "Sea".parse().unwrap();
        storage.execute(Update(first.clone())).await.unwrap();

        let all = storage
            .execute(Select(By::<Vec<SavedFilter>, _>::new(())))
            .await
            .unwrap();
        assert_eq!(all, vec![first.clone(), second.clone()]);

        let by_fingerprint = storage
            .execute(Select(By::<Option<SavedFilter>, _>::new(
                second.fingerprint,
            )))
            .await
            .unwrap();
        assert_eq!(by_fingerprint, Some(second.clone()));

        assert!(storage.execute(Delete(first.id)).await.unwrap());
        assert!(!storage.execute(Delete(first.id)).await.unwrap());
        assert!(storage.execute(Delete(second.id)).await.unwrap());
        assert_eq!(
            storage.backend().get(SAVED_FILTERS_KEY).await.unwrap(),
            None,
        );
    }

    #[tokio::test]
    async fn updating_missing_fails() {
        let storage = LocalStorage::new(Memory::default());

        let res = storage
            .execute(Update(saved_filter("Missing", "bedrooms=1")))
            .await;

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn malformed_document_is_empty() {
        let storage = LocalStorage::new(Memory::default());
        storage
            .backend()
            .set(SAVED_FILTERS_KEY, serde_json::json!({"broken": true}))
            .await
            .unwrap();

        let all = storage
            .execute(Select(By::<Vec<SavedFilter>, _>::new(())))
            .await
            .unwrap();

        assert!(all.is_empty());
    }
}
