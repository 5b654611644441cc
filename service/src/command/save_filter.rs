//! [`Command`] for saving [`SearchParams`] as a [`SavedFilter`].

use common::{
    operations::{By, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        saved_filter::{self, Fingerprint, Query},
        Listing, SavedFilter, SearchParams,
    },
    infra::{catalog, storage, Database},
    Service,
};

use super::Command;

/// [`Command`] for saving [`SearchParams`] as a [`SavedFilter`].
///
/// Saving the same [`SearchParams`] again renames the existing
/// [`SavedFilter`] instead of creating a duplicate.
#[derive(Clone, Debug)]
pub struct SaveFilter {
    /// [`saved_filter::Name`] of the [`SavedFilter`].
    pub name: saved_filter::Name,

    /// [`SearchParams`] to save.
    pub params: SearchParams,
}

impl<Db, St> Command<SaveFilter> for Service<Db, St>
where
    Db: Database<
        Select<By<Vec<Listing>, SearchParams>>,
        Ok = Vec<Listing>,
        Err = Traced<catalog::Error>,
    >,
    St: Database<
            Select<By<Option<SavedFilter>, Fingerprint>>,
            Ok = Option<SavedFilter>,
            Err = Traced<storage::Error>,
        > + Database<Insert<SavedFilter>, Err = Traced<storage::Error>>
        + Database<Update<SavedFilter>, Err = Traced<storage::Error>>,
{
    type Ok = SavedFilter;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SaveFilter) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SaveFilter { name, params } = cmd;
        let query = Query::from(&params);
        let fingerprint = Fingerprint::of(&query);

        let _guard = self.saved_filters_lock().lock().await;

        let existing = self
            .storage()
            .execute(Select(By::new(fingerprint)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(mut filter) = existing {
            if filter.name != name {
                filter.name = name;
                filter.updated_at = DateTime::now().coerce();
                self.storage()
                    .execute(Update(filter.clone()))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
            }
            return Ok(filter);
        }

        let found = self
            .database()
            .execute(Select(By::new(params.without_page())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let now = DateTime::now();
        let filter = SavedFilter {
            id: saved_filter::Id::new(),
            name,
            query,
            fingerprint,
            result_count: found.len(),
            new_count: 0,
            created_at: now.coerce(),
            updated_at: now.coerce(),
            refreshed_at: now.coerce(),
        };
        self.storage()
            .execute(Insert(filter.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tracing::info!(id = %filter.id, query = %filter.query, "filter saved");

        Ok(filter)
    }
}

/// Error of [`SaveFilter`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`catalog`] error.
    #[display("`Catalog` operation failed: {_0}")]
    Catalog(catalog::Error),

    /// [`storage`] error.
    #[display("`LocalStorage` operation failed: {_0}")]
    Storage(storage::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{Listing, SearchParams},
        query::saved_filters::List,
        spec::service,
        Command as _,
    };

    use super::SaveFilter;

    #[tokio::test]
    async fn saves_with_result_count() {
        let svc = service((1..=5).map(Listing::sample).collect());

        let filter = svc
            .execute(SaveFilter {
                name: "Cheap".parse().unwrap(),
                params: SearchParams::from_query("priceMax=3&page=2"),
            })
            .await
            .unwrap();

        assert_eq!(filter.query.to_string(), "priceMax=3");
        assert_eq!(filter.result_count, 3);
        assert_eq!(filter.new_count, 0);
    }

    #[tokio::test]
    async fn deduplicates_same_query() {
        let svc = service(vec![]);

        let first = svc
            .execute(SaveFilter {
                name: "Sochi".parse().unwrap(),
                params: SearchParams::from_query("location=sochi&bedrooms=1"),
            })
            .await
            .unwrap();
        let second = svc
            .execute(SaveFilter {
                name: "Sea".parse().unwrap(),
                params: SearchParams::from_query("bedrooms=1&location=sochi"),
            })
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.name.to_string(), "Sea");
        let all = svc.execute(List).await.unwrap();
        assert_eq!(all, vec![second]);
    }
}
