//! [`Command`] for refreshing counters of a [`SavedFilter`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, saved_filter, Listing, SavedFilter, SearchParams},
    infra::{catalog, storage, Database},
    Service,
};

use super::Command;

/// [`Command`] for recounting [`Listing`]s matching a [`SavedFilter`].
///
/// [`SavedFilter::new_count`] becomes the number of matching [`Listing`]s
/// created after the previous refresh.
#[derive(Clone, Copy, Debug)]
pub struct RefreshSavedFilter {
    /// ID of the [`SavedFilter`] to refresh.
    pub id: saved_filter::Id,
}

impl<Db, St> Command<RefreshSavedFilter> for Service<Db, St>
where
    Db: Database<
        Select<By<Vec<Listing>, SearchParams>>,
        Ok = Vec<Listing>,
        Err = Traced<catalog::Error>,
    >,
    St: Database<
            Select<By<Option<SavedFilter>, saved_filter::Id>>,
            Ok = Option<SavedFilter>,
            Err = Traced<storage::Error>,
        > + Database<Update<SavedFilter>, Err = Traced<storage::Error>>,
{
    type Ok = SavedFilter;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RefreshSavedFilter,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RefreshSavedFilter { id } = cmd;

        let _guard = self.saved_filters_lock().lock().await;

        let mut filter = self
            .storage()
            .execute(Select(By::<Option<SavedFilter>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SavedFilterNotExists(id))
            .map_err(tracerr::wrap!())?;

        let found = self
            .database()
            .execute(Select(By::new(filter.search_params())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let since: listing::CreationDateTime = filter.refreshed_at.coerce();
        filter.result_count = found.len();
        filter.new_count =
            found.iter().filter(|l| l.created_at > since).count();
        filter.refreshed_at = DateTime::now().coerce();
        self.storage()
            .execute(Update(filter.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tracing::debug!(
            %id,
            result_count = filter.result_count,
            new_count = filter.new_count,
            "saved filter refreshed",
        );

        Ok(filter)
    }
}

/// Error of [`RefreshSavedFilter`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`catalog`] error.
    #[display("`Catalog` operation failed: {_0}")]
    Catalog(catalog::Error),

    /// [`storage`] error.
    #[display("`LocalStorage` operation failed: {_0}")]
    Storage(storage::Error),

    /// [`SavedFilter`] doesn't exist.
    #[display("`SavedFilter(id: {_0})` does not exist")]
    #[from(ignore)]
    SavedFilterNotExists(#[error(not(source))] saved_filter::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::Insert;

    use crate::{
        domain::Listing,
        infra::{storage::spec::saved_filter, Database as _},
        spec::service,
        Command as _,
    };

    use super::RefreshSavedFilter;

    #[tokio::test]
    async fn counts_new_listings() {
        let mut filter = saved_filter("Cheap", "priceMax=10");
        let saved_at = filter.refreshed_at;
        filter.refreshed_at = saved_at - Duration::from_secs(100);

        let listings = [(1, 150), (2, 50), (3, 20), (20, 10)]
            .into_iter()
            .map(|(price, ago)| {
                let mut l = Listing::sample(price);
                l.created_at = (saved_at - Duration::from_secs(ago)).coerce();
                l
            })
            .collect();
        let svc = service(listings);
        svc.storage().execute(Insert(filter.clone())).await.unwrap();

        let refreshed = svc
            .execute(RefreshSavedFilter { id: filter.id })
            .await
            .unwrap();
        assert_eq!(refreshed.result_count, 3);
        assert_eq!(refreshed.new_count, 2);
        assert!(refreshed.refreshed_at > filter.refreshed_at);

        let again = svc
            .execute(RefreshSavedFilter { id: filter.id })
            .await
            .unwrap();
        assert_eq!(again.result_count, 3);
        assert_eq!(again.new_count, 0);
    }
}
