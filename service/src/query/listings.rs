//! [`Query`] collection related to multiple [`Listing`]s.

use common::{
    operations::{By, Select},
    Page,
};
use tracerr::Traced;

use crate::{
    domain::{Listing, SearchParams},
    infra::{catalog, Database},
    search, Query, Service,
};

/// Queries a [`Page`] of published [`Listing`]s matching [`SearchParams`].
#[derive(Clone, Debug)]
pub struct Search {
    /// [`SearchParams`] to filter, sort and paginate by.
    pub params: SearchParams,
}

impl<Db, St> Query<Search> for Service<Db, St>
where
    Db: Database<
        Select<By<Vec<Listing>, SearchParams>>,
        Ok = Vec<Listing>,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = Page<Listing>;
    type Err = Traced<catalog::Error>;

    async fn execute(&self, query: Search) -> Result<Self::Ok, Self::Err> {
        let Search { params } = query;

        let mut found = self
            .database()
            .execute(Select(By::new(params.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        if let Some(order) = params.sort {
            search::sort_listings(&mut found, order);
        }

        let page = search::paginate(found, &params, self.config().per_page);
        tracing::debug!(
            total_items = page.total_items,
            page = page.number,
            "listings searched",
        );
        Ok(page)
    }
}
