//! [`Query`] collection related to [`SavedFilter`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::SavedFilter,
    infra::{storage, Database},
    Query, Service,
};

/// Queries all the [`SavedFilter`]s, newest first.
#[derive(Clone, Copy, Debug)]
pub struct List;

impl<Db, St> Query<List> for Service<Db, St>
where
    St: Database<
        Select<By<Vec<SavedFilter>, ()>>,
        Ok = Vec<SavedFilter>,
        Err = Traced<storage::Error>,
    >,
{
    type Ok = Vec<SavedFilter>;
    type Err = Traced<storage::Error>;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        let mut filters = self
            .storage()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        filters.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(filters)
    }
}
