//! [`Command`] for renaming a [`SavedFilter`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{saved_filter, SavedFilter},
    infra::{storage, Database},
    Service,
};

use super::Command;

/// [`Command`] for renaming a [`SavedFilter`].
#[derive(Clone, Debug)]
pub struct RenameSavedFilter {
    /// ID of the [`SavedFilter`] to rename.
    pub id: saved_filter::Id,

    /// New [`saved_filter::Name`] of the [`SavedFilter`].
    pub name: saved_filter::Name,
}

impl<Db, St> Command<RenameSavedFilter> for Service<Db, St>
where
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
        cmd: RenameSavedFilter,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RenameSavedFilter { id, name } = cmd;

        let _guard = self.saved_filters_lock().lock().await;

        let mut filter = self
            .storage()
            .execute(Select(By::<Option<SavedFilter>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SavedFilterNotExists(id))
            .map_err(tracerr::wrap!())?;
        if filter.name == name {
            return Ok(filter);
        }

        filter.name = name;
        filter.updated_at = DateTime::now().coerce();
        self.storage()
            .execute(Update(filter.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(filter)
    }
}

/// Error of [`RenameSavedFilter`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`storage`] error.
    #[display("`LocalStorage` operation failed: {_0}")]
    Storage(storage::Error),

    /// [`SavedFilter`] doesn't exist.
    #[display("`SavedFilter(id: {_0})` does not exist")]
    #[from(ignore)]
    SavedFilterNotExists(#[error(not(source))] saved_filter::Id),
}
