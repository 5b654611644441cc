//! [`Command`] for deleting a [`SavedFilter`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::SavedFilter;
use crate::{
    domain::saved_filter,
    infra::{storage, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`SavedFilter`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteSavedFilter {
    /// ID of the [`SavedFilter`] to delete.
    pub id: saved_filter::Id,
}

impl<Db, St> Command<DeleteSavedFilter> for Service<Db, St>
where
    St: Database<
        Delete<saved_filter::Id>,
        Ok = bool,
        Err = Traced<storage::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteSavedFilter,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteSavedFilter { id } = cmd;

        let _guard = self.saved_filters_lock().lock().await;

        let deleted = self
            .storage()
            .execute(Delete(id))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::SavedFilterNotExists(id)));
        }
        tracing::info!(%id, "saved filter deleted");

        Ok(())
    }
}

/// Error of [`DeleteSavedFilter`] [`Command`] execution.
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
