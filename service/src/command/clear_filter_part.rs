//! [`Command`] for clearing a single [`Part`] of a filter.

use std::convert::Infallible;

use crate::{
    domain::filter::{FilterId, Part},
    filters, Service, Store,
};

use super::Command;

/// [`Command`] for clearing a single [`Part`] of a filter in a URL query
/// string, as removing a chip does.
///
/// Results in the new canonical URL query string.
#[derive(Clone, Debug)]
pub struct ClearFilterPart {
    /// URL query string to modify.
    pub query: String,

    /// [`FilterId`] of the filter to clear the [`Part`] of.
    pub id: FilterId,

    /// [`Part`] to clear.
    pub part: Part,
}

impl<Db, St> Command<ClearFilterPart> for Service<Db, St> {
    type Ok = String;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: ClearFilterPart,
    ) -> Result<Self::Ok, Self::Err> {
        let ClearFilterPart { query, id, part } = cmd;

        let mut store = Store::new(&query);
        _ = filters::clear_part(&mut store, id, &part);
        Ok(store.query())
    }
}
