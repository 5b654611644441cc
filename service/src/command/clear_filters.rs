//! [`Command`] for clearing all filters.

use std::convert::Infallible;

use crate::{Service, Store};

use super::Command;

/// [`Command`] for removing every filter from a URL query string.
///
/// The sort order is kept. Results in the new canonical URL query string.
#[derive(Clone, Debug)]
pub struct ClearFilters {
    /// URL query string to modify.
    pub query: String,
}

impl<Db, St> Command<ClearFilters> for Service<Db, St> {
    type Ok = String;
    type Err = Infallible;

    async fn execute(&self, cmd: ClearFilters) -> Result<Self::Ok, Self::Err> {
        let mut store = Store::new(&cmd.query);
        _ = store.clear_search_params();
        Ok(store.query())
    }
}

#[cfg(test)]
mod spec {
    use crate::{spec::service, Command as _};

    use super::ClearFilters;

    #[tokio::test]
    async fn keeps_sort_only() {
        let svc = service(vec![]);

        let query = svc
            .execute(ClearFilters {
                query: "dealType=sale&bedrooms=2&sort=newest&page=3".into(),
            })
            .await
            .unwrap();

        assert_eq!(query, "sort=newest");
    }
}
