//! [`Query`] collection related to a single [`Listing`].

use common::operations::By;

use crate::domain::{listing, Listing};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Listing`] by its [`listing::Id`].
pub type ById = DatabaseQuery<By<Option<Listing>, listing::Id>>;

#[cfg(test)]
mod spec {
    use crate::{domain::Listing, spec::service, Query as _};

    use super::ById;

    #[tokio::test]
    async fn finds_by_id() {
        let listing = Listing::sample(10);
        let svc = service(vec![Listing::sample(20), listing.clone()]);

        let found = svc.execute(ById::by(listing.id)).await.unwrap();

        assert_eq!(found.map(|l| l.id), Some(listing.id));
    }
}
