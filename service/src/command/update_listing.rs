//! [`Command`] for editing an existing [`Listing`].

use common::{
    operations::{By, Select, Update},
    Money,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, Status},
        Listing,
    },
    infra::{catalog, Database},
    Service,
};

use super::Command;

/// [`Command`] for editing an existing [`Listing`].
///
/// [`None`] fields are left unchanged.
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// ID of the [`Listing`] to edit.
    pub id: listing::Id,

    /// New [`listing::Title`].
    pub title: Option<listing::Title>,

    /// New [`listing::Description`], with [`Some`]`(`[`None`]`)` removing
    /// it.
    pub description: Option<Option<listing::Description>>,

    /// New asking price.
    pub price: Option<Money>,

    /// New [`Status`].
    pub status: Option<Status>,
}

impl<Db, St> Command<UpdateListing> for Service<Db, St>
where
    Db: Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<catalog::Error>,
        > + Database<Update<Listing>, Err = Traced<catalog::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing {
            id,
            title,
            description,
            price,
            status,
        } = cmd;

        if let Some(p) = price.filter(|p| p.amount <= Decimal::ZERO) {
            return Err(tracerr::new!(E::NonPositivePrice(p)));
        }

        let mut listing = self
            .database()
            .execute(Select(By::<Option<Listing>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(title) = title {
            listing.title = title;
        }
        if let Some(description) = description {
            listing.description = description;
        }
        if let Some(price) = price {
            listing.price = price;
        }
        if let Some(status) = status {
            listing.status = status;
        }

        self.database()
            .execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`UpdateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`catalog`] error.
    #[display("`Catalog` operation failed: {_0}")]
    #[from]
    Catalog(catalog::Error),

    /// [`Listing`] doesn't exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Price is zero or negative.
    #[display("Price `{_0}` is not positive")]
    NonPositivePrice(#[error(not(source))] Money),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            listing::{self, Status},
            Listing, SearchParams,
        },
        query::listings::Search,
        spec::service,
        Command as _,
    };

    use super::{ExecutionError, UpdateListing};

    fn update(id: listing::Id) -> UpdateListing {
        UpdateListing {
            id,
            title: None,
            description: None,
            price: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn archiving_hides_from_search() {
        let listing = Listing::sample(100);
        let svc = service(vec![listing.clone()]);

        let updated = svc
            .execute(UpdateListing {
                title: Some("Renamed".parse().unwrap()),
                status: Some(Status::Archived),
                ..update(listing.id)
            })
            .await
            .unwrap();
        assert_eq!(updated.title.to_string(), "Renamed");
        assert_eq!(updated.price, listing.price);

        let page = svc
            .execute(Search {
                params: SearchParams::default(),
            })
            .await
            .unwrap();
        assert_eq!(page.total_items, 0);
    }

    #[tokio::test]
    async fn fails_on_missing_or_invalid() {
        let listing = Listing::sample(100);
        let svc = service(vec![listing.clone()]);

        let err = svc.execute(update(listing::Id::new())).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::ListingNotExists(_)));

        let err = svc
            .execute(UpdateListing {
                price: Some("-1RUB".parse().unwrap()),
                ..update(listing.id)
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NonPositivePrice(_)));
    }
}
