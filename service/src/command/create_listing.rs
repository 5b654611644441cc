//! [`Command`] for creating a new [`Listing`].

use common::{operations::Insert, DateTime, Money};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, DealType, Details, PricePeriod, PropertyType, Status},
        upload::{Draft, Image},
        Listing,
    },
    infra::{catalog, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`].
///
/// Selected [`Image`]s failing validation are skipped.
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// [`listing::Title`] of a new [`Listing`].
    pub title: listing::Title,

    /// [`listing::Description`] of a new [`Listing`], if any.
    pub description: Option<listing::Description>,

    /// Asking price of a new [`Listing`].
    pub price: Money,

    /// [`PricePeriod`] of a new [`Listing`], if it's a rent.
    pub price_period: Option<PricePeriod>,

    /// [`PropertyType`] of a new [`Listing`].
    pub property_type: PropertyType,

    /// [`DealType`] of a new [`Listing`].
    pub deal_type: DealType,

    /// [`listing::LocationId`] of a new [`Listing`].
    pub location: listing::LocationId,

    /// [`Details`] of a new [`Listing`].
    pub details: Details,

    /// Initial [`Status`] of a new [`Listing`].
    pub status: Status,

    /// [`Image`]s selected for a new [`Listing`].
    pub images: Vec<Image>,
}

impl<Db, St> Command<CreateListing> for Service<Db, St>
where
    Db: Database<Insert<Listing>, Err = Traced<catalog::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateListing {
            title,
            description,
            price,
            price_period,
            property_type,
            deal_type,
            location,
            details,
            status,
            images,
        } = cmd;

        if price.amount <= Decimal::ZERO {
            return Err(tracerr::new!(E::NonPositivePrice(price)));
        }
        if price_period.is_some() && deal_type != DealType::Rent {
            return Err(tracerr::new!(E::PricePeriodOfSale));
        }
        if !details.is_consistent() {
            return Err(tracerr::new!(E::InconsistentDetails));
        }

        let mut draft =
            Draft::new(self.previews().clone(), self.config().max_upload_size);
        let rejected = draft.select(images).len();
        let images = draft.commit();

        let listing = Listing {
            id: listing::Id::new(),
            title,
            description,
            price,
            price_period,
            property_type,
            deal_type,
            location,
            details,
            status,
            images,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tracing::info!(
            id = %listing.id,
            images = listing.images.len(),
            rejected,
            "listing created",
        );

        Ok(listing)
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`catalog`] error.
    #[display("`Catalog` operation failed: {_0}")]
    #[from]
    Catalog(catalog::Error),

    /// Price is zero or negative.
    #[display("Price `{_0}` is not positive")]
    NonPositivePrice(#[error(not(source))] Money),

    /// [`PricePeriod`] is provided for a sale.
    #[display("Price period is allowed for a rent only")]
    PricePeriodOfSale,

    /// [`Details`] contradict each other.
    #[display("Listing details are inconsistent")]
    InconsistentDetails,
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        domain::{
            listing::{DealType, Details, PricePeriod, PropertyType, Status},
            upload::Image,
        },
        query::listing::ById,
        spec::service,
        Command as _,
    };

    use super::{CreateListing, ExecutionError};

    fn command() -> CreateListing {
        CreateListing {
            title: "Cozy flat".parse().unwrap(),
            description: None,
            price: "45000RUB".parse::<Money>().unwrap(),
            price_period: Some(PricePeriod::Month),
            property_type: PropertyType::Apartment,
            deal_type: DealType::Rent,
            location: "moscow".parse().unwrap(),
            details: Details {
                floor: Some(3),
                total_floors: Some(9),
                ..Details::default()
            },
            status: Status::Active,
            images: vec![
                Image {
                    name: "room.jpg".into(),
                    content_type: "image/jpeg".into(),
                    size: 1024,
                },
                Image {
                    name: "plan.pdf".into(),
                    content_type: "application/pdf".into(),
                    size: 1024,
                },
            ],
        }
    }

    #[tokio::test]
    async fn creates_with_valid_images_only() {
        let svc = service(vec![]);

        let listing = svc.execute(command()).await.unwrap();

        assert_eq!(listing.images.len(), 1);
        assert!(listing.images[0].to_string().ends_with("/room.jpg"));
        assert_eq!(svc.previews().live(), 0);
        assert_eq!(svc.previews().revoked(), 1);

        let stored = svc.execute(ById::by(listing.id)).await.unwrap();
        assert_eq!(stored.map(|l| l.id), Some(listing.id));
    }

    #[tokio::test]
    async fn rejects_invalid_listing() {
        let svc = service(vec![]);

        let mut sale_with_period = command();
        sale_with_period.deal_type = DealType::Sale;
        let err = svc.execute(sale_with_period).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::PricePeriodOfSale));

        let mut free = command();
        free.price = "0RUB".parse().unwrap();
        let err = svc.execute(free).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NonPositivePrice(_)));

        let mut floating = command();
        floating.details.floor = Some(12);
        let err = svc.execute(floating).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::InconsistentDetails,
        ));
    }
}
