//! [`Listing`]s API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, RawQuery,
    },
    http::StatusCode,
    Extension, Json,
};
use common::{Money, Page};
use serde::Deserialize;
use service::{
    command::{self, CreateListing, UpdateListing},
    domain::{
        listing::{self, DealType, Details, PricePeriod, PropertyType, Status},
        upload::Image,
        Listing, SearchParams,
    },
    query, Command as _,
};

use crate::{define_error, AsError, Error, Service};

/// Searches published [`Listing`]s by the URL query string.
///
/// # Errors
///
/// If the catalog fails.
#[tracing::instrument(skip_all, fields(query = ?query))]
pub async fn search(
    Extension(service): Extension<Service>,
    RawQuery(query): RawQuery,
) -> Result<Json<Page<Listing>>, Error> {
    let params = SearchParams::from_query(query.as_deref().unwrap_or(""));
    service
        .execute(query::listings::Search { params })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// Returns a single [`Listing`].
///
/// # Errors
///
/// Possible error codes:
/// - `LISTING_NOT_FOUND` - [`Listing`] with the provided ID doesn't exist.
#[tracing::instrument(skip_all)]
pub async fn get(
    Extension(service): Extension<Service>,
    id: Result<Path<listing::Id>, PathRejection>,
) -> Result<Json<Listing>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    service
        .execute(query::listing::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(Json)
        .ok_or_else(|| NotFoundError::ListingNotFound.into())
}

/// Image selected for a new [`Listing`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewImage {
    /// File name of the image.
    pub name: String,

    /// MIME content type of the image.
    pub content_type: String,

    /// Size of the image in bytes.
    pub size: u64,
}

/// Request body of a new [`Listing`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    /// [`listing::Title`] of the [`Listing`].
    pub title: listing::Title,

    /// [`listing::Description`] of the [`Listing`].
    #[serde(default)]
    pub description: Option<listing::Description>,

    /// Asking price.
    pub price: Money,

    /// [`PricePeriod`] of a rent price.
    #[serde(default)]
    pub price_period: Option<PricePeriod>,

    /// [`PropertyType`] of the [`Listing`].
    pub property_type: PropertyType,

    /// [`DealType`] of the [`Listing`].
    #[serde(default)]
    pub deal_type: DealType,

    /// [`listing::LocationId`] of the [`Listing`].
    pub location: listing::LocationId,

    /// [`Details`] of the [`Listing`].
    #[serde(flatten)]
    pub details: Details,

    /// Initial [`Status`], a draft if omitted.
    #[serde(default)]
    pub status: Option<Status>,

    /// Selected images.
    #[serde(default)]
    pub images: Vec<NewImage>,
}

/// Creates a new [`Listing`].
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - malformed request body;
/// - `NON_POSITIVE_PRICE` - price is zero or negative;
/// - `PRICE_PERIOD_OF_SALE` - price period is provided for a sale;
/// - `INCONSISTENT_DETAILS` - listing details contradict each other.
#[tracing::instrument(skip_all)]
pub async fn create(
    Extension(service): Extension<Service>,
    body: Result<Json<NewListing>, JsonRejection>,
) -> Result<(StatusCode, Json<Listing>), Error> {
    let Json(NewListing {
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
    }) = body.map_err(AsError::into_error)?;

    let listing = service
        .execute(CreateListing {
            title,
            description,
            price,
            price_period,
            property_type,
            deal_type,
            location,
            details,
            status: status.unwrap_or(Status::Draft),
            images: images
                .into_iter()
                .map(|i| Image {
                    name: i.name,
                    content_type: i.content_type,
                    size: i.size,
                })
                .collect(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(listing)))
}

/// Request body of a [`Listing`] modification.
///
/// Omitted fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingChanges {
    /// New [`listing::Title`].
    pub title: Option<listing::Title>,

    /// New [`listing::Description`], with `null` removing it.
    #[serde(deserialize_with = "super::present")]
    pub description: Option<Option<listing::Description>>,

    /// New asking price.
    pub price: Option<Money>,

    /// New [`Status`].
    pub status: Option<Status>,
}

/// Modifies an existing [`Listing`].
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - malformed request;
/// - `LISTING_NOT_FOUND` - [`Listing`] with the provided ID doesn't exist;
/// - `NON_POSITIVE_PRICE` - price is zero or negative.
#[tracing::instrument(skip_all)]
pub async fn update(
    Extension(service): Extension<Service>,
    id: Result<Path<listing::Id>, PathRejection>,
    body: Result<Json<ListingChanges>, JsonRejection>,
) -> Result<Json<Listing>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;
    let Json(ListingChanges {
        title,
        description,
        price,
        status,
    }) = body.map_err(AsError::into_error)?;

    service
        .execute(UpdateListing {
            id,
            title,
            description,
            price,
            status,
        })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

define_error! {
    enum NotFoundError {
        #[code = "LISTING_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Listing` does not exist"]
        ListingNotFound,
    }
}

define_error! {
    enum ValidationError {
        #[code = "NON_POSITIVE_PRICE"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Price must be positive"]
        NonPositivePrice,

        #[code = "PRICE_PERIOD_OF_SALE"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Price period is allowed for a rent only"]
        PricePeriodOfSale,

        #[code = "INCONSISTENT_DETAILS"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Listing details are inconsistent"]
        InconsistentDetails,
    }
}

impl AsError for command::create_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::NonPositivePrice(_) => {
                Some(ValidationError::NonPositivePrice.into())
            }
            Self::PricePeriodOfSale => {
                Some(ValidationError::PricePeriodOfSale.into())
            }
            Self::InconsistentDetails => {
                Some(ValidationError::InconsistentDetails.into())
            }
        }
    }
}

impl AsError for command::update_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::ListingNotExists(_) => {
                Some(NotFoundError::ListingNotFound.into())
            }
            Self::NonPositivePrice(_) => {
                Some(ValidationError::NonPositivePrice.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use http::{Method, StatusCode};
    use serde_json::{json, Value};

    use crate::api::spec::Api;

    #[tokio::test]
    async fn searches_seeded_listings() {
        let api = Api::new();

        let (status, page) = api
            .call::<Value>(
                Method::GET,
                "/api/listings?dealType=sale&sort=price_asc",
                None,
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["number"], 1);
        let items = page["items"].as_array().unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|l| l["dealType"] == "sale"));
        assert!(items.iter().all(|l| l["status"] == "active"));
    }

    #[tokio::test]
    async fn creates_and_updates_listing() {
        let api = Api::new();

        let (status, created) = api
            .call::<Value>(
                Method::POST,
                "/api/listings",
                Some(json!({
                    "title": "Sunny loft",
                    "price": "70000RUB",
                    "pricePeriod": "month",
                    "propertyType": "apartment",
                    "location": "kazan",
                    "floor": 4,
                    "totalFloors": 9,
                    "images": [{
                        "name": "a.png",
                        "contentType": "image/png",
                        "size": 10,
                    }, {
                        "name": "b.gif",
                        "contentType": "image/gif",
                        "size": 10,
                    }],
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "draft");
        assert_eq!(created["images"].as_array().unwrap().len(), 1);

        let id = created["id"].as_str().unwrap();
        let (status, updated) = api
            .call::<Value>(
                Method::PATCH,
                &format!("/api/listings/{id}"),
                Some(json!({"status": "active", "description": null})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "active");
        assert_eq!(updated["title"], "Sunny loft");

        let (status, found) = api
            .call::<Value>(Method::GET, &format!("/api/listings/{id}"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["id"], id);
    }

    #[tokio::test]
    async fn reports_errors() {
        let api = Api::new();

        let (status, err) = api
            .call::<Value>(
                Method::GET,
                "/api/listings/5b7a0e6c-3d3c-4ff4-9a1e-2a3f8d1c0b99",
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["code"], "LISTING_NOT_FOUND");

        let (status, err) = api
            .call::<Value>(Method::GET, "/api/listings/not-an-id", None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "BAD_REQUEST");

        let (status, err) = api
            .call::<Value>(
                Method::POST,
                "/api/listings",
                Some(json!({
                    "title": "Free flat",
                    "price": "0RUB",
                    "propertyType": "apartment",
                    "location": "kazan",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err["code"], "NON_POSITIVE_PRICE");
    }
}
