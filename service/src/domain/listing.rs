//! [`Listing`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Property offered for rent or sale.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`], if any.
    #[serde(default)]
    pub description: Option<Description>,

    /// Asking price of this [`Listing`].
    pub price: Money,

    /// [`PricePeriod`] the price is quoted for, if it's a rent.
    #[serde(default)]
    pub price_period: Option<PricePeriod>,

    /// [`PropertyType`] of this [`Listing`].
    pub property_type: PropertyType,

    /// [`DealType`] of this [`Listing`].
    pub deal_type: DealType,

    /// [`LocationId`] this [`Listing`] is located in.
    pub location: LocationId,

    /// Optional [`Details`] of this [`Listing`].
    #[serde(flatten)]
    pub details: Details,

    /// [`Status`] of this [`Listing`].
    pub status: Status,

    /// [`ImageUrl`]s of this [`Listing`].
    #[serde(default)]
    pub images: Vec<ImageUrl>,

    /// [`DateTime`] when this [`Listing`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: CreationDateTime,
}

impl Listing {
    /// Indicates whether this [`Listing`] is visible in search.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == Status::Active
    }
}

/// Optional attributes of a [`Listing`].
///
/// Areas are measured in square meters, except `land_area` measured in ares.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Details {
    /// Total area.
    pub area: Option<u32>,

    /// Living area.
    pub living_area: Option<u32>,

    /// Kitchen area.
    pub kitchen_area: Option<u32>,

    /// Land plot area.
    pub land_area: Option<u32>,

    /// Number of bedrooms.
    pub bedrooms: Option<u8>,

    /// Number of bathrooms.
    pub bathrooms: Option<u8>,

    /// Floor the property is located on.
    pub floor: Option<u16>,

    /// Number of floors in the building.
    pub total_floors: Option<u16>,

    /// [`BuildingType`] of the building.
    pub building_type: Option<BuildingType>,

    /// Year the building was built in.
    pub year_built: Option<u16>,

    /// [`Amenity`]s available.
    pub amenities: Vec<Amenity>,

    /// [`Utility`]s connected.
    pub utilities: Vec<Utility>,

    /// Indicator whether pets are allowed.
    pub pets_allowed: bool,

    /// Indicator whether kids are allowed.
    pub kids_allowed: bool,

    /// Indicator whether a mortgage is available.
    pub mortgage_available: bool,

    /// Indicator whether the building is a new one.
    pub new_building: bool,

    /// [`Date`] the property becomes available from. [`None`] means now.
    pub available_from: Option<Date>,
}

impl Details {
    /// Checks whether these [`Details`] are consistent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let floor_fits = match (self.floor, self.total_floors) {
            (Some(floor), Some(total)) => floor >= 1 && floor <= total,
            (Some(floor), None) => floor >= 1,
            (None, _) => true,
        };
        let areas_fit = self.area.map_or(true, |total| {
            self.living_area.map_or(true, |a| a <= total)
                && self.kitchen_area.map_or(true, |a| a <= total)
        });
        floor_fits && areas_fit
    }
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Title of a [`Listing`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 200
    }
}

impl std::str::FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

impl TryFrom<String> for Title {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

/// Description of a [`Listing`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= 5000
    }
}

impl TryFrom<String> for Description {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

impl From<Description> for String {
    fn from(text: Description) -> Self {
        text.0
    }
}

/// ID of a location (city or district) a [`Listing`] is located in.
///
/// Slug of lowercase ASCII letters, digits and dashes.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct LocationId(String);

impl LocationId {
    /// Creates a new [`LocationId`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`LocationId`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        !id.is_empty()
            && id.len() <= 64
            && id.bytes().all(|b| {
                b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'
            })
    }
}

impl std::str::FromStr for LocationId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim().to_ascii_lowercase()).ok_or("invalid `LocationId`")
    }
}

impl TryFrom<String> for LocationId {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LocationId> for String {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

/// URL of a [`Listing`] image.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(forward)]
pub struct ImageUrl(String);

define_kind! {
    #[doc = "Kind of a deal a [`Listing`] is offered for."]
    enum DealType {
        #[doc = "Property is rented out."]
        Rent = 1,

        #[doc = "Property is sold."]
        Sale = 2,
    }
}

impl Default for DealType {
    fn default() -> Self {
        Self::Rent
    }
}

define_kind! {
    #[doc = "Type of a property."]
    enum PropertyType {
        #[doc = "An apartment in a building."]
        Apartment = 1,

        #[doc = "A detached house."]
        House = 2,

        #[doc = "A room in an apartment."]
        Room = 3,

        #[doc = "A commercial premise."]
        Commercial = 4,

        #[doc = "A land plot."]
        Land = 5,
    }
}

define_kind! {
    #[doc = "Period a rent price is quoted for."]
    enum PricePeriod {
        #[doc = "Price per month."]
        Month = 1,

        #[doc = "Price per day."]
        Day = 2,
    }
}

define_kind! {
    #[doc = "Construction type of a building."]
    enum BuildingType {
        #[doc = "Brick building."]
        Brick = 1,

        #[doc = "Panel building."]
        Panel = 2,

        #[doc = "Monolithic building."]
        Monolith = 3,

        #[doc = "Block building."]
        Block = 4,

        #[doc = "Wooden building."]
        Wood = 5,
    }
}

define_kind! {
    #[doc = "Amenity of a property."]
    enum Amenity {
        #[doc = "Furnished."]
        Furniture = 1,

        #[doc = "Household appliances."]
        Appliances = 2,

        #[doc = "Internet connection."]
        Internet = 3,

        #[doc = "Air conditioning."]
        AirConditioning = 4,

        #[doc = "Parking space."]
        Parking = 5,

        #[doc = "Balcony or loggia."]
        Balcony = 6,

        #[doc = "Elevator in the building."]
        Elevator = 7,

        #[doc = "Swimming pool."]
        Pool = 8,
    }
}

define_kind! {
    #[doc = "Utility connected to a land plot."]
    enum Utility {
        #[doc = "Electricity."]
        Electricity = 1,

        #[doc = "Water supply."]
        Water = 2,

        #[doc = "Gas supply."]
        Gas = 3,

        #[doc = "Sewerage."]
        Sewerage = 4,
    }
}

define_kind! {
    #[doc = "Status of a [`Listing`]."]
    enum Status {
        #[doc = "Not published yet."]
        Draft = 1,

        #[doc = "Published and visible in search."]
        Active = 2,

        #[doc = "Deal is in progress."]
        Pending = 3,

        #[doc = "Withdrawn from the market."]
        Archived = 4,
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

#[cfg(test)]
impl Listing {
    /// Creates a published rent [`Listing`] of an apartment with the
    /// provided price in rubles.
    pub(crate) fn sample(price: u32) -> Self {
        Self {
            id: Id::new(),
            title: Title::new("Sample listing").unwrap(),
            description: None,
            price: Money {
                amount: price.into(),
                currency: common::money::Currency::Rub,
            },
            price_period: None,
            property_type: PropertyType::Apartment,
            deal_type: DealType::Rent,
            location: LocationId::new("moscow").unwrap(),
            details: Details::default(),
            status: Status::Active,
            images: vec![],
            created_at: CreationDateTime::UNIX_EPOCH,
        }
    }
}
