//! [`SearchParams`] definitions and their URL query string representation.

use std::{fmt, str::FromStr};

use common::{define_kind, Date};
use itertools::Itertools as _;
use rust_decimal::Decimal;
use url::form_urlencoded;

use super::listing::{
    Amenity, BuildingType, DealType, LocationId, PricePeriod, PropertyType,
    Utility,
};

define_kind! {
    #[doc = "Order of search results."]
    enum SortOrder {
        #[doc = "Most recently created first."]
        Newest = 1,

        #[doc = "Cheapest first."]
        PriceAsc = 2,

        #[doc = "Most expensive first."]
        PriceDesc = 3,
    }
}

/// Value of a single [`SearchParams`] field in a URL query string.
pub trait Param: Sized {
    /// Decodes the value from all the raw values of its key, in the order
    /// they appear in the query.
    ///
    /// Malformed input falls back to the default value.
    fn decode(raw: &[&str]) -> Self;

    /// Encodes the value into its raw representation.
    ///
    /// [`None`] means the value is empty and its key is omitted.
    fn encode(&self) -> Option<String>;
}

impl<T> Param for Option<T>
where
    T: FromStr + fmt::Display,
{
    fn decode(raw: &[&str]) -> Self {
        raw.last()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }

    fn encode(&self) -> Option<String> {
        self.as_ref().map(ToString::to_string)
    }
}

impl<T> Param for Vec<T>
where
    T: FromStr + fmt::Display + PartialEq,
{
    fn decode(raw: &[&str]) -> Self {
        let mut items = Vec::new();
        for item in raw
            .iter()
            .flat_map(|s| s.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            if let Ok(item) = item.parse::<T>() {
                if !items.contains(&item) {
                    items.push(item);
                }
            }
        }
        items
    }

    fn encode(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.iter().join(","))
    }
}

impl Param for bool {
    fn decode(raw: &[&str]) -> Self {
        raw.last().is_some_and(|s| {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true")
        })
    }

    fn encode(&self) -> Option<String> {
        self.then(|| "true".to_owned())
    }
}

impl Param for DealType {
    fn decode(raw: &[&str]) -> Self {
        raw.last()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_default()
    }

    fn encode(&self) -> Option<String> {
        (*self != Self::default()).then(|| self.to_string())
    }
}

/// Defines [`SearchParams`] and its [`Patch`] from the list of fields and
/// their URL query keys.
macro_rules! define_search_params {
    (
        $(
            #[doc = $doc:literal]
            $field:ident: $ty:ty = $key:literal
        ),* $(,)?
    ) => {
        /// Flat filter state, stored in a URL query string.
        ///
        /// Absent keys and malformed values result in default (empty) fields.
        #[derive(Clone, Debug, Default, Eq, PartialEq)]
        pub struct SearchParams {
            $(
                #[doc = $doc]
                pub $field: $ty,
            )*
        }

        /// Partial update of [`SearchParams`].
        ///
        /// [`None`] leaves the field untouched.
        #[derive(Clone, Debug, Default, Eq, PartialEq)]
        pub struct Patch {
            $(
                #[doc = $doc]
                pub $field: Option<$ty>,
            )*
        }

        impl SearchParams {
            /// URL query keys of [`SearchParams`] in their canonical order.
            pub const KEYS: &'static [&'static str] = &[$($key),*];

            /// Parses [`SearchParams`] from the provided URL query string.
            ///
            /// The leading `?` is optional. Unknown keys are ignored.
            #[must_use]
            pub fn from_query(query: &str) -> Self {
                let pairs = form_urlencoded::parse(
                    query.trim_start_matches('?').as_bytes(),
                )
                .collect::<Vec<_>>();
                let values_of = |key: &str| {
                    pairs
                        .iter()
                        .filter(|(k, _)| k == key)
                        .map(|(_, v)| v.as_ref())
                        .collect::<Vec<_>>()
                };

                Self {
                    $(
                        $field: <$ty as Param>::decode(&values_of($key)),
                    )*
                }
            }

            /// Serializes these [`SearchParams`] into a canonical URL query
            /// string (without the leading `?`).
            ///
            /// Empty fields are omitted.
            #[must_use]
            pub fn to_query(&self) -> String {
                let mut query = form_urlencoded::Serializer::new(String::new());
                $(
                    if let Some(value) = Param::encode(&self.$field) {
                        _ = query.append_pair($key, &value);
                    }
                )*
                query.finish()
            }

            /// Returns new [`SearchParams`] with the provided [`Patch`]
            /// applied.
            #[must_use]
            pub fn merge(&self, patch: Patch) -> Self {
                Self {
                    $(
                        $field: patch
                            .$field
                            .unwrap_or_else(|| self.$field.clone()),
                    )*
                }
            }
        }

        impl Patch {
            /// Combines this [`Patch`] with the `other` one, fields of the
            /// `other` taking precedence.
            #[must_use]
            pub fn and(self, other: Self) -> Self {
                Self {
                    $(
                        $field: other.$field.or(self.$field),
                    )*
                }
            }

            /// Indicates whether this [`Patch`] doesn't update anything.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }
        }
    };
}

define_search_params! {
    #[doc = "[`DealType`] to search for."]
    deal_type: DealType = "dealType",

    #[doc = "[`LocationId`] to search in."]
    location: Option<LocationId> = "location",

    #[doc = "[`PropertyType`]s to search for. Empty means any."]
    property_types: Vec<PropertyType> = "propertyType",

    #[doc = "Minimum price."]
    price_min: Option<Decimal> = "priceMin",

    #[doc = "Maximum price."]
    price_max: Option<Decimal> = "priceMax",

    #[doc = "[`PricePeriod`] of a rent price."]
    price_period: Option<PricePeriod> = "pricePeriod",

    #[doc = "Minimum total area, in square meters."]
    area_min: Option<u32> = "areaMin",

    #[doc = "Maximum total area, in square meters."]
    area_max: Option<u32> = "areaMax",

    #[doc = "Minimum living area, in square meters."]
    living_area_min: Option<u32> = "livingAreaMin",

    #[doc = "Minimum kitchen area, in square meters."]
    kitchen_area_min: Option<u32> = "kitchenAreaMin",

    #[doc = "Minimum land area, in ares."]
    land_area_min: Option<u32> = "landAreaMin",

    #[doc = "Maximum land area, in ares."]
    land_area_max: Option<u32> = "landAreaMax",

    #[doc = "Number of bedrooms."]
    bedrooms: Option<u8> = "bedrooms",

    #[doc = "Number of bathrooms."]
    bathrooms: Option<u8> = "bathrooms",

    #[doc = "Indicator whether numbers of rooms must match exactly, rather \
             than be a minimum."]
    exact_match: bool = "exactMatch",

    #[doc = "Minimum floor."]
    floor_min: Option<u16> = "floorMin",

    #[doc = "Maximum floor."]
    floor_max: Option<u16> = "floorMax",

    #[doc = "Indicator whether the first floor is excluded."]
    not_first_floor: bool = "notFirstFloor",

    #[doc = "Indicator whether the last floor is excluded."]
    not_last_floor: bool = "notLastFloor",

    #[doc = "[`BuildingType`]s to search for. Empty means any."]
    building_types: Vec<BuildingType> = "buildingType",

    #[doc = "Minimum year the building was built in."]
    year_built_min: Option<u16> = "yearBuiltMin",

    #[doc = "Maximum year the building was built in."]
    year_built_max: Option<u16> = "yearBuiltMax",

    #[doc = "[`Amenity`]s that must be present."]
    amenities: Vec<Amenity> = "amenities",

    #[doc = "[`Utility`]s that must be connected."]
    utilities: Vec<Utility> = "utilities",

    #[doc = "Indicator whether pets must be allowed."]
    pets_allowed: bool = "petsAllowed",

    #[doc = "Indicator whether kids must be allowed."]
    kids_allowed: bool = "kidsAllowed",

    #[doc = "Indicator whether a mortgage must be available."]
    mortgage: bool = "mortgage",

    #[doc = "Indicator whether only new buildings are searched for."]
    new_building: bool = "newBuilding",

    #[doc = "[`Date`] the property must be available by."]
    available_from: Option<Date> = "availableFrom",

    #[doc = "[`SortOrder`] of the results. [`None`] keeps the catalog order."]
    sort: Option<SortOrder> = "sort",

    #[doc = "1-based number of the results page."]
    page: Option<u32> = "page",
}

impl SearchParams {
    /// Returns these [`SearchParams`] with every filter removed.
    ///
    /// [`SortOrder`] is kept, as it's not a filter.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            sort: self.sort,
            ..Self::default()
        }
    }

    /// Returns these [`SearchParams`] without the page number.
    #[must_use]
    pub fn without_page(&self) -> Self {
        Self {
            page: None,
            ..self.clone()
        }
    }
}
