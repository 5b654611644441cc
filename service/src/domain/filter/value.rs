//! [`FilterValue`] definitions.

use std::fmt;

use common::{define_kind, Date};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    listing::{
        Amenity, BuildingType, DealType, LocationId, PricePeriod, PropertyType,
        Utility,
    },
    search_params::{Patch, SearchParams},
};

use super::FilterId;

/// Composite value of a single filter.
///
/// Serialized as `{"id": "<filter ID>", "value": <payload>}`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "id", content = "value", rename_all = "camelCase")]
pub enum FilterValue {
    /// [`DealType`] to search for.
    DealType(DealType),

    /// [`LocationId`] to search in.
    Location(Option<LocationId>),

    /// [`PropertyType`]s to search for.
    PropertyType(Vec<PropertyType>),

    /// [`PriceRange`] to search in.
    Price(PriceRange),

    /// [`AreaRange`] to search in.
    Area(AreaRange),

    /// Land area [`Range`] to search in, in ares.
    LandArea(Range<u32>),

    /// [`BedsBaths`] to search for.
    BedsBaths(BedsBaths),

    /// [`FloorRange`] to search in.
    Floor(FloorRange),

    /// [`Building`] requirements.
    Building(Building),

    /// [`Amenity`]s that must be present.
    Amenities(Vec<Amenity>),

    /// [`Utility`]s that must be connected.
    Utilities(Vec<Utility>),

    /// [`Conditions`] that must be allowed.
    Conditions(Conditions),

    /// [`Financing`] options that must be available.
    Financing(Financing),

    /// [`Date`] the property must be available by.
    Availability(Option<Date>),
}

/// Inclusive range with optional bounds.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Range<T> {
    /// Lower bound.
    pub min: Option<T>,

    /// Upper bound.
    pub max: Option<T>,
}

/// Price range of a [`FilterValue::Price`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct PriceRange {
    /// Minimum price.
    pub min: Option<Decimal>,

    /// Maximum price.
    pub max: Option<Decimal>,

    /// [`PricePeriod`] of a rent price.
    pub period: Option<PricePeriod>,
}

/// Area range of a [`FilterValue::Area`], in square meters.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AreaRange {
    /// Minimum total area.
    pub min: Option<u32>,

    /// Maximum total area.
    pub max: Option<u32>,

    /// Minimum living area.
    pub living_min: Option<u32>,

    /// Minimum kitchen area.
    pub kitchen_min: Option<u32>,
}

/// Numbers of rooms of a [`FilterValue::BedsBaths`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BedsBaths {
    /// Number of bedrooms.
    pub bedrooms: Option<u8>,

    /// Number of bathrooms.
    pub bathrooms: Option<u8>,

    /// Indicator whether the numbers must match exactly.
    pub exact_match: bool,
}

/// Floor range of a [`FilterValue::Floor`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FloorRange {
    /// Minimum floor.
    pub min: Option<u16>,

    /// Maximum floor.
    pub max: Option<u16>,

    /// Indicator whether the first floor is excluded.
    pub not_first: bool,

    /// Indicator whether the last floor is excluded.
    pub not_last: bool,
}

/// Building requirements of a [`FilterValue::Building`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Building {
    /// Allowed [`BuildingType`]s. Empty means any.
    pub types: Vec<BuildingType>,

    /// Minimum year the building was built in.
    pub year_min: Option<u16>,

    /// Maximum year the building was built in.
    pub year_max: Option<u16>,
}

/// Living conditions of a [`FilterValue::Conditions`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Conditions {
    /// Indicator whether pets must be allowed.
    pub pets_allowed: bool,

    /// Indicator whether kids must be allowed.
    pub kids_allowed: bool,
}

/// Financing options of a [`FilterValue::Financing`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Financing {
    /// Indicator whether a mortgage must be available.
    pub mortgage: bool,

    /// Indicator whether only new buildings are searched for.
    pub new_building: bool,
}

define_kind! {
    #[doc = "Component of a composite [`FilterValue`]."]
    #[case = "camelCase"]
    enum Field {
        #[doc = "Lower bound of a range."]
        Min = 1,

        #[doc = "Upper bound of a range."]
        Max = 2,

        #[doc = "Price period."]
        Period = 3,

        #[doc = "Minimum living area."]
        LivingMin = 4,

        #[doc = "Minimum kitchen area."]
        KitchenMin = 5,

        #[doc = "Number of bedrooms."]
        Bedrooms = 6,

        #[doc = "Number of bathrooms."]
        Bathrooms = 7,

        #[doc = "Exact match of room numbers."]
        ExactMatch = 8,

        #[doc = "Exclusion of the first floor."]
        NotFirst = 9,

        #[doc = "Exclusion of the last floor."]
        NotLast = 10,

        #[doc = "Minimum year of construction."]
        YearMin = 11,

        #[doc = "Maximum year of construction."]
        YearMax = 12,

        #[doc = "Pets permission."]
        PetsAllowed = 13,

        #[doc = "Kids permission."]
        KidsAllowed = 14,

        #[doc = "Mortgage availability."]
        Mortgage = 15,

        #[doc = "New building requirement."]
        NewBuilding = 16,
    }
}

/// Addressable part of a [`FilterValue`].
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "camelCase")]
pub enum Part {
    /// The whole [`FilterValue`].
    Whole,

    /// Single item of an array [`FilterValue`], by its key.
    Item(String),

    /// Single component of a composite [`FilterValue`].
    Field(Field),
}

impl FilterValue {
    /// Returns the [`FilterId`] of this [`FilterValue`].
    #[must_use]
    pub fn id(&self) -> FilterId {
        match self {
            Self::DealType(_) => FilterId::DealType,
            Self::Location(_) => FilterId::Location,
            Self::PropertyType(_) => FilterId::PropertyType,
            Self::Price(_) => FilterId::Price,
            Self::Area(_) => FilterId::Area,
            Self::LandArea(_) => FilterId::LandArea,
            Self::BedsBaths(_) => FilterId::BedsBaths,
            Self::Floor(_) => FilterId::Floor,
            Self::Building(_) => FilterId::Building,
            Self::Amenities(_) => FilterId::Amenities,
            Self::Utilities(_) => FilterId::Utilities,
            Self::Conditions(_) => FilterId::Conditions,
            Self::Financing(_) => FilterId::Financing,
            Self::Availability(_) => FilterId::Availability,
        }
    }

    /// Returns the empty (default) [`FilterValue`] of the provided
    /// [`FilterId`].
    #[must_use]
    pub fn empty(id: FilterId) -> Self {
        match id {
            FilterId::DealType => Self::DealType(DealType::default()),
            FilterId::Location => Self::Location(None),
            FilterId::PropertyType => Self::PropertyType(vec![]),
            FilterId::Price => Self::Price(PriceRange::default()),
            FilterId::Area => Self::Area(AreaRange::default()),
            FilterId::LandArea => Self::LandArea(Range::default()),
            FilterId::BedsBaths => Self::BedsBaths(BedsBaths::default()),
            FilterId::Floor => Self::Floor(FloorRange::default()),
            FilterId::Building => Self::Building(Building::default()),
            FilterId::Amenities => Self::Amenities(vec![]),
            FilterId::Utilities => Self::Utilities(vec![]),
            FilterId::Conditions => Self::Conditions(Conditions::default()),
            FilterId::Financing => Self::Financing(Financing::default()),
            FilterId::Availability => Self::Availability(None),
        }
    }

    /// Indicates whether this [`FilterValue`] differs from the empty one.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self != Self::empty(self.id())
    }

    /// Decomposes this [`FilterValue`] into a [`Patch`] updating every
    /// [`SearchParams`] field it's composed of.
    #[must_use]
    pub fn into_patch(self) -> Patch {
        match self {
            Self::DealType(deal_type) => Patch {
                deal_type: Some(deal_type),
                ..Patch::default()
            },
            Self::Location(location) => Patch {
                location: Some(location),
                ..Patch::default()
            },
            Self::PropertyType(types) => Patch {
                property_types: Some(types),
                ..Patch::default()
            },
            Self::Price(PriceRange { min, max, period }) => Patch {
                price_min: Some(min),
                price_max: Some(max),
                price_period: Some(period),
                ..Patch::default()
            },
            Self::Area(AreaRange {
                min,
                max,
                living_min,
                kitchen_min,
            }) => Patch {
                area_min: Some(min),
                area_max: Some(max),
                living_area_min: Some(living_min),
                kitchen_area_min: Some(kitchen_min),
                ..Patch::default()
            },
            Self::LandArea(Range { min, max }) => Patch {
                land_area_min: Some(min),
                land_area_max: Some(max),
                ..Patch::default()
            },
            Self::BedsBaths(BedsBaths {
                bedrooms,
                bathrooms,
                exact_match,
            }) => Patch {
                bedrooms: Some(bedrooms),
                bathrooms: Some(bathrooms),
                exact_match: Some(exact_match),
                ..Patch::default()
            },
            Self::Floor(FloorRange {
                min,
                max,
                not_first,
                not_last,
            }) => Patch {
                floor_min: Some(min),
                floor_max: Some(max),
                not_first_floor: Some(not_first),
                not_last_floor: Some(not_last),
                ..Patch::default()
            },
            Self::Building(Building {
                types,
                year_min,
                year_max,
            }) => Patch {
                building_types: Some(types),
                year_built_min: Some(year_min),
                year_built_max: Some(year_max),
                ..Patch::default()
            },
            Self::Amenities(amenities) => Patch {
                amenities: Some(amenities),
                ..Patch::default()
            },
            Self::Utilities(utilities) => Patch {
                utilities: Some(utilities),
                ..Patch::default()
            },
            Self::Conditions(Conditions {
                pets_allowed,
                kids_allowed,
            }) => Patch {
                pets_allowed: Some(pets_allowed),
                kids_allowed: Some(kids_allowed),
                ..Patch::default()
            },
            Self::Financing(Financing {
                mortgage,
                new_building,
            }) => Patch {
                mortgage: Some(mortgage),
                new_building: Some(new_building),
                ..Patch::default()
            },
            Self::Availability(date) => Patch {
                available_from: Some(date),
                ..Patch::default()
            },
        }
    }

    /// Returns the active [`Part`]s of this [`FilterValue`].
    ///
    /// Array values have a [`Part::Item`] per item, composite values have a
    /// [`Part::Field`] per non-default component, and scalar values have a
    /// single [`Part::Whole`] when active.
    #[must_use]
    pub fn parts(&self) -> Vec<Part> {
        match self {
            Self::DealType(_) | Self::Location(_) | Self::Availability(_) => {
                if self.is_active() {
                    vec![Part::Whole]
                } else {
                    vec![]
                }
            }
            Self::PropertyType(types) => items(types).collect(),
            Self::Amenities(amenities) => items(amenities).collect(),
            Self::Utilities(utilities) => items(utilities).collect(),
            Self::Price(p) => fields([
                (Field::Min, p.min.is_some()),
                (Field::Max, p.max.is_some()),
                (Field::Period, p.period.is_some()),
            ])
            .collect(),
            Self::Area(a) => fields([
                (Field::Min, a.min.is_some()),
                (Field::Max, a.max.is_some()),
                (Field::LivingMin, a.living_min.is_some()),
                (Field::KitchenMin, a.kitchen_min.is_some()),
            ])
            .collect(),
            Self::LandArea(r) => fields([
                (Field::Min, r.min.is_some()),
                (Field::Max, r.max.is_some()),
            ])
            .collect(),
            Self::BedsBaths(b) => {
                let no_rooms = b.bedrooms.is_none() && b.bathrooms.is_none();
                fields([
                    (Field::Bedrooms, b.bedrooms.is_some()),
                    (Field::Bathrooms, b.bathrooms.is_some()),
                    (Field::ExactMatch, b.exact_match && no_rooms),
                ])
                .collect()
            }
            Self::Floor(f) => fields([
                (Field::Min, f.min.is_some()),
                (Field::Max, f.max.is_some()),
                (Field::NotFirst, f.not_first),
                (Field::NotLast, f.not_last),
            ])
            .collect(),
            Self::Building(b) => items(&b.types)
                .chain(fields([
                    (Field::YearMin, b.year_min.is_some()),
                    (Field::YearMax, b.year_max.is_some()),
                ]))
                .collect(),
            Self::Conditions(c) => fields([
                (Field::PetsAllowed, c.pets_allowed),
                (Field::KidsAllowed, c.kids_allowed),
            ])
            .collect(),
            Self::Financing(f) => fields([
                (Field::Mortgage, f.mortgage),
                (Field::NewBuilding, f.new_building),
            ])
            .collect(),
        }
    }

    /// Returns this [`FilterValue`] with the provided [`Part`] cleared.
    ///
    /// Other items and components are kept. A [`Part`] not belonging to
    /// this [`FilterValue`] leaves it untouched.
    #[must_use]
    pub fn without(self, part: &Part) -> Self {
        let field = match part {
            Part::Whole => return Self::empty(self.id()),
            Part::Item(key) => {
                return match self {
                    Self::PropertyType(types) => {
                        Self::PropertyType(remove_item(types, key))
                    }
                    Self::Amenities(amenities) => {
                        Self::Amenities(remove_item(amenities, key))
                    }
                    Self::Utilities(utilities) => {
                        Self::Utilities(remove_item(utilities, key))
                    }
                    Self::Building(b) => Self::Building(Building {
                        types: remove_item(b.types, key),
                        ..b
                    }),
                    Self::DealType(_)
                    | Self::Location(_)
                    | Self::Price(_)
                    | Self::Area(_)
                    | Self::LandArea(_)
                    | Self::BedsBaths(_)
                    | Self::Floor(_)
                    | Self::Conditions(_)
                    | Self::Financing(_)
                    | Self::Availability(_) => self,
                };
            }
            Part::Field(field) => *field,
        };
        let keep = |f: Field| f != field;

        match self {
            Self::Price(p) => Self::Price(PriceRange {
                min: p.min.filter(|_| keep(Field::Min)),
                max: p.max.filter(|_| keep(Field::Max)),
                period: p.period.filter(|_| keep(Field::Period)),
            }),
            Self::Area(a) => Self::Area(AreaRange {
                min: a.min.filter(|_| keep(Field::Min)),
                max: a.max.filter(|_| keep(Field::Max)),
                living_min: a.living_min.filter(|_| keep(Field::LivingMin)),
                kitchen_min: a.kitchen_min.filter(|_| keep(Field::KitchenMin)),
            }),
            Self::LandArea(r) => Self::LandArea(Range {
                min: r.min.filter(|_| keep(Field::Min)),
                max: r.max.filter(|_| keep(Field::Max)),
            }),
            Self::BedsBaths(b) => {
                let bedrooms = b.bedrooms.filter(|_| keep(Field::Bedrooms));
                let bathrooms = b.bathrooms.filter(|_| keep(Field::Bathrooms));
                // Exact match means nothing once the last rooms number is
                // cleared.
                let had_rooms = b.bedrooms.is_some() || b.bathrooms.is_some();
                let has_rooms = bedrooms.is_some() || bathrooms.is_some();
                Self::BedsBaths(BedsBaths {
                    bedrooms,
                    bathrooms,
                    exact_match: b.exact_match
                        && keep(Field::ExactMatch)
                        && (has_rooms || !had_rooms),
                })
            }
            Self::Floor(f) => Self::Floor(FloorRange {
                min: f.min.filter(|_| keep(Field::Min)),
                max: f.max.filter(|_| keep(Field::Max)),
                not_first: f.not_first && keep(Field::NotFirst),
                not_last: f.not_last && keep(Field::NotLast),
            }),
            Self::Building(b) => Self::Building(Building {
                types: b.types,
                year_min: b.year_min.filter(|_| keep(Field::YearMin)),
                year_max: b.year_max.filter(|_| keep(Field::YearMax)),
            }),
            Self::Conditions(c) => Self::Conditions(Conditions {
                pets_allowed: c.pets_allowed && keep(Field::PetsAllowed),
                kids_allowed: c.kids_allowed && keep(Field::KidsAllowed),
            }),
            Self::Financing(f) => Self::Financing(Financing {
                mortgage: f.mortgage && keep(Field::Mortgage),
                new_building: f.new_building && keep(Field::NewBuilding),
            }),
            Self::DealType(_)
            | Self::Location(_)
            | Self::PropertyType(_)
            | Self::Amenities(_)
            | Self::Utilities(_)
            | Self::Availability(_) => self,
        }
    }
}

/// Returns a [`Part::Item`] for every of the provided `items`.
fn items<T: fmt::Display>(items: &[T]) -> impl Iterator<Item = Part> + '_ {
    items.iter().map(|i| Part::Item(i.to_string()))
}

/// Returns a [`Part::Field`] for every of the provided [`Field`]s being set.
fn fields<const N: usize>(
    fields: [(Field, bool); N],
) -> impl Iterator<Item = Part> {
    fields
        .into_iter()
        .filter_map(|(field, is_set)| is_set.then_some(Part::Field(field)))
}

/// Removes the item with the provided `key` from the `items`.
fn remove_item<T: fmt::Display>(mut items: Vec<T>, key: &str) -> Vec<T> {
    items.retain(|i| i.to_string() != key);
    items
}

/// All the [`FilterValue`]s, projected from [`SearchParams`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterValues {
    /// Value of [`FilterId::DealType`].
    pub deal_type: DealType,

    /// Value of [`FilterId::Location`].
    pub location: Option<LocationId>,

    /// Value of [`FilterId::PropertyType`].
    pub property_type: Vec<PropertyType>,

    /// Value of [`FilterId::Price`].
    pub price: PriceRange,

    /// Value of [`FilterId::Area`].
    pub area: AreaRange,

    /// Value of [`FilterId::LandArea`].
    pub land_area: Range<u32>,

    /// Value of [`FilterId::BedsBaths`].
    pub beds_baths: BedsBaths,

    /// Value of [`FilterId::Floor`].
    pub floor: FloorRange,

    /// Value of [`FilterId::Building`].
    pub building: Building,

    /// Value of [`FilterId::Amenities`].
    pub amenities: Vec<Amenity>,

    /// Value of [`FilterId::Utilities`].
    pub utilities: Vec<Utility>,

    /// Value of [`FilterId::Conditions`].
    pub conditions: Conditions,

    /// Value of [`FilterId::Financing`].
    pub financing: Financing,

    /// Value of [`FilterId::Availability`].
    pub availability: Option<Date>,
}

impl FilterValues {
    /// Returns the [`FilterValue`] of the provided [`FilterId`].
    #[must_use]
    pub fn get(&self, id: FilterId) -> FilterValue {
        match id {
            FilterId::DealType => FilterValue::DealType(self.deal_type),
            FilterId::Location => FilterValue::Location(self.location.clone()),
            FilterId::PropertyType => {
                FilterValue::PropertyType(self.property_type.clone())
            }
            FilterId::Price => FilterValue::Price(self.price),
            FilterId::Area => FilterValue::Area(self.area),
            FilterId::LandArea => FilterValue::LandArea(self.land_area),
            FilterId::BedsBaths => FilterValue::BedsBaths(self.beds_baths),
            FilterId::Floor => FilterValue::Floor(self.floor),
            FilterId::Building => FilterValue::Building(self.building.clone()),
            FilterId::Amenities => {
                FilterValue::Amenities(self.amenities.clone())
            }
            FilterId::Utilities => {
                FilterValue::Utilities(self.utilities.clone())
            }
            FilterId::Conditions => FilterValue::Conditions(self.conditions),
            FilterId::Financing => FilterValue::Financing(self.financing),
            FilterId::Availability => {
                FilterValue::Availability(self.availability)
            }
        }
    }

    /// Iterates over all the [`FilterValue`]s in [`FilterId`] order.
    pub fn iter(&self) -> impl Iterator<Item = FilterValue> + '_ {
        FilterId::ALL.iter().map(|id| self.get(*id))
    }
}

impl From<&SearchParams> for FilterValues {
    fn from(params: &SearchParams) -> Self {
        Self {
            deal_type: params.deal_type,
            location: params.location.clone(),
            property_type: params.property_types.clone(),
            price: PriceRange {
                min: params.price_min,
                max: params.price_max,
                period: params.price_period,
            },
            area: AreaRange {
                min: params.area_min,
                max: params.area_max,
                living_min: params.living_area_min,
                kitchen_min: params.kitchen_area_min,
            },
            land_area: Range {
                min: params.land_area_min,
                max: params.land_area_max,
            },
            beds_baths: BedsBaths {
                bedrooms: params.bedrooms,
                bathrooms: params.bathrooms,
                exact_match: params.exact_match,
            },
            floor: FloorRange {
                min: params.floor_min,
                max: params.floor_max,
                not_first: params.not_first_floor,
                not_last: params.not_last_floor,
            },
            building: Building {
                types: params.building_types.clone(),
                year_min: params.year_built_min,
                year_max: params.year_built_max,
            },
            amenities: params.amenities.clone(),
            utilities: params.utilities.clone(),
            conditions: Conditions {
                pets_allowed: params.pets_allowed,
                kids_allowed: params.kids_allowed,
            },
            financing: Financing {
                mortgage: params.mortgage,
                new_building: params.new_building,
            },
            availability: params.available_from,
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::domain::{
        filter::FilterId,
        listing::{Amenity, BuildingType, PropertyType},
        search_params::SearchParams,
    };

    use super::{
        BedsBaths, Building, Field, FilterValue, FilterValues, Part, PriceRange,
    };

    #[test]
    fn projection_round_trips_for_every_filter() {
        let params = SearchParams::from_query(
            "dealType=sale&location=kazan&propertyType=house,land\
             &priceMin=100&priceMax=200&areaMin=50&kitchenAreaMin=9\
             &landAreaMax=12&bedrooms=2&exactMatch=1&floorMin=2\
             &notLastFloor=true&buildingType=brick&yearBuiltMin=1990\
             &amenities=pool&utilities=gas&petsAllowed=true&mortgage=true\
             &availableFrom=2026-06-01",
        );
        let values = FilterValues::from(&params);

        for id in FilterId::ALL {
            let value = values.get(*id);
            assert_eq!(value.id(), *id);

            let patched = params.merge(value.into_patch());
            assert_eq!(patched, params, "`{id}` value changes params");
        }
    }

    #[test]
    fn empty_values_are_inactive() {
        for id in FilterId::ALL {
            let empty = FilterValue::empty(*id);
            assert!(!empty.is_active(), "`{id}` empty value is active");
            assert!(empty.parts().is_empty());
        }

        let defaults = FilterValues::from(&SearchParams::default());
        assert!(defaults.iter().all(|v| !v.is_active()));
    }

    #[test]
    fn serializes_with_id_and_value() {
        let value = FilterValue::Price(PriceRange {
            min: Some(Decimal::from(10_000)),
            ..PriceRange::default()
        });

        let json = serde_json::to_value(&value).unwrap();

        assert_eq!(json["id"], "price");
        assert_eq!(json["value"]["min"], "10000");

        let parsed: FilterValue = serde_json::from_str(
            r#"{"id":"bedsBaths","value":{"bedrooms":3,"exactMatch":true}}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            FilterValue::BedsBaths(BedsBaths {
                bedrooms: Some(3),
                bathrooms: None,
                exact_match: true,
            }),
        );
    }

    #[test]
    fn array_parts_are_items() {
        let value = FilterValue::Amenities(vec![
            Amenity::Balcony,
            Amenity::AirConditioning,
        ]);

        assert_eq!(
            value.parts(),
            vec![
                Part::Item("balcony".into()),
                Part::Item("air_conditioning".into()),
            ],
        );
        assert_eq!(
            value.without(&Part::Item("balcony".into())),
            FilterValue::Amenities(vec![Amenity::AirConditioning]),
        );
    }

    #[test]
    fn composite_parts_are_fields() {
        let value = FilterValue::Building(Building {
            types: vec![BuildingType::Brick, BuildingType::Panel],
            year_min: Some(2000),
            year_max: None,
        });

        assert_eq!(
            value.parts(),
            vec![
                Part::Item("brick".into()),
                Part::Item("panel".into()),
                Part::Field(Field::YearMin),
            ],
        );
        assert_eq!(
            value.clone().without(&Part::Field(Field::YearMin)),
            FilterValue::Building(Building {
                types: vec![BuildingType::Brick, BuildingType::Panel],
                year_min: None,
                year_max: None,
            }),
        );
        assert_eq!(
            value.without(&Part::Whole),
            FilterValue::empty(FilterId::Building),
        );
    }

    #[test]
    fn clearing_last_room_number_drops_exact_match() {
        let value = FilterValue::BedsBaths(BedsBaths {
            bedrooms: Some(2),
            bathrooms: None,
            exact_match: true,
        });

        assert_eq!(value.parts(), vec![Part::Field(Field::Bedrooms)]);
        assert!(!value.without(&Part::Field(Field::Bedrooms)).is_active());
    }

    #[test]
    fn foreign_parts_are_ignored() {
        let value = FilterValue::PropertyType(vec![PropertyType::Room]);

        assert_eq!(
            value.clone().without(&Part::Field(Field::Min)),
            value.clone(),
        );
        assert_eq!(value.clone().without(&Part::Item("house".into())), value);
    }
}
