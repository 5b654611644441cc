//! [`Chip`] definitions.

use std::fmt::Display;

use serde::Serialize;

use super::{
    value::{Field, FilterValue, Part},
    FilterDescriptor, FilterId,
};

/// Removable representation of a single active [`Part`] of a filter.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Chip {
    /// [`FilterId`] of the filter this [`Chip`] belongs to.
    pub id: FilterId,

    /// [`Part`] of the filter this [`Chip`] represents.
    pub part: Part,

    /// Human-readable label of this [`Chip`].
    pub label: String,
}

impl Chip {
    /// Returns [`Chip`]s of every active [`Part`] of the provided
    /// [`FilterValue`].
    #[must_use]
    pub fn all_of(value: &FilterValue) -> Vec<Self> {
        let filter = FilterDescriptor::of(value.id()).label;
        value
            .parts()
            .into_iter()
            .filter_map(|part| {
                let label = describe(value, &part)?;
                Some(Self {
                    id: value.id(),
                    label: format!("{filter}: {label}"),
                    part,
                })
            })
            .collect()
    }
}

/// Describes the [`Part`] of the provided [`FilterValue`].
///
/// [`None`] is returned if the [`Part`] is not set in the [`FilterValue`].
fn describe(value: &FilterValue, part: &Part) -> Option<String> {
    let field = match part {
        Part::Whole => {
            return match value {
                FilterValue::DealType(deal) => Some(deal.to_string()),
                FilterValue::Location(location) => {
                    location.as_ref().map(ToString::to_string)
                }
                FilterValue::Availability(date) => {
                    date.map(|d| d.to_string())
                }
                FilterValue::PropertyType(_)
                | FilterValue::Price(_)
                | FilterValue::Area(_)
                | FilterValue::LandArea(_)
                | FilterValue::BedsBaths(_)
                | FilterValue::Floor(_)
                | FilterValue::Building(_)
                | FilterValue::Amenities(_)
                | FilterValue::Utilities(_)
                | FilterValue::Conditions(_)
                | FilterValue::Financing(_) => None,
            };
        }
        Part::Item(key) => return Some(key.replace('_', " ")),
        Part::Field(field) => *field,
    };

    match (value, field) {
        (FilterValue::Price(p), Field::Min) => from(p.min, ""),
        (FilterValue::Price(p), Field::Max) => up_to(p.max, ""),
        (FilterValue::Price(p), Field::Period) => {
            p.period.map(|period| format!("per {period}"))
        }
        (FilterValue::Area(a), Field::Min) => from(a.min, " m²"),
        (FilterValue::Area(a), Field::Max) => up_to(a.max, " m²"),
        (FilterValue::Area(a), Field::LivingMin) => {
            a.living_min.map(|v| format!("living from {v} m²"))
        }
        (FilterValue::Area(a), Field::KitchenMin) => {
            a.kitchen_min.map(|v| format!("kitchen from {v} m²"))
        }
        (FilterValue::LandArea(r), Field::Min) => from(r.min, " ares"),
        (FilterValue::LandArea(r), Field::Max) => up_to(r.max, " ares"),
        (FilterValue::BedsBaths(b), Field::Bedrooms) => {
            rooms(b.bedrooms, b.exact_match, "bedrooms")
        }
        (FilterValue::BedsBaths(b), Field::Bathrooms) => {
            rooms(b.bathrooms, b.exact_match, "bathrooms")
        }
        (FilterValue::BedsBaths(b), Field::ExactMatch) => {
            b.exact_match.then(|| "exact match".to_owned())
        }
        (FilterValue::Floor(f), Field::Min) => {
            f.min.map(|v| format!("from floor {v}"))
        }
        (FilterValue::Floor(f), Field::Max) => {
            f.max.map(|v| format!("up to floor {v}"))
        }
        (FilterValue::Floor(f), Field::NotFirst) => {
            f.not_first.then(|| "not first floor".to_owned())
        }
        (FilterValue::Floor(f), Field::NotLast) => {
            f.not_last.then(|| "not last floor".to_owned())
        }
        (FilterValue::Building(b), Field::YearMin) => {
            b.year_min.map(|v| format!("built from {v}"))
        }
        (FilterValue::Building(b), Field::YearMax) => {
            b.year_max.map(|v| format!("built up to {v}"))
        }
        (FilterValue::Conditions(c), Field::PetsAllowed) => {
            c.pets_allowed.then(|| "pets allowed".to_owned())
        }
        (FilterValue::Conditions(c), Field::KidsAllowed) => {
            c.kids_allowed.then(|| "kids allowed".to_owned())
        }
        (FilterValue::Financing(f), Field::Mortgage) => {
            f.mortgage.then(|| "mortgage".to_owned())
        }
        (FilterValue::Financing(f), Field::NewBuilding) => {
            f.new_building.then(|| "new building".to_owned())
        }
        _ => None,
    }
}

/// Describes a lower bound.
fn from(bound: Option<impl Display>, unit: &str) -> Option<String> {
    bound.map(|v| format!("from {v}{unit}"))
}

/// Describes an upper bound.
fn up_to(bound: Option<impl Display>, unit: &str) -> Option<String> {
    bound.map(|v| format!("up to {v}{unit}"))
}

/// Describes a number of rooms.
fn rooms(num: Option<u8>, exact: bool, what: &str) -> Option<String> {
    num.map(|n| {
        if exact {
            format!("{n} {what}")
        } else {
            format!("{n}+ {what}")
        }
    })
}

#[cfg(test)]
mod spec {
    use common::Date;
    use rust_decimal::Decimal;

    use crate::domain::{
        filter::{
            value::{BedsBaths, Field, FloorRange, Part, PriceRange},
            FilterId, FilterValue,
        },
        listing::{Amenity, PricePeriod},
    };

    use super::Chip;

    fn labels(value: &FilterValue) -> Vec<String> {
        Chip::all_of(value).into_iter().map(|c| c.label).collect()
    }

    #[test]
    fn inactive_value_has_no_chips() {
        for id in FilterId::ALL {
            assert!(Chip::all_of(&FilterValue::empty(*id)).is_empty());
        }
    }

    #[test]
    fn array_value_has_chip_per_item() {
        let value = FilterValue::Amenities(vec![
            Amenity::AirConditioning,
            Amenity::Pool,
        ]);

        let chips = Chip::all_of(&value);

        assert_eq!(chips.len(), 2);
        assert_eq!(chips[0].id, FilterId::Amenities);
        assert_eq!(chips[0].part, Part::Item("air_conditioning".into()));
        assert_eq!(chips[0].label, "Amenities: air conditioning");
        assert_eq!(chips[1].label, "Amenities: pool");
    }

    #[test]
    fn composite_value_has_chip_per_component() {
        let price = FilterValue::Price(PriceRange {
            min: Some(Decimal::from(10_000)),
            max: Some(Decimal::from(50_000)),
            period: Some(PricePeriod::Month),
        });
        assert_eq!(
            labels(&price),
            vec![
                "Price: from 10000",
                "Price: up to 50000",
                "Price: per month",
            ],
        );

        let floor = FilterValue::Floor(FloorRange {
            min: Some(2),
            not_last: true,
            ..FloorRange::default()
        });
        let chips = Chip::all_of(&floor);
        assert_eq!(chips[1].part, Part::Field(Field::NotLast));
        assert_eq!(
            labels(&floor),
            vec!["Floor: from floor 2", "Floor: not last floor"],
        );
    }

    #[test]
    fn rooms_respect_exact_match() {
        let mut beds_baths = BedsBaths {
            bedrooms: Some(2),
            bathrooms: Some(1),
            exact_match: false,
        };
        assert_eq!(
            labels(&FilterValue::BedsBaths(beds_baths)),
            vec!["Beds & baths: 2+ bedrooms", "Beds & baths: 1+ bathrooms"],
        );

        beds_baths.exact_match = true;
        assert_eq!(
            labels(&FilterValue::BedsBaths(beds_baths)),
            vec!["Beds & baths: 2 bedrooms", "Beds & baths: 1 bathrooms"],
        );
    }

    #[test]
    fn scalar_value_has_whole_chip() {
        let value = FilterValue::Availability(Date::from_ymd(2026, 7, 1));

        let chips = Chip::all_of(&value);

        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].part, Part::Whole);
        assert_eq!(chips[0].label, "Available from: 2026-07-01");
    }
}
