//! [`FilterDescriptor`] definitions.

use common::define_kind;
use serde::Serialize;

use crate::domain::listing::{DealType, PropertyType};

use super::FilterId;

define_kind! {
    #[doc = "Place a filter is shown in."]
    #[case = "camelCase"]
    enum Placement {
        #[doc = "Compact bar of a mobile layout."]
        MobileBar = 1,

        #[doc = "Popup with all the filters."]
        Popup = 2,

        #[doc = "Both the mobile bar and the popup."]
        Both = 3,
    }
}

/// Static description of a filter.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    /// [`FilterId`] of the described filter.
    pub id: FilterId,

    /// Human-readable label.
    pub label: &'static str,

    /// [`PropertyType`]s the filter applies to. [`None`] means any.
    pub property_types: Option<&'static [PropertyType]>,

    /// [`DealType`]s the filter applies to. [`None`] means any.
    pub deal_types: Option<&'static [DealType]>,

    /// [`Placement`] of the filter.
    pub placement: Placement,
}

/// Residential [`PropertyType`]s.
const RESIDENTIAL: &[PropertyType] = &[
    PropertyType::Apartment,
    PropertyType::House,
    PropertyType::Room,
];

/// [`PropertyType`]s located in a building.
const BUILT: &[PropertyType] = &[
    PropertyType::Apartment,
    PropertyType::House,
    PropertyType::Room,
    PropertyType::Commercial,
];

/// All the [`FilterDescriptor`]s, in display order.
pub static DESCRIPTORS: &[FilterDescriptor] = &[
    FilterDescriptor {
        id: FilterId::DealType,
        label: "Deal",
        property_types: None,
        deal_types: None,
        placement: Placement::MobileBar,
    },
    FilterDescriptor {
        id: FilterId::Location,
        label: "Location",
        property_types: None,
        deal_types: None,
        placement: Placement::MobileBar,
    },
    FilterDescriptor {
        id: FilterId::PropertyType,
        label: "Property type",
        property_types: None,
        deal_types: None,
        placement: Placement::MobileBar,
    },
    FilterDescriptor {
        id: FilterId::Price,
        label: "Price",
        property_types: None,
        deal_types: None,
        placement: Placement::Both,
    },
    FilterDescriptor {
        id: FilterId::BedsBaths,
        label: "Beds & baths",
        property_types: Some(&[PropertyType::Apartment, PropertyType::House]),
        deal_types: None,
        placement: Placement::Both,
    },
    FilterDescriptor {
        id: FilterId::Area,
        label: "Area",
        property_types: Some(BUILT),
        deal_types: None,
        placement: Placement::Popup,
    },
    FilterDescriptor {
        id: FilterId::LandArea,
        label: "Land area",
        property_types: Some(&[PropertyType::House, PropertyType::Land]),
        deal_types: None,
        placement: Placement::Popup,
    },
    FilterDescriptor {
        id: FilterId::Floor,
        label: "Floor",
        property_types: Some(&[
            PropertyType::Apartment,
            PropertyType::Room,
            PropertyType::Commercial,
        ]),
        deal_types: None,
        placement: Placement::Popup,
    },
    FilterDescriptor {
        id: FilterId::Building,
        label: "Building",
        property_types: Some(BUILT),
        deal_types: None,
        placement: Placement::Popup,
    },
    FilterDescriptor {
        id: FilterId::Amenities,
        label: "Amenities",
        property_types: Some(RESIDENTIAL),
        deal_types: None,
        placement: Placement::Popup,
    },
    FilterDescriptor {
        id: FilterId::Utilities,
        label: "Utilities",
        property_types: Some(&[PropertyType::Land]),
        deal_types: None,
        placement: Placement::Popup,
    },
    FilterDescriptor {
        id: FilterId::Conditions,
        label: "Conditions",
        property_types: Some(RESIDENTIAL),
        deal_types: Some(&[DealType::Rent]),
        placement: Placement::Popup,
    },
    FilterDescriptor {
        id: FilterId::Financing,
        label: "Financing",
        property_types: Some(&[PropertyType::Apartment, PropertyType::House]),
        deal_types: Some(&[DealType::Sale]),
        placement: Placement::Popup,
    },
    FilterDescriptor {
        id: FilterId::Availability,
        label: "Available from",
        property_types: Some(BUILT),
        deal_types: Some(&[DealType::Rent]),
        placement: Placement::Popup,
    },
];

impl FilterDescriptor {
    /// Returns the [`FilterDescriptor`] of the provided [`FilterId`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn of(id: FilterId) -> &'static Self {
        DESCRIPTORS
            .iter()
            .find(|d| d.id == id)
            .expect("every `FilterId` is described")
    }

    /// Indicates whether the described filter applies to the provided
    /// selection of [`PropertyType`]s and [`DealType`].
    ///
    /// An empty `property_types` selection means any [`PropertyType`], so
    /// passes every restriction.
    #[must_use]
    pub fn applies_to(
        &self,
        property_types: &[PropertyType],
        deal_type: DealType,
    ) -> bool {
        let deal_fits =
            self.deal_types.map_or(true, |d| d.contains(&deal_type));
        let type_fits = self.property_types.map_or(true, |allowed| {
            property_types.is_empty()
                || property_types.iter().any(|t| allowed.contains(t))
        });
        deal_fits && type_fits
    }

    /// Indicates whether the described filter is shown in the mobile bar.
    #[must_use]
    pub fn in_mobile_bar(&self) -> bool {
        matches!(self.placement, Placement::MobileBar | Placement::Both)
    }

    /// Indicates whether the described filter is shown in the popup.
    #[must_use]
    pub fn in_popup(&self) -> bool {
        matches!(self.placement, Placement::Popup | Placement::Both)
    }
}

/// Returns [`FilterDescriptor`]s applicable to the provided selection, in
/// display order.
#[must_use]
pub fn applicable(
    property_types: &[PropertyType],
    deal_type: DealType,
) -> Vec<&'static FilterDescriptor> {
    DESCRIPTORS
        .iter()
        .filter(|d| d.applies_to(property_types, deal_type))
        .collect()
}

/// Returns applicable [`FilterDescriptor`]s shown in the mobile bar.
#[must_use]
pub fn mobile_bar(
    property_types: &[PropertyType],
    deal_type: DealType,
) -> Vec<&'static FilterDescriptor> {
    applicable(property_types, deal_type)
        .into_iter()
        .filter(|d| d.in_mobile_bar())
        .collect()
}

/// Returns applicable [`FilterDescriptor`]s shown in the popup.
#[must_use]
pub fn popup(
    property_types: &[PropertyType],
    deal_type: DealType,
) -> Vec<&'static FilterDescriptor> {
    applicable(property_types, deal_type)
        .into_iter()
        .filter(|d| d.in_popup())
        .collect()
}
