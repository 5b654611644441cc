//! Filter definitions.

pub mod chip;
pub mod descriptor;
pub mod value;

use common::define_kind;

pub use self::{
    chip::Chip,
    descriptor::{FilterDescriptor, Placement, DESCRIPTORS},
    value::{Field, FilterValue, FilterValues, Part},
};

define_kind! {
    #[doc = "ID of a filter, in display order."]
    #[case = "camelCase"]
    enum FilterId {
        #[doc = "Deal type filter."]
        DealType = 1,

        #[doc = "Location filter."]
        Location = 2,

        #[doc = "Property type filter."]
        PropertyType = 3,

        #[doc = "Price range filter."]
        Price = 4,

        #[doc = "Numbers of bedrooms and bathrooms filter."]
        BedsBaths = 5,

        #[doc = "Area range filter."]
        Area = 6,

        #[doc = "Land area range filter."]
        LandArea = 7,

        #[doc = "Floor filter."]
        Floor = 8,

        #[doc = "Building type and age filter."]
        Building = 9,

        #[doc = "Amenities filter."]
        Amenities = 10,

        #[doc = "Utilities filter."]
        Utilities = 11,

        #[doc = "Living conditions filter."]
        Conditions = 12,

        #[doc = "Financing options filter."]
        Financing = 13,

        #[doc = "Availability date filter."]
        Availability = 14,
    }
}

#[cfg(test)]
mod spec {
    use super::FilterId;

    #[test]
    fn ids_are_camel_case() {
        assert_eq!(FilterId::BedsBaths.to_string(), "bedsBaths");
        assert_eq!(FilterId::DealType.to_string(), "dealType");
        assert_eq!("landArea".parse::<FilterId>(), Ok(FilterId::LandArea));
        assert_eq!(
            serde_json::to_string(&FilterId::PropertyType).unwrap(),
            r#""propertyType""#,
        );
        assert!("unknown".parse::<FilterId>().is_err());
    }
}
