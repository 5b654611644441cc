//! Filtering, sorting and pagination of [`Listing`]s.

use std::borrow::Borrow;

use common::Page;

use crate::{
    domain::{
        listing::{DealType, Listing},
        search_params::SortOrder,
        SearchParams,
    },
    filters,
};

/// Returns the [`Listing`]s matching all the applicable filters of the
/// provided [`SearchParams`], preserving their order.
///
/// A [`Listing`] missing an attribute constrained by an active filter doesn't
/// match.
#[must_use]
pub fn filter_listings<'l>(
    listings: &'l [Listing],
    params: &SearchParams,
) -> Vec<&'l Listing> {
    let params = applicable(params);
    listings.iter().filter(|l| matches(l, &params)).collect()
}

/// Returns the provided [`SearchParams`] without the filters inapplicable to
/// their [`PropertyType`]s and [`DealType`].
///
/// Such filters have no chips, so they never narrow the results.
///
/// [`PropertyType`]: crate::domain::listing::PropertyType
#[must_use]
pub fn applicable(params: &SearchParams) -> SearchParams {
    params.merge(filters::reset_inapplicable(params))
}

/// Indicates whether the provided [`Listing`] matches every field of the
/// provided [`SearchParams`].
///
/// The default [`DealType`] is not a constraint, so it matches any deal.
/// Inapplicable filters are not skipped here, see [`applicable()`].
#[must_use]
pub fn matches(listing: &Listing, params: &SearchParams) -> bool {
    let p = params;
    let d = &listing.details;

    (p.deal_type == DealType::default() || listing.deal_type == p.deal_type)
        && p.location.as_ref().map_or(true, |l| *l == listing.location)
        && (p.property_types.is_empty()
            || p.property_types.contains(&listing.property_type))
        && in_range(Some(listing.price.amount), p.price_min, p.price_max)
        && p.price_period.map_or(true, |pp| listing.price_period == Some(pp))
        && in_range(d.area, p.area_min, p.area_max)
        && in_range(d.living_area, p.living_area_min, None)
        && in_range(d.kitchen_area, p.kitchen_area_min, None)
        && in_range(d.land_area, p.land_area_min, p.land_area_max)
        && rooms(d.bedrooms, p.bedrooms, p.exact_match)
        && rooms(d.bathrooms, p.bathrooms, p.exact_match)
        && in_range(d.floor, p.floor_min, p.floor_max)
        && (!p.not_first_floor || d.floor.is_some_and(|f| f > 1))
        && (!p.not_last_floor
            || matches!((d.floor, d.total_floors), (Some(f), Some(t)) if f < t))
        && (p.building_types.is_empty()
            || d.building_type.is_some_and(|t| p.building_types.contains(&t)))
        && in_range(d.year_built, p.year_built_min, p.year_built_max)
        && p.amenities.iter().all(|a| d.amenities.contains(a))
        && p.utilities.iter().all(|u| d.utilities.contains(u))
        && (!p.pets_allowed || d.pets_allowed)
        && (!p.kids_allowed || d.kids_allowed)
        && (!p.mortgage || d.mortgage_available)
        && (!p.new_building || d.new_building)
        && p.available_from.map_or(true, |date| {
            d.available_from.map_or(true, |from| from <= date)
        })
}

/// Checks whether the `value` is within the optional inclusive bounds.
///
/// Any bound set requires the `value` to be present.
fn in_range<T: PartialOrd>(
    value: Option<T>,
    min: Option<T>,
    max: Option<T>,
) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    value.is_some_and(|v| {
        min.map_or(true, |min| v >= min) && max.map_or(true, |max| v <= max)
    })
}

/// Checks whether the number of rooms matches the `required` one, either
/// exactly or as a minimum.
fn rooms(actual: Option<u8>, required: Option<u8>, exact: bool) -> bool {
    match (actual, required) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some(actual), Some(required)) => {
            if exact {
                actual == required
            } else {
                actual >= required
            }
        }
    }
}

/// Sorts the provided [`Listing`]s in the provided [`SortOrder`].
///
/// Sorting is stable, so equal [`Listing`]s keep their relative order.
pub fn sort_listings<L: Borrow<Listing>>(
    listings: &mut [L],
    order: SortOrder,
) {
    let key = |l: &L| l.borrow().price.amount;
    match order {
        SortOrder::Newest => listings.sort_by(|a, b| {
            b.borrow().created_at.cmp(&a.borrow().created_at)
        }),
        SortOrder::PriceAsc => listings.sort_by(|a, b| key(a).cmp(&key(b))),
        SortOrder::PriceDesc => listings.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}

/// Searches the provided [`Listing`]s: filters them, sorts them if a
/// [`SortOrder`] is set and returns the requested [`Page`].
#[must_use]
pub fn search<'l>(
    listings: &'l [Listing],
    params: &SearchParams,
    per_page: usize,
) -> Page<&'l Listing> {
    let mut found = filter_listings(listings, params);
    if let Some(order) = params.sort {
        sort_listings(&mut found, order);
    }
    paginate(found, params, per_page)
}

/// Returns the [`Page`] of the provided `items` requested by the provided
/// [`SearchParams`].
#[must_use]
pub fn paginate<T>(
    items: Vec<T>,
    params: &SearchParams,
    per_page: usize,
) -> Page<T> {
    let page = params
        .page
        .map_or(1, |n| usize::try_from(n).unwrap_or(usize::MAX));
    Page::slice(items, page, per_page)
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::Date;
    use rust_decimal::prelude::ToPrimitive as _;

    use crate::domain::{
        listing::{
            Amenity, BuildingType, DealType, Listing, LocationId,
            PricePeriod, PropertyType,
        },
        search_params::SortOrder,
        SearchParams,
    };

    use super::{filter_listings, search, sort_listings};

    fn prices(listings: &[&Listing]) -> Vec<u32> {
        listings
            .iter()
            .map(|l| l.price.amount.to_u32().unwrap())
            .collect()
    }

    #[test]
    fn default_params_keep_order() {
        let listings = [Listing::sample(3), Listing::sample(1)];

        let found = filter_listings(&listings, &SearchParams::default());

        assert_eq!(prices(&found), vec![3, 1]);
    }

    #[test]
    fn empty_state_keeps_every_listing_in_order() {
        let mut sale = Listing::sample(5);
        sale.deal_type = DealType::Sale;
        let listings = [sale, Listing::sample(1), Listing::sample(3)];

        let found = filter_listings(&listings, &SearchParams::default());

        assert_eq!(prices(&found), vec![5, 1, 3]);
    }

    #[test]
    fn non_default_deal_type_is_applied() {
        let mut sale = Listing::sample(5);
        sale.deal_type = DealType::Sale;
        let listings = [Listing::sample(1), sale];

        let found = filter_listings(
            &listings,
            &SearchParams::from_query("dealType=sale"),
        );

        assert_eq!(prices(&found), vec![5]);
    }

    #[test]
    fn inapplicable_filters_do_not_narrow() {
        let mut land = Listing::sample(7);
        land.property_type = PropertyType::Land;
        land.price_period = None;
        let listings = [land];

        let found = filter_listings(
            &listings,
            &SearchParams::from_query("propertyType=land&bedrooms=2"),
        );
        assert_eq!(prices(&found), vec![7]);

        let found = filter_listings(
            &listings,
            &SearchParams::from_query("propertyType=land&utilities=gas"),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn filters_by_minimum_price() {
        let listings =
            [7_500, 5_200_000, 12_000, 3_100_000].map(Listing::sample);

        let found = filter_listings(
            &listings,
            &SearchParams::from_query("priceMin=10000"),
        );

        assert_eq!(prices(&found), vec![5_200_000, 12_000, 3_100_000]);
    }

    #[test]
    fn missing_attributes_do_not_match() {
        let mut with_area = Listing::sample(2);
        with_area.details.area = Some(45);
        let listings = [Listing::sample(1), with_area];

        let found =
            filter_listings(&listings, &SearchParams::from_query("areaMin=40"));

        assert_eq!(prices(&found), vec![2]);
    }

    #[test]
    fn rooms_match_as_minimum_or_exactly() {
        let listings = [1_u8, 2, 3].map(|n| {
            let mut l = Listing::sample(u32::from(n));
            l.details.bedrooms = Some(n);
            l
        });

        let at_least =
            filter_listings(&listings, &SearchParams::from_query("bedrooms=2"));
        assert_eq!(prices(&at_least), vec![2, 3]);

        let exactly = filter_listings(
            &listings,
            &SearchParams::from_query("bedrooms=2&exactMatch=true"),
        );
        assert_eq!(prices(&exactly), vec![2]);
    }

    #[test]
    fn floor_exclusions() {
        let listings = [(1_u16, 5), (3, 5), (5, 5)].map(|(floor, total)| {
            let mut l = Listing::sample(u32::from(floor));
            l.details.floor = Some(floor);
            l.details.total_floors = Some(total);
            l
        });

        let found = filter_listings(
            &listings,
            &SearchParams::from_query("notFirstFloor=true&notLastFloor=true"),
        );

        assert_eq!(prices(&found), vec![3]);
    }

    #[test]
    fn filters_by_details() {
        let mut matching = Listing::sample(1);
        matching.location = LocationId::new("kazan").unwrap();
        matching.property_type = PropertyType::House;
        matching.price_period = Some(PricePeriod::Month);
        matching.details.building_type = Some(BuildingType::Brick);
        matching.details.year_built = Some(2010);
        matching.details.amenities = vec![Amenity::Pool, Amenity::Parking];
        matching.details.pets_allowed = true;
        matching.details.available_from = Date::from_ymd(2026, 3, 1);

        let mut late = matching.clone();
        late.details.available_from = Date::from_ymd(2026, 5, 1);
        let mut no_pool = matching.clone();
        no_pool.details.amenities = vec![Amenity::Parking];
        let mut elsewhere = matching.clone();
        elsewhere.location = LocationId::new("sochi").unwrap();

        let listings = [late, no_pool, matching, elsewhere];
        let params = SearchParams::from_query(
            "location=kazan&propertyType=house,land&pricePeriod=month\
             &buildingType=brick&yearBuiltMin=2000&amenities=pool\
             &petsAllowed=true&availableFrom=2026-04-01",
        );

        let found = filter_listings(&listings, &params);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].details.available_from, Date::from_ymd(2026, 3, 1));
    }

    #[test]
    fn sorting_is_stable() {
        let mut listings = [3, 1, 3, 2].map(Listing::sample);
        for (i, l) in listings.iter_mut().enumerate() {
            l.created_at = l.created_at + Duration::from_secs(i as u64);
        }
        let first_three = listings[0].id;

        let mut found = filter_listings(&listings, &SearchParams::default());
        sort_listings(&mut found, SortOrder::PriceDesc);
        assert_eq!(prices(&found), vec![3, 3, 2, 1]);
        assert_eq!(found[0].id, first_three);

        sort_listings(&mut found, SortOrder::PriceAsc);
        assert_eq!(prices(&found), vec![1, 2, 3, 3]);
        assert_eq!(found[2].id, first_three);

        sort_listings(&mut found, SortOrder::Newest);
        assert_eq!(prices(&found), vec![2, 3, 1, 3]);
    }

    #[test]
    fn paginates_sorted_results() {
        let listings = (1..=30).map(Listing::sample).collect::<Vec<_>>();

        let page = search(
            &listings,
            &SearchParams::from_query("sort=price_desc&page=2"),
            12,
        );
        assert_eq!(page.number, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 12);
        assert_eq!(prices(&page.items)[0], 18);

        let clamped =
            search(&listings, &SearchParams::from_query("page=99"), 12);
        assert_eq!(clamped.number, 3);
        assert_eq!(prices(&clamped.items), (25..=30).collect::<Vec<u32>>());

        let first = search(&listings, &SearchParams::from_query("page=0"), 12);
        assert_eq!(first.number, 1);
    }
}
