//! Filter value access and aggregation over a [`Store`].

use serde::Serialize;

use crate::{
    domain::{
        filter::{
            descriptor, Chip, FilterDescriptor, FilterId, FilterValue,
            FilterValues, Part,
        },
        listing::DealType,
        Patch, SearchParams,
    },
    store::Store,
};

/// Returns the current [`FilterValue`] of the provided [`FilterId`].
#[must_use]
pub fn get_value(store: &Store, id: FilterId) -> FilterValue {
    FilterValues::from(store.search_params()).get(id)
}

/// Returns the current [`FilterValue`] of the filter with the provided
/// string key.
///
/// [`None`] is returned for an unknown key.
#[must_use]
pub fn get_value_by_key(store: &Store, key: &str) -> Option<FilterValue> {
    key.parse().ok().map(|id| get_value(store, id))
}

/// Sets the provided [`FilterValue`].
///
/// Filters inapplicable to the resulting [`PropertyType`]s and [`DealType`]
/// are reset within the same history entry, so a value of an inapplicable
/// filter never reaches the URL.
///
/// [`PropertyType`]: crate::domain::listing::PropertyType
pub fn set_value(store: &mut Store, value: FilterValue) -> &SearchParams {
    let patch = value.into_patch();
    let next = store.search_params().merge(patch.clone());
    store.set_search_params(patch.and(reset_inapplicable(&next)))
}

/// Sets the value of the filter with the provided string key from its JSON
/// payload.
///
/// Returns `false` and does nothing if the key is unknown or the payload
/// doesn't fit the filter.
pub fn set_value_by_key(
    store: &mut Store,
    key: &str,
    payload: serde_json::Value,
) -> bool {
    let Ok(id) = key.parse::<FilterId>() else {
        tracing::debug!(key, "unknown filter is not set");
        return false;
    };
    let value = serde_json::json!({ "id": id, "value": payload });
    match serde_json::from_value::<FilterValue>(value) {
        Ok(value) => {
            _ = set_value(store, value);
            true
        }
        Err(e) => {
            tracing::debug!(%id, "invalid filter value is not set: {e}");
            false
        }
    }
}

/// Resets the filter with the provided [`FilterId`] to its empty value.
pub fn clear(store: &mut Store, id: FilterId) -> &SearchParams {
    set_value(store, FilterValue::empty(id))
}

/// Resets the filter with the provided string key to its empty value.
///
/// Returns `false` and does nothing if the key is unknown.
pub fn clear_by_key(store: &mut Store, key: &str) -> bool {
    let Ok(id) = key.parse() else {
        tracing::debug!(key, "unknown filter is not cleared");
        return false;
    };
    _ = clear(store, id);
    true
}

/// Clears the provided [`Part`] of the filter with the provided
/// [`FilterId`], keeping its other parts.
pub fn clear_part<'s>(
    store: &'s mut Store,
    id: FilterId,
    part: &Part,
) -> &'s SearchParams {
    let value = get_value(store, id).without(part);
    set_value(store, value)
}

/// Returns a [`Patch`] resetting every filter inapplicable to the
/// [`PropertyType`]s and [`DealType`] of the provided [`SearchParams`].
///
/// [`PricePeriod`] is reset as well, unless it's a rent.
///
/// [`PricePeriod`]: crate::domain::listing::PricePeriod
/// [`PropertyType`]: crate::domain::listing::PropertyType
#[must_use]
pub fn reset_inapplicable(params: &SearchParams) -> Patch {
    let mut patch = descriptor::DESCRIPTORS
        .iter()
        .filter(|d| !d.applies_to(&params.property_types, params.deal_type))
        .map(|d| FilterValue::empty(d.id).into_patch())
        .fold(Patch::default(), Patch::and);
    if params.deal_type != DealType::Rent {
        patch.price_period = Some(None);
    }
    patch
}

/// Returns [`FilterId`]s of the applicable filters being active, in display
/// order.
#[must_use]
pub fn active(params: &SearchParams) -> Vec<FilterId> {
    let values = FilterValues::from(params);
    descriptor::applicable(&params.property_types, params.deal_type)
        .into_iter()
        .map(|d| d.id)
        .filter(|id| values.get(*id).is_active())
        .collect()
}

/// Returns [`Chip`]s of the active filters, in display order.
#[must_use]
pub fn chips(params: &SearchParams) -> Vec<Chip> {
    let values = FilterValues::from(params);
    active(params)
        .into_iter()
        .flat_map(|id| Chip::all_of(&values.get(id)))
        .collect()
}

/// Aggregated state of all the filters.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Applicable [`FilterDescriptor`]s.
    pub applicable: Vec<&'static FilterDescriptor>,

    /// Applicable [`FilterDescriptor`]s shown in the mobile bar.
    pub mobile_bar: Vec<&'static FilterDescriptor>,

    /// Applicable [`FilterDescriptor`]s shown in the popup.
    pub popup: Vec<&'static FilterDescriptor>,

    /// Current [`FilterValues`].
    pub values: FilterValues,

    /// [`FilterId`]s of the active filters.
    pub active: Vec<FilterId>,

    /// [`Chip`]s of the active filters.
    pub chips: Vec<Chip>,
}

impl From<&SearchParams> for FilterState {
    fn from(params: &SearchParams) -> Self {
        let (types, deal) = (&params.property_types, params.deal_type);
        Self {
            applicable: descriptor::applicable(types, deal),
            mobile_bar: descriptor::mobile_bar(types, deal),
            popup: descriptor::popup(types, deal),
            values: FilterValues::from(params),
            active: active(params),
            chips: chips(params),
        }
    }
}
