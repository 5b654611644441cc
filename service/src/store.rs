//! [`Store`] of [`SearchParams`] bound to a URL query string.

use crate::domain::{Patch, SearchParams};

/// Query-param store: the single source of truth of filter state.
///
/// Every change producing a different canonical query string becomes a new
/// history entry.
#[derive(Clone, Debug)]
pub struct Store {
    /// Current [`SearchParams`].
    params: SearchParams,

    /// Canonical query strings of the visited states, oldest first.
    history: Vec<String>,
}

impl Store {
    /// Creates a new [`Store`] from the provided URL query string.
    ///
    /// The leading `?` is optional.
    #[must_use]
    pub fn new(query: &str) -> Self {
        let params = SearchParams::from_query(query);
        let canonical = params.to_query();
        Self {
            params: SearchParams::from_query(&canonical),
            history: vec![canonical],
        }
    }

    /// Returns the current [`SearchParams`].
    #[must_use]
    pub fn search_params(&self) -> &SearchParams {
        &self.params
    }

    /// Merges the provided [`Patch`] into the current [`SearchParams`].
    ///
    /// If the [`Patch`] changes anything without setting a page, the page is
    /// reset.
    pub fn set_search_params(&mut self, patch: Patch) -> &SearchParams {
        let sets_page = patch.page.is_some();
        let mut next = self.params.merge(patch);
        if !sets_page && next != self.params {
            next.page = None;
        }
        self.navigate(&next)
    }

    /// Removes every filter from the current [`SearchParams`].
    pub fn clear_search_params(&mut self) -> &SearchParams {
        let next = self.params.cleared();
        self.navigate(&next)
    }

    /// Returns the canonical URL query string of the current state.
    #[must_use]
    pub fn query(&self) -> String {
        self.params.to_query()
    }

    /// Returns to the previous history entry.
    ///
    /// Returns `false` if there is no previous entry.
    pub fn back(&mut self) -> bool {
        if self.history.len() < 2 {
            return false;
        }
        _ = self.history.pop();
        let query = self.history.last().map_or("", String::as_str);
        tracing::debug!(%query, "navigated back");
        self.params = SearchParams::from_query(query);
        true
    }

    /// Returns the history entries, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Navigates to the provided [`SearchParams`], pushing a new history
    /// entry if the canonical query string changes.
    fn navigate(&mut self, next: &SearchParams) -> &SearchParams {
        let query = next.to_query();
        if self.history.last() != Some(&query) {
            tracing::debug!(%query, "navigated");
            self.params = SearchParams::from_query(&query);
            self.history.push(query);
        }
        &self.params
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::domain::{
        listing::{DealType, PropertyType},
        search_params::SortOrder,
        Patch,
    };

    use super::Store;

    #[test]
    fn reads_back_written_values() {
        let mut store = Store::new("?dealType=sale");

        let params = store.set_search_params(Patch {
            price_min: Some(Some(Decimal::from(10_000))),
            property_types: Some(vec![PropertyType::House]),
            mortgage: Some(true),
            ..Patch::default()
        });

        assert_eq!(params.deal_type, DealType::Sale);
        assert_eq!(params.price_min, Some(Decimal::from(10_000)));
        assert_eq!(params.property_types, vec![PropertyType::House]);
        assert!(params.mortgage);
        assert_eq!(
            store.query(),
            "dealType=sale&propertyType=house&priceMin=10000&mortgage=true",
        );
    }

    #[test]
    fn empty_sentinel_removes_key() {
        let mut store = Store::new("bedrooms=2&location=sochi");

        _ = store.set_search_params(Patch {
            bedrooms: Some(None),
            ..Patch::default()
        });

        assert_eq!(store.query(), "location=sochi");
    }

    #[test]
    fn changes_reset_page() {
        let mut store = Store::new("bedrooms=2&page=4");

        _ = store.set_search_params(Patch {
            bedrooms: Some(Some(2)),
            ..Patch::default()
        });
        assert_eq!(store.search_params().page, Some(4));

        _ = store.set_search_params(Patch {
            bedrooms: Some(Some(3)),
            ..Patch::default()
        });
        assert_eq!(store.search_params().page, None);

        _ = store.set_search_params(Patch {
            page: Some(Some(2)),
            ..Patch::default()
        });
        assert_eq!(store.query(), "bedrooms=3&page=2");
    }

    #[test]
    fn records_history_of_changes_only() {
        let mut store = Store::new("");

        _ = store.set_search_params(Patch::default());
        assert_eq!(store.history().len(), 1);

        _ = store.set_search_params(Patch {
            sort: Some(Some(SortOrder::Newest)),
            ..Patch::default()
        });
        _ = store.set_search_params(Patch {
            bathrooms: Some(Some(1)),
            ..Patch::default()
        });
        assert_eq!(
            store.history(),
            ["", "sort=newest", "bathrooms=1&sort=newest"],
        );

        assert!(store.back());
        assert_eq!(store.query(), "sort=newest");
        assert!(store.back());
        assert!(!store.back());
        assert_eq!(store.query(), "");
    }

    #[test]
    fn clearing_keeps_sort() {
        let mut store = Store::new("dealType=sale&bedrooms=1&sort=price_asc");

        let params = store.clear_search_params();

        assert_eq!(params.deal_type, DealType::Rent);
        assert_eq!(params.bedrooms, None);
        assert_eq!(store.query(), "sort=price_asc");
    }

    #[test]
    fn canonicalizes_initial_query() {
        let store = Store::new("?propertyType=room&propertyType=room&foo=bar");

        assert_eq!(store.history(), ["propertyType=room"]);
    }
}
