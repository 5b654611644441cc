//! Abstractions for pagination.

use serde::Serialize;

/// Page of items, selected by its 1-based number.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// 1-based number of this [`Page`].
    pub number: usize,

    /// Maximum number of items on a [`Page`].
    pub per_page: usize,

    /// Total number of items on all the pages.
    pub total_items: usize,

    /// Total number of pages, never less than `1`.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slices the provided `items` into a [`Page`] with the requested
    /// 1-based `number`.
    ///
    /// The requested `number` is clamped to `[1, total_pages]`, so `0`
    /// selects the first page and anything beyond the last page selects the
    /// last one. An empty input results in a single empty page. A zero
    /// `per_page` is treated as `1`.
    #[must_use]
    pub fn slice(
        items: impl IntoIterator<Item = T>,
        number: usize,
        per_page: usize,
    ) -> Self {
        let per_page = per_page.max(1);
        let items = items.into_iter().collect::<Vec<_>>();
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page).max(1);
        let number = number.clamp(1, total_pages);

        Self {
            items: items
                .into_iter()
                .skip((number - 1) * per_page)
                .take(per_page)
                .collect(),
            number,
            per_page,
            total_items,
            total_pages,
        }
    }

    /// Indicates whether a [`Page`] exists after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Indicates whether a [`Page`] exists before this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Maps the items of this [`Page`], preserving its position.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let Self {
            items,
            number,
            per_page,
            total_items,
            total_pages,
        } = self;
        Page {
            items: items.into_iter().map(f).collect(),
            number,
            per_page,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Page;

    #[test]
    fn slices_requested_page() {
        let page = Page::slice(1..=10, 2, 4);

        assert_eq!(page.items, vec![5, 6, 7, 8]);
        assert_eq!(page.number, 2);
        assert_eq!(page.total_items, 10);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let last = Page::slice(1..=10, 3, 4);
        assert_eq!(last.items, vec![9, 10]);
        assert!(!last.has_next());
    }

    #[test]
    fn clamps_out_of_range_numbers() {
        let first = Page::slice(1..=10, 0, 4);
        assert_eq!(first.number, 1);
        assert_eq!(first.items, vec![1, 2, 3, 4]);

        let last = Page::slice(1..=10, 42, 4);
        assert_eq!(last.number, 3);
        assert_eq!(last.items, vec![9, 10]);
    }

    #[test]
    fn empty_input_has_single_page() {
        let page = Page::slice(Vec::<u8>::new(), 5, 12);

        assert!(page.items.is_empty());
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn zero_per_page_is_one() {
        let page = Page::slice(["a", "b"], 2, 0);

        assert_eq!(page.items, vec!["b"]);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn maps_items() {
        let page = Page::slice(1..=3, 1, 2).map(|n| n * 10);

        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_pages, 2);
    }
}
