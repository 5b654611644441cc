//! [`Command`] definition.

pub mod clear_filter_part;
pub mod clear_filters;
pub mod create_listing;
pub mod delete_saved_filter;
pub mod refresh_saved_filter;
pub mod rename_saved_filter;
pub mod save_filter;
pub mod set_filter_value;
pub mod update_listing;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    clear_filter_part::ClearFilterPart, clear_filters::ClearFilters,
    create_listing::CreateListing, delete_saved_filter::DeleteSavedFilter,
    refresh_saved_filter::RefreshSavedFilter,
    rename_saved_filter::RenameSavedFilter, save_filter::SaveFilter,
    set_filter_value::SetFilterValue, update_listing::UpdateListing,
};
