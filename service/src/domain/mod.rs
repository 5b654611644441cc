//! Domain definitions.

pub mod filter;
pub mod listing;
pub mod saved_filter;
pub mod search_params;
pub mod upload;

pub use self::{
    filter::{FilterId, FilterValue},
    listing::Listing,
    saved_filter::SavedFilter,
    search_params::{Patch, SearchParams},
};
