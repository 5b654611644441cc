//! Service contains the business logic of the application.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod filters;
pub mod infra;
pub mod query;
pub mod search;
pub mod store;

use std::sync::Arc;

use smart_default::SmartDefault;
use tokio::sync::Mutex;

use self::domain::upload::Previews;
#[cfg(doc)]
use self::{
    domain::SavedFilter,
    infra::{Catalog, Database, LocalStorage},
};

pub use self::{command::Command, query::Query, store::Store};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of listings on a search results page.
    #[default(12)]
    pub per_page: usize,

    /// Maximum size of an uploaded image in bytes.
    #[default(10 * 1024 * 1024)]
    pub max_upload_size: u64,
}

/// Domain service.
#[derive(Debug)]
pub struct Service<Db, St> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of listings of this [`Service`] (a [`Catalog`]).
    database: Arc<Db>,

    /// [`Database`] of user data of this [`Service`] (a [`LocalStorage`]).
    storage: Arc<St>,

    /// [`Previews`] of images being uploaded.
    previews: Arc<Previews>,

    /// Serializes read-modify-write [`Command`]s over [`SavedFilter`]s.
    saved_filters: Arc<Mutex<()>>,
}

impl<Db, St> Service<Db, St> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db, storage: St) -> Self {
        Self {
            config,
            database: Arc::new(database),
            storage: Arc::new(storage),
            previews: Arc::default(),
            saved_filters: Arc::default(),
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the listings [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns the user data [`Database`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }

    /// Returns [`Previews`] of this [`Service`].
    #[must_use]
    pub fn previews(&self) -> &Arc<Previews> {
        &self.previews
    }

    /// Returns the lock serializing modifications of [`SavedFilter`]s.
    pub(crate) fn saved_filters_lock(&self) -> &Mutex<()> {
        &self.saved_filters
    }
}

impl<Db, St> Clone for Service<Db, St> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            database: Arc::clone(&self.database),
            storage: Arc::clone(&self.storage),
            previews: Arc::clone(&self.previews),
            saved_filters: Arc::clone(&self.saved_filters),
        }
    }
}
