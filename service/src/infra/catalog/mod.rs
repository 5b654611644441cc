//! [`Catalog`] of [`Listing`]s.

use std::{io, path::Path};

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error as StdError, From};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::{
    domain::{listing, Listing, SearchParams},
    infra::Database,
    search,
};

/// Listings seeded into [`Catalog::seeded()`].
const FIXTURES: &[u8] = include_bytes!("fixtures.json");

/// In-memory catalog of [`Listing`]s, standing in for a real data source.
#[derive(Debug, Default)]
pub struct Catalog(RwLock<Vec<Listing>>);

impl Catalog {
    /// Creates a new [`Catalog`] of the provided [`Listing`]s.
    #[must_use]
    pub fn new(listings: Vec<Listing>) -> Self {
        Self(RwLock::new(listings))
    }

    /// Creates a new [`Catalog`] of the built-in sample [`Listing`]s.
    ///
    /// # Errors
    ///
    /// If the built-in [`Listing`]s are malformed.
    pub fn seeded() -> Result<Self, Traced<Error>> {
        Self::from_json(FIXTURES)
    }

    /// Creates a new [`Catalog`] from a JSON array of [`Listing`]s.
    ///
    /// # Errors
    ///
    /// If the JSON is not an array of [`Listing`]s.
    pub fn from_json(json: &[u8]) -> Result<Self, Traced<Error>> {
        let listings = serde_json::from_slice::<Vec<Listing>>(json)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        Ok(Self::new(listings))
    }

    /// Reads a new [`Catalog`] from the JSON file at the provided `path`.
    ///
    /// # Errors
    ///
    /// If the file can't be read or doesn't contain a JSON array of
    /// [`Listing`]s.
    pub async fn from_json_file(
        path: impl AsRef<Path>,
    ) -> Result<Self, Traced<Error>> {
        let json = tokio::fs::read(path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        Self::from_json(&json)
    }
}

/// [`Catalog`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to read [`Listing`]s.
    #[display("Failed to read listings: {_0}")]
    Io(io::Error),

    /// Failed to parse [`Listing`]s.
    #[display("Failed to parse listings: {_0}")]
    Json(serde_json::Error),

    /// [`Listing`] with the same ID exists already.
    #[display("`Listing(id: {_0})` already exists")]
    #[from(ignore)]
    AlreadyExists(#[error(not(source))] listing::Id),

    /// [`Listing`] doesn't exist.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] listing::Id),
}

impl Database<Select<By<Vec<Listing>, SearchParams>>> for Catalog {
    type Ok = Vec<Listing>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, SearchParams>>,
    ) -> Result<Self::Ok, Self::Err> {
        let params = search::applicable(&by.into_inner());
        Ok(self
            .0
            .read()
            .await
            .iter()
            .filter(|l| l.is_published() && search::matches(l, &params))
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Option<Listing>, listing::Id>>> for Catalog {
    type Ok = Option<Listing>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.0.read().await.iter().find(|l| l.id == id).cloned())
    }
}

impl Database<Insert<Listing>> for Catalog {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut listings = self.0.write().await;
        if listings.iter().any(|l| l.id == listing.id) {
            return Err(tracerr::new!(Error::AlreadyExists(listing.id)));
        }
        listings.push(listing);
        Ok(())
    }
}

impl Database<Update<Listing>> for Catalog {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut listings = self.0.write().await;
        let existing = listings
            .iter_mut()
            .find(|l| l.id == listing.id)
            .ok_or_else(|| tracerr::new!(Error::NotExists(listing.id)))?;
        *existing = listing;
        Ok(())
    }
}
