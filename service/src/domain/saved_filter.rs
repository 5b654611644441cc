//! [`SavedFilter`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xxhash_rust::xxh3;

use super::search_params::SearchParams;

/// Search filter saved by a user for later reuse.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilter {
    /// ID of this [`SavedFilter`].
    pub id: Id,

    /// [`Name`] of this [`SavedFilter`].
    pub name: Name,

    /// Saved [`Query`].
    pub query: Query,

    /// [`Fingerprint`] of the saved [`Query`].
    pub fingerprint: Fingerprint,

    /// Number of listings matching this [`SavedFilter`] on the last
    /// refresh.
    pub result_count: usize,

    /// Number of matching listings created since the refresh before the
    /// last one.
    pub new_count: usize,

    /// [`DateTime`] when this [`SavedFilter`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`SavedFilter`] was modified the last time.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub updated_at: ModificationDateTime,

    /// [`DateTime`] when counters of this [`SavedFilter`] were refreshed the
    /// last time.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub refreshed_at: RefreshDateTime,
}

impl SavedFilter {
    /// Returns [`SearchParams`] of this [`SavedFilter`].
    #[must_use]
    pub fn search_params(&self) -> SearchParams {
        SearchParams::from_query(self.query.as_ref())
    }
}

/// ID of a [`SavedFilter`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a [`SavedFilter`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.chars().count() <= 100
    }
}

impl std::str::FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim()).ok_or("invalid `Name`")
    }
}

impl TryFrom<String> for Name {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

/// Canonical URL query string of saved [`SearchParams`], without a page
/// number.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[serde(from = "String", into = "String")]
pub struct Query(String);

impl From<&SearchParams> for Query {
    fn from(params: &SearchParams) -> Self {
        Self(params.without_page().to_query())
    }
}

impl From<String> for Query {
    fn from(query: String) -> Self {
        (&SearchParams::from_query(&query)).into()
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.0
    }
}

/// Fingerprint of a [`Query`] used for deduplication.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Fingerprint(Uuid);

impl Fingerprint {
    /// Calculates the [`Fingerprint`] of the provided [`Query`].
    #[must_use]
    pub fn of(query: &Query) -> Self {
        Self(Uuid::from_u128(xxh3::xxh3_128(query.0.as_bytes())))
    }
}

/// [`DateTime`] when a [`SavedFilter`] was created.
pub type CreationDateTime = DateTimeOf<(SavedFilter, unit::Creation)>;

/// [`DateTime`] when a [`SavedFilter`] was modified.
pub type ModificationDateTime = DateTimeOf<(SavedFilter, unit::Modification)>;

/// [`DateTime`] when [`SavedFilter`] counters were refreshed.
pub type RefreshDateTime = DateTimeOf<(SavedFilter, unit::Refresh)>;
