//! Filters API.
//!
//! The filters state lives in the URL query string, so every handler accepts
//! the current query string and responds with the new one.

use axum::{
    extract::{rejection::JsonRejection, RawQuery},
    Extension, Json,
};
use serde::Deserialize;
use service::{
    command::{ClearFilterPart, ClearFilters, SetFilterValue},
    domain::{
        filter::{FilterId, Part},
        FilterValue, SearchParams,
    },
    filters::FilterState,
    query, Command as _,
};

use super::QueryString;
use crate::{AsError, Error, Service};

/// Returns the [`FilterState`] described by the URL query string.
#[tracing::instrument(skip_all, fields(query = ?query))]
pub async fn state(
    Extension(service): Extension<Service>,
    RawQuery(query): RawQuery,
) -> Json<FilterState> {
    let params = SearchParams::from_query(query.as_deref().unwrap_or(""));
    service
        .execute(query::filters::State { params })
        .await
        .map(Json)
        .unwrap_or_else(|e| match e {})
}

/// Sets the provided [`FilterValue`] into the URL query string.
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - malformed [`FilterValue`].
#[tracing::instrument(skip_all, fields(query = ?query))]
pub async fn set_value(
    Extension(service): Extension<Service>,
    RawQuery(query): RawQuery,
    body: Result<Json<FilterValue>, JsonRejection>,
) -> Result<Json<QueryString>, Error> {
    let Json(value) = body.map_err(AsError::into_error)?;

    let query = service
        .execute(SetFilterValue {
            query: query.unwrap_or_default(),
            value,
        })
        .await
        .unwrap_or_else(|e| match e {});
    Ok(Json(QueryString { query }))
}

/// Clears all the filters in the URL query string.
#[tracing::instrument(skip_all, fields(query = ?query))]
pub async fn clear(
    Extension(service): Extension<Service>,
    RawQuery(query): RawQuery,
) -> Json<QueryString> {
    let query = service
        .execute(ClearFilters {
            query: query.unwrap_or_default(),
        })
        .await
        .unwrap_or_else(|e| match e {});
    Json(QueryString { query })
}

/// Request body of a filter [`Part`] removal.
#[derive(Clone, Debug, Deserialize)]
pub struct ChipRemoval {
    /// [`FilterId`] of the filter to clear the [`Part`] of.
    pub id: FilterId,

    /// [`Part`] to clear.
    pub part: Part,
}

/// Clears a single [`Part`] of a filter in the URL query string, as
/// removing its chip does.
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - malformed request body.
#[tracing::instrument(skip_all, fields(query = ?query))]
pub async fn clear_part(
    Extension(service): Extension<Service>,
    RawQuery(query): RawQuery,
    body: Result<Json<ChipRemoval>, JsonRejection>,
) -> Result<Json<QueryString>, Error> {
    let Json(ChipRemoval { id, part }) = body.map_err(AsError::into_error)?;

    let query = service
        .execute(ClearFilterPart {
            query: query.unwrap_or_default(),
            id,
            part,
        })
        .await
        .unwrap_or_else(|e| match e {});
    Ok(Json(QueryString { query }))
}
