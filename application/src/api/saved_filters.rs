//! [`SavedFilter`]s API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use service::{
    command::{
        self, DeleteSavedFilter, RefreshSavedFilter, RenameSavedFilter,
        SaveFilter,
    },
    domain::{saved_filter, SavedFilter, SearchParams},
    query, Command as _,
};

use crate::{define_error, AsError, Error, Service};

/// Lists all the [`SavedFilter`]s, newest first.
///
/// # Errors
///
/// If the local storage fails.
#[tracing::instrument(skip_all)]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<SavedFilter>>, Error> {
    service
        .execute(query::saved_filters::List)
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// Request body of a new [`SavedFilter`].
#[derive(Clone, Debug, Deserialize)]
pub struct NewSavedFilter {
    /// [`saved_filter::Name`] of the [`SavedFilter`].
    pub name: saved_filter::Name,

    /// URL query string of the search to save.
    #[serde(default)]
    pub query: String,
}

/// Saves the search described by a URL query string.
///
/// Saving the same search again renames the existing [`SavedFilter`].
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - malformed request body.
#[tracing::instrument(skip_all)]
pub async fn save(
    Extension(service): Extension<Service>,
    body: Result<Json<NewSavedFilter>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedFilter>), Error> {
    let Json(NewSavedFilter { name, query }) =
        body.map_err(AsError::into_error)?;

    let filter = service
        .execute(SaveFilter {
            name,
            params: SearchParams::from_query(&query),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(filter)))
}

/// Request body of a [`SavedFilter`] renaming.
#[derive(Clone, Debug, Deserialize)]
pub struct Renaming {
    /// New [`saved_filter::Name`].
    pub name: saved_filter::Name,
}

/// Renames a [`SavedFilter`].
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - malformed request;
/// - `SAVED_FILTER_NOT_FOUND` - [`SavedFilter`] doesn't exist.
#[tracing::instrument(skip_all)]
pub async fn rename(
    Extension(service): Extension<Service>,
    id: Result<Path<saved_filter::Id>, PathRejection>,
    body: Result<Json<Renaming>, JsonRejection>,
) -> Result<Json<SavedFilter>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;
    let Json(Renaming { name }) = body.map_err(AsError::into_error)?;

    service
        .execute(RenameSavedFilter { id, name })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// Deletes a [`SavedFilter`].
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - malformed ID;
/// - `SAVED_FILTER_NOT_FOUND` - [`SavedFilter`] doesn't exist.
#[tracing::instrument(skip_all)]
pub async fn delete(
    Extension(service): Extension<Service>,
    id: Result<Path<saved_filter::Id>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    service
        .execute(DeleteSavedFilter { id })
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

/// Recounts the [`SavedFilter`] results and its new ones since the previous
/// refresh.
///
/// # Errors
///
/// Possible error codes:
/// - `BAD_REQUEST` - malformed ID;
/// - `SAVED_FILTER_NOT_FOUND` - [`SavedFilter`] doesn't exist.
#[tracing::instrument(skip_all)]
pub async fn refresh(
    Extension(service): Extension<Service>,
    id: Result<Path<saved_filter::Id>, PathRejection>,
) -> Result<Json<SavedFilter>, Error> {
    let Path(id) = id.map_err(AsError::into_error)?;

    service
        .execute(RefreshSavedFilter { id })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

define_error! {
    enum NotFoundError {
        #[code = "SAVED_FILTER_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`SavedFilter` does not exist"]
        SavedFilterNotFound,
    }
}

impl AsError for command::save_filter::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::Storage(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::rename_saved_filter::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Storage(e) => e.try_as_error(),
            Self::SavedFilterNotExists(_) => {
                Some(NotFoundError::SavedFilterNotFound.into())
            }
        }
    }
}

impl AsError for command::delete_saved_filter::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Storage(e) => e.try_as_error(),
            Self::SavedFilterNotExists(_) => {
                Some(NotFoundError::SavedFilterNotFound.into())
            }
        }
    }
}

impl AsError for command::refresh_saved_filter::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::Storage(e) => e.try_as_error(),
            Self::SavedFilterNotExists(_) => {
                Some(NotFoundError::SavedFilterNotFound.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use http::{Method, StatusCode};
    use serde_json::{json, Value};

    use crate::api::spec::Api;

    #[tokio::test]
    async fn manages_saved_filters() {
        let api = Api::new();

        let (status, saved) = api
            .call::<Value>(
                Method::POST,
                "/api/saved-filters",
                Some(json!({
                    "name": "Sale offers",
                    "query": "dealType=sale&page=3",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved["query"], "dealType=sale");
        assert!(saved["resultCount"].as_u64().unwrap() > 0);
        let id = saved["id"].as_str().unwrap().to_owned();

        let (status, renamed) = api
            .call::<Value>(
                Method::PATCH,
                &format!("/api/saved-filters/{id}"),
                Some(json!({"name": "Buying"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renamed["name"], "Buying");

        let (status, refreshed) = api
            .call::<Value>(
                Method::POST,
                &format!("/api/saved-filters/{id}/refresh"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(refreshed["newCount"], 0);

        let (_, all) = api
            .call::<Value>(Method::GET, "/api/saved-filters", None)
            .await;
        assert_eq!(all.as_array().unwrap().len(), 1);

        let (status, _) = api
            .call::<Value>(
                Method::DELETE,
                &format!("/api/saved-filters/{id}"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, err) = api
            .call::<Value>(
                Method::DELETE,
                &format!("/api/saved-filters/{id}"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["code"], "SAVED_FILTER_NOT_FOUND");
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let api = Api::new();

        let (status, err) = api
            .call::<Value>(
                Method::POST,
                "/api/saved-filters",
                Some(json!({"name": "", "query": "dealType=sale"})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "BAD_REQUEST");
    }
}
