//! HTTP JSON API definitions.

pub mod filters;
pub mod listings;
pub mod saved_filters;

use axum::{
    routing::{get, patch, post},
    Router,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Builds the [`Router`] of the HTTP API.
///
/// Handlers expect the [`Service`] to be provided via an [`Extension`] layer.
///
/// [`Extension`]: axum::Extension
/// [`Service`]: crate::Service
pub fn router() -> Router {
    Router::new()
        .route("/api/listings", get(listings::search).post(listings::create))
        .route(
            "/api/listings/:id",
            get(listings::get).patch(listings::update),
        )
        .route(
            "/api/filters",
            get(filters::state)
                .put(filters::set_value)
                .delete(filters::clear),
        )
        .route("/api/filters/chips", post(filters::clear_part))
        .route(
            "/api/saved-filters",
            get(saved_filters::list).post(saved_filters::save),
        )
        .route(
            "/api/saved-filters/:id",
            patch(saved_filters::rename).delete(saved_filters::delete),
        )
        .route(
            "/api/saved-filters/:id/refresh",
            post(saved_filters::refresh),
        )
}

/// Response carrying a new URL query string.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct QueryString {
    /// Canonical URL query string, without the leading `?`.
    pub query: String,
}

/// Deserializes a present field as [`Some`], so a [`None`] field may stand
/// for an absent one while `null` stands for a removal.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
pub(crate) mod spec {
    use axum::{
        body::{self, Body},
        Extension, Router,
    };
    use http::{header, Method, Request, StatusCode};
    use serde::de::DeserializeOwned;
    use service::{
        infra::{storage::File, Catalog, LocalStorage},
        Config,
    };
    use tempfile::TempDir;
    use tower::ServiceExt as _;

    use crate::Service;

    /// Running API over the seeded catalog.
    pub(crate) struct Api {
        /// [`Router`] of the API.
        router: Router,

        /// Directory of the local storage file.
        _dir: TempDir,
    }

    impl Api {
        /// Creates a new [`Api`] over the seeded catalog.
        pub(crate) fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let service = Service::new(
                Config::default(),
                Catalog::seeded().unwrap(),
                LocalStorage::new(File::new(dir.path().join("storage.json"))),
            );
            Self {
                router: super::router().layer(Extension(service)),
                _dir: dir,
            }
        }

        /// Sends a request and returns its status and JSON body.
        pub(crate) async fn call<T: DeserializeOwned>(
            &self,
            method: Method,
            uri: &str,
            body: Option<serde_json::Value>,
        ) -> (StatusCode, T) {
            let req = Request::builder().method(method).uri(uri);
            let req = match body {
                Some(json) => req
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string())),
                None => req.body(Body::empty()),
            }
            .unwrap();

            let resp = self.router.clone().oneshot(req).await.unwrap();
            let status = resp.status();
            let bytes =
                body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            let json: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
            (status, serde_json::from_slice(json).unwrap())
        }
    }
}
