//! Image upload definitions.
//!
//! Selected images get a [`Preview`] each, which is revoked exactly once when
//! dropped: on replacement by another selection, on removal, on [`Draft`]
//! commit or on [`Draft`] teardown.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use common::define_kind;
use derive_more::{AsRef, Display, Error};
use serde::Serialize;
use uuid::Uuid;

use super::listing::ImageUrl;

/// Image selected for upload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    /// File name of this [`Image`].
    pub name: String,

    /// MIME content type of this [`Image`].
    pub content_type: String,

    /// Size of this [`Image`] in bytes.
    pub size: u64,
}

define_kind! {
    #[doc = "Supported format of an [`Image`]."]
    enum ImageFormat {
        #[doc = "JPEG image."]
        Jpeg = 1,

        #[doc = "PNG image."]
        Png = 2,

        #[doc = "WebP image."]
        Webp = 3,
    }
}

impl ImageFormat {
    /// Detects the [`ImageFormat`] from the provided MIME content type.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

/// Reason of an [`Image`] being rejected.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum Rejection {
    /// [`Image`] content type is not supported.
    #[display("`{_1}` has unsupported content type `{_0}`")]
    UnsupportedType(
        #[error(not(source))] String,
        #[error(not(source))] String,
    ),

    /// [`Image`] exceeds the size limit.
    #[display("`{name}` of {size} bytes exceeds {limit} bytes limit")]
    TooLarge {
        /// Name of the rejected [`Image`].
        name: String,

        /// Size of the rejected [`Image`].
        size: u64,

        /// Size limit.
        limit: u64,
    },
}

/// Validates the provided [`Image`] against the `max_size` in bytes.
///
/// # Errors
///
/// With a [`Rejection`] if the [`Image`] can't be uploaded.
pub fn validate(
    image: &Image,
    max_size: u64,
) -> Result<ImageFormat, Rejection> {
    let format = ImageFormat::from_content_type(&image.content_type).ok_or_else(
        || {
            Rejection::UnsupportedType(
                image.content_type.clone(),
                image.name.clone(),
            )
        },
    )?;
    if image.size > max_size {
        return Err(Rejection::TooLarge {
            name: image.name.clone(),
            size: image.size,
            limit: max_size,
        });
    }
    Ok(format)
}

/// URL of a [`Preview`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
pub struct PreviewUrl(String);

impl PreviewUrl {
    /// Generates a new unique [`PreviewUrl`].
    fn new() -> Self {
        Self(format!("blob:preview/{}", Uuid::new_v4()))
    }
}

/// Registry of live [`Preview`]s.
#[derive(Debug, Default)]
pub struct Previews(Mutex<Registry>);

/// State of [`Previews`].
#[derive(Debug, Default)]
struct Registry {
    /// [`PreviewUrl`]s of the live [`Preview`]s.
    live: HashSet<PreviewUrl>,

    /// Total number of revoked [`Preview`]s.
    revoked: usize,
}

impl Previews {
    /// Acquires a new [`Preview`] of the provided [`Image`].
    #[must_use]
    pub fn acquire(self: &Arc<Self>, image: Image) -> Preview {
        let url = PreviewUrl::new();
        _ = self.lock().live.insert(url.clone());
        tracing::debug!(url = %url, image = %image.name, "preview acquired");

        Preview {
            url,
            image,
            registry: Arc::clone(self),
        }
    }

    /// Returns the number of live [`Preview`]s.
    #[must_use]
    pub fn live(&self) -> usize {
        self.lock().live.len()
    }

    /// Returns the total number of revoked [`Preview`]s.
    #[must_use]
    pub fn revoked(&self) -> usize {
        self.lock().revoked
    }

    /// Indicates whether the [`Preview`] with the provided [`PreviewUrl`] is
    /// live.
    #[must_use]
    pub fn is_live(&self, url: &PreviewUrl) -> bool {
        self.lock().live.contains(url)
    }

    /// Revokes the [`Preview`] with the provided [`PreviewUrl`].
    fn revoke(&self, url: &PreviewUrl) {
        let mut registry = self.lock();
        if registry.live.remove(url) {
            registry.revoked += 1;
        } else {
            tracing::warn!(url = %url, "preview is revoked twice");
        }
    }

    /// Locks the [`Registry`].
    ///
    /// It's never left inconsistent, so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Preview of a selected [`Image`], revoked on drop.
#[derive(Debug)]
pub struct Preview {
    /// [`PreviewUrl`] of this [`Preview`].
    url: PreviewUrl,

    /// [`Image`] previewed.
    image: Image,

    /// [`Previews`] registry this [`Preview`] is tracked in.
    registry: Arc<Previews>,
}

impl Preview {
    /// Returns the [`PreviewUrl`] of this [`Preview`].
    #[must_use]
    pub fn url(&self) -> &PreviewUrl {
        &self.url
    }

    /// Returns the previewed [`Image`].
    #[must_use]
    pub fn image(&self) -> &Image {
        &self.image
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
        tracing::debug!(url = %self.url, "preview revoked");
    }
}

/// Images of a listing being edited, not uploaded yet.
#[derive(Debug)]
pub struct Draft {
    /// [`Previews`] registry to acquire [`Preview`]s in.
    registry: Arc<Previews>,

    /// Maximum size of an [`Image`] in bytes.
    max_size: u64,

    /// [`Preview`]s of the selected [`Image`]s.
    previews: Vec<Preview>,
}

impl Draft {
    /// Creates a new empty [`Draft`].
    #[must_use]
    pub fn new(registry: Arc<Previews>, max_size: u64) -> Self {
        Self {
            registry,
            max_size,
            previews: vec![],
        }
    }

    /// Replaces the selected [`Image`]s with the provided ones.
    ///
    /// Invalid [`Image`]s are skipped and their [`Rejection`]s returned.
    pub fn select(
        &mut self,
        images: impl IntoIterator<Item = Image>,
    ) -> Vec<Rejection> {
        // Previous previews are revoked on replacement.
        self.previews.clear();

        let mut rejections = vec![];
        for image in images {
            match validate(&image, self.max_size) {
                Ok(_) => self.previews.push(self.registry.acquire(image)),
                Err(rejection) => {
                    tracing::warn!(%rejection, "image rejected");
                    rejections.push(rejection);
                }
            }
        }
        rejections
    }

    /// Removes the [`Preview`] with the provided [`PreviewUrl`], if any.
    pub fn remove(&mut self, url: &PreviewUrl) -> bool {
        let len = self.previews.len();
        self.previews.retain(|p| p.url() != url);
        self.previews.len() != len
    }

    /// Returns [`Preview`]s of the selected [`Image`]s.
    #[must_use]
    pub fn previews(&self) -> &[Preview] {
        &self.previews
    }

    /// Commits the selected [`Image`]s, returning their stored
    /// [`ImageUrl`]s.
    ///
    /// All the [`Preview`]s are revoked.
    #[must_use]
    pub fn commit(self) -> Vec<ImageUrl> {
        self.previews
            .iter()
            .map(|p| {
                format!("/images/{}/{}", Uuid::new_v4(), p.image().name).into()
            })
            .collect()
    }
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use super::{Draft, Image, ImageFormat, Previews, Rejection};

    fn image(name: &str, content_type: &str, size: u64) -> Image {
        Image {
            name: name.into(),
            content_type: content_type.into(),
            size,
        }
    }

    #[test]
    fn detects_formats() {
        assert_eq!(
            ImageFormat::from_content_type("image/JPEG"),
            Some(ImageFormat::Jpeg),
        );
        assert_eq!(
            ImageFormat::from_content_type("image/webp"),
            Some(ImageFormat::Webp),
        );
        assert_eq!(ImageFormat::from_content_type("image/gif"), None);
    }

    #[test]
    fn rejects_invalid_images() {
        let registry = Arc::new(Previews::default());
        let mut draft = Draft::new(Arc::clone(&registry), 1024);

        let rejections = draft.select([
            image("a.png", "image/png", 1000),
            image("b.pdf", "application/pdf", 10),
            image("c.jpg", "image/jpeg", 2048),
        ]);

        assert_eq!(rejections.len(), 2);
        assert!(matches!(rejections[0], Rejection::UnsupportedType(..)));
        assert!(matches!(
            rejections[1],
            Rejection::TooLarge {
                size: 2048,
                limit: 1024,
                ..
            },
        ));
        assert_eq!(draft.previews().len(), 1);
        assert_eq!(registry.live(), 1);
    }

    #[test]
    fn revokes_each_preview_exactly_once() {
        let registry = Arc::new(Previews::default());
        let mut draft = Draft::new(Arc::clone(&registry), 1024);

        _ = draft.select([
            image("a.png", "image/png", 1),
            image("b.png", "image/png", 1),
        ]);
        let first = draft.previews()[0].url().clone();
        assert_eq!(registry.live(), 2);
        assert!(registry.is_live(&first));

        _ = draft.select([image("c.png", "image/png", 1)]);
        assert_eq!(registry.live(), 1);
        assert_eq!(registry.revoked(), 2);
        assert!(!registry.is_live(&first));

        let third = draft.previews()[0].url().clone();
        assert!(draft.remove(&third));
        assert!(!draft.remove(&third));
        assert_eq!(registry.revoked(), 3);

        _ = draft.select([image("d.png", "image/png", 1)]);
        drop(draft);
        assert_eq!(registry.live(), 0);
        assert_eq!(registry.revoked(), 4);
    }

    #[test]
    fn commit_revokes_previews() {
        let registry = Arc::new(Previews::default());
        let mut draft = Draft::new(Arc::clone(&registry), 1024);
        _ = draft.select([
            image("a.png", "image/png", 1),
            image("b.webp", "image/webp", 1),
        ]);

        let urls = draft.commit();

        assert_eq!(urls.len(), 2);
        assert!(urls[1].to_string().ends_with("/b.webp"));
        assert_eq!(registry.live(), 0);
        assert_eq!(registry.revoked(), 2);
    }
}
