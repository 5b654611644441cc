//! [`Backend`] persisted into a JSON file.

use std::{
    io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tokio::{fs, sync::Mutex};
use tracerr::Traced;

use super::{Backend, Error};

/// [`Backend`] keeping all documents in a single JSON object file.
///
/// Writes go through a temporary file renamed over the original one, so the
/// file is never observed half-written.
#[derive(Debug)]
pub struct File {
    /// Path of the JSON file.
    path: PathBuf,

    /// Serializes writes to the file.
    write: Mutex<()>,
}

impl File {
    /// Creates a new [`File`] backend at the provided `path`.
    ///
    /// The file is created on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write: Mutex::new(()),
        }
    }

    /// Returns the path of the JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all the documents from the file.
    ///
    /// A missing file holds no documents. So does a malformed one, which is
    /// overwritten on the next write.
    async fn read(&self) -> Result<Map<String, Value>, Traced<Error>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Map::new());
            }
            Err(e) => return Err(tracerr::new!(Error::Io(e))),
        };
        if bytes.is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                "discarding malformed storage file: {e}",
            );
            Map::new()
        }))
    }

    /// Atomically replaces the file with the provided documents.
    async fn write(
        &self,
        docs: &Map<String, Value>,
    ) -> Result<(), Traced<Error>> {
        let bytes = serde_json::to_vec_pretty(docs)
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, bytes)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Applies the provided modification to the stored documents.
    async fn modify(
        &self,
        f: impl FnOnce(&mut Map<String, Value>) + Send,
    ) -> Result<(), Traced<Error>> {
        let _guard = self.write.lock().await;

        let mut docs = self.read().await?;
        f(&mut docs);
        self.write(&docs).await
    }
}

impl Backend for File {
    async fn get(&self, key: &str) -> Result<Option<Value>, Traced<Error>> {
        Ok(self.read().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), Traced<Error>> {
        self.modify(|docs| {
            _ = docs.insert(key.to_owned(), value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), Traced<Error>> {
        self.modify(|docs| {
            _ = docs.remove(key);
        })
        .await
    }
}
