//! In-memory [`Backend`].

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;
use tracerr::Traced;

use super::{Backend, Error};

/// [`Backend`] keeping documents in memory only.
#[derive(Debug, Default)]
pub struct Memory(RwLock<HashMap<String, Value>>);

impl Backend for Memory {
    async fn get(&self, key: &str) -> Result<Option<Value>, Traced<Error>> {
        Ok(self.0.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), Traced<Error>> {
        _ = self.0.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Traced<Error>> {
        _ = self.0.write().await.remove(key);
        Ok(())
    }
}
