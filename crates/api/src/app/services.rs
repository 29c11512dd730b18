//! Shared services handed to handlers through an `Extension`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tokio::io::AsyncWriteExt;

use firstshot_core::{ItemPatch, StoredItem, seed_items};

use crate::config::ApiConfig;

pub struct AppServices {
    config: ApiConfig,
    items: ItemStore,
    notifications: NotificationLog,
}

impl AppServices {
    pub fn new(config: ApiConfig) -> Self {
        let notifications = NotificationLog::new(config.notification_log.clone());
        Self {
            config,
            items: ItemStore::seeded(),
            notifications,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }
}

/// In-memory item store keyed by item id.
#[derive(Debug, Default)]
pub struct ItemStore {
    inner: RwLock<BTreeMap<String, StoredItem>>,
}

impl ItemStore {
    pub fn seeded() -> Self {
        Self {
            inner: RwLock::new(seed_items()),
        }
    }

    pub fn get(&self, id: &str) -> Option<StoredItem> {
        self.read().get(id).cloned()
    }

    /// Items ordered by id; `q` filters on a case-insensitive name substring.
    pub fn list(&self, q: Option<&str>, skip: usize, limit: usize) -> Vec<(String, StoredItem)> {
        let needle = q.map(str::to_lowercase);
        self.read()
            .iter()
            .filter(|(_, item)| match &needle {
                Some(n) => item
                    .name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(n.as_str())),
                None => true,
            })
            .skip(skip)
            .take(limit)
            .map(|(id, item)| (id.clone(), item.clone()))
            .collect()
    }

    /// Insert or overwrite.
    pub fn replace(&self, id: &str, item: StoredItem) -> StoredItem {
        self.write().insert(id.to_string(), item.clone());
        item
    }

    /// Apply a partial update; `None` when the id is unknown.
    pub fn patch(&self, id: &str, patch: ItemPatch) -> Option<StoredItem> {
        let mut items = self.write();
        let item = items.get_mut(id)?;
        item.apply(patch);
        Some(item.clone())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, StoredItem>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, StoredItem>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Append-only text log written by notification background tasks.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    path: PathBuf,
}

impl NotificationLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub async fn append(&self, message: &str) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(message.as_bytes()).await?;
        file.flush().await
    }

    /// Append, logging instead of returning failures (for background use).
    pub async fn write_log(self, message: String) {
        if let Err(e) = self.append(&message).await {
            tracing::warn!(path = %self.path.display(), error = %e, "notification log write failed");
        }
    }
}
