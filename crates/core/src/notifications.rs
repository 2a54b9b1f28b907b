//! Toast notification store.
//!
//! One [`ToastStore`] is created by the owner of the UI session and handed
//! to whoever needs to raise notifications. Clones share the same list.
//! Each toast with a positive duration gets a tokio timer that removes it
//! when the duration ends, so [`ToastStore::add`] must run inside a tokio
//! runtime.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Display time for toasts that do not set one.
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Display time used by [`ToastStore::error`].
pub const ERROR_DURATION_MS: u64 = 7000;

/// Length of a toast id.
pub const TOAST_ID_LEN: usize = 7;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A toast as requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    /// Milliseconds; `None` uses [`DEFAULT_DURATION_MS`] and `Some(0)` keeps
    /// the toast until it is removed.
    pub duration_ms: Option<u64>,
}

impl NewToast {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
            duration_ms: None,
        }
    }
}

/// A stored toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ts_rs::TS)]
#[ts(export)]
pub struct Toast {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
    pub duration: u64,
}

fn random_id() -> String {
    let mut rng = rand::rng();
    (0..TOAST_ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// Shared list of visible toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastStore {
    toasts: Arc<RwLock<Vec<Toast>>>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a toast and return its id.
    pub async fn add(&self, new: NewToast) -> String {
        let duration = new.duration_ms.unwrap_or(DEFAULT_DURATION_MS);

        let id = {
            let mut toasts = self.toasts.write().await;
            let mut id = random_id();
            while toasts.iter().any(|t| t.id == id) {
                id = random_id();
            }
            toasts.push(Toast {
                id: id.clone(),
                kind: new.kind,
                title: new.title,
                description: new.description,
                duration,
            });
            id
        };

        if duration > 0 {
            let store = self.clone();
            let timer_id = id.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(duration)).await;
                store.remove(&timer_id).await;
            });
        }

        id
    }

    /// Remove a toast. Unknown ids are ignored.
    pub async fn remove(&self, id: &str) {
        self.toasts.write().await.retain(|t| t.id != id);
    }

    pub async fn clear(&self) {
        self.toasts.write().await.clear();
    }

    pub async fn list(&self) -> Vec<Toast> {
        self.toasts.read().await.clone()
    }

    pub async fn success(&self, title: &str, description: Option<&str>) -> String {
        self.add_kind(ToastKind::Success, title, description, None).await
    }

    pub async fn error(&self, title: &str, description: Option<&str>) -> String {
        self.add_kind(ToastKind::Error, title, description, Some(ERROR_DURATION_MS))
            .await
    }

    pub async fn warning(&self, title: &str, description: Option<&str>) -> String {
        self.add_kind(ToastKind::Warning, title, description, None).await
    }

    pub async fn info(&self, title: &str, description: Option<&str>) -> String {
        self.add_kind(ToastKind::Info, title, description, None).await
    }

    async fn add_kind(
        &self,
        kind: ToastKind,
        title: &str,
        description: Option<&str>,
        duration_ms: Option<u64>,
    ) -> String {
        self.add(NewToast {
            kind,
            title: title.to_string(),
            description: description.map(str::to_string),
            duration_ms,
        })
        .await
    }
}
