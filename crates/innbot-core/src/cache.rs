use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::ChatId;

/// Last reply sent to each chat, replayed by `/last`.
///
/// Last write wins per chat. Entries live for the whole process: there is no
/// eviction, TTL or size bound.
#[derive(Default)]
pub struct LastActionCache {
    inner: RwLock<HashMap<ChatId, String>>,
}

impl LastActionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, chat_id: ChatId, text: impl Into<String>) {
        self.inner.write().await.insert(chat_id, text.into());
    }

    pub async fn get(&self, chat_id: ChatId) -> Option<String> {
        self.inner.read().await.get(&chat_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
