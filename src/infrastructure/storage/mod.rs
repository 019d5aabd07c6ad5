//! JSON file-based storage - direct key-value serialization, one file per
//! key, standing in for the browser localStorage the demo data model assumes

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::entities::Message;
use crate::domain::traits::Store;

/// Conversation storage key, `conversation-{user}-{contact}`
fn conversation_key(user_id: &str, contact_id: &str) -> String {
    format!("conversation-{}-{}", user_id, contact_id)
}

/// JSON file-backed store with an in-memory cache
pub struct JsonStore {
    base_path: PathBuf,
    conversations: Arc<RwLock<HashMap<String, Vec<Message>>>>,
    kv: Arc<RwLock<HashMap<String, String>>>,
}

impl JsonStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            conversations: Arc::new(RwLock::new(HashMap::new())),
            kv: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn init(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    async fn read_file(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.file_path(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_file(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        tokio::fs::write(self.file_path(key), raw).await?;
        Ok(())
    }

    async fn flush_conversation(
        &self,
        key: &str,
        messages: &[Message],
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(messages)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.write_file(key, &raw).await
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn conversation(
        &self,
        user_id: &str,
        contact_id: &str,
    ) -> Result<Option<Vec<Message>>, StorageError> {
        let key = conversation_key(user_id, contact_id);

        if let Some(messages) = self.conversations.read().await.get(&key) {
            return Ok(Some(messages.clone()));
        }

        // Fall back to the on-disk copy
        match self.read_file(&key).await? {
            Some(raw) => {
                let messages: Vec<Message> = serde_json::from_str(&raw)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                self.conversations
                    .write()
                    .await
                    .insert(key, messages.clone());
                Ok(Some(messages))
            }
            None => Ok(None),
        }
    }

    async fn save_conversation(
        &self,
        user_id: &str,
        contact_id: &str,
        messages: &[Message],
    ) -> Result<(), StorageError> {
        let key = conversation_key(user_id, contact_id);
        self.conversations
            .write()
            .await
            .insert(key.clone(), messages.to_vec());
        self.flush_conversation(&key, messages).await
    }

    async fn append_message(
        &self,
        user_id: &str,
        contact_id: &str,
        message: &Message,
    ) -> Result<(), StorageError> {
        let key = conversation_key(user_id, contact_id);
        let snapshot = {
            let mut conversations = self.conversations.write().await;
            let messages = conversations.entry(key.clone()).or_insert_with(Vec::new);
            messages.push(message.clone());
            messages.clone()
        };
        self.flush_conversation(&key, &snapshot).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if let Some(value) = self.kv.read().await.get(key) {
            return Ok(Some(value.clone()));
        }

        match self.read_file(key).await? {
            Some(raw) => {
                self.kv
                    .write()
                    .await
                    .insert(key.to_string(), raw.clone());
                Ok(Some(raw))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.kv
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.write_file(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.kv.write().await.remove(key);
        match tokio::fs::remove_file(self.file_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
