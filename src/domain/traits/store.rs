use async_trait::async_trait;

use crate::application::errors::StorageError;
use crate::domain::entities::Message;

/// Store trait - abstraction for conversation and session persistence
#[async_trait]
pub trait Store: Send + Sync {
    // Conversation history, keyed per (user, contact) pair
    async fn conversation(
        &self,
        user_id: &str,
        contact_id: &str,
    ) -> Result<Option<Vec<Message>>, StorageError>;
    async fn save_conversation(
        &self,
        user_id: &str,
        contact_id: &str,
        messages: &[Message],
    ) -> Result<(), StorageError>;
    async fn append_message(
        &self,
        user_id: &str,
        contact_id: &str,
        message: &Message,
    ) -> Result<(), StorageError>;

    // Key-value operations
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
