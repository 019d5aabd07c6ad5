//! Chat orchestration - conversation history, outbound sends, AI replies

use std::sync::Arc;

use crate::application::errors::StorageError;
use crate::application::responder::ai_reply;
use crate::application::transport::{ChatSocket, Origin};
use crate::domain::entities::{Contact, Message};
use crate::domain::traits::Store;

/// Produces the seeded demo history for a conversation opened for the first
/// time. Injected by the composition root.
pub type ConversationSeeder = Arc<dyn Fn(&str, &str) -> Vec<Message> + Send + Sync>;

/// Service tying the transport to persistence and the auto-responder
pub struct ChatService {
    socket: Arc<ChatSocket>,
    store: Arc<dyn Store>,
    roster: Vec<Contact>,
    seeder: ConversationSeeder,
}

impl ChatService {
    pub fn new(
        socket: Arc<ChatSocket>,
        store: Arc<dyn Store>,
        roster: Vec<Contact>,
        seeder: ConversationSeeder,
    ) -> Self {
        Self {
            socket,
            store,
            roster,
            seeder,
        }
    }

    pub fn roster(&self) -> &[Contact] {
        &self.roster
    }

    pub fn contact(&self, contact_id: &str) -> Option<&Contact> {
        self.roster.iter().find(|c| c.id == contact_id)
    }

    /// Load a conversation, seeding the demo history on first open
    pub async fn conversation(
        &self,
        user_id: &str,
        contact_id: &str,
    ) -> Result<Vec<Message>, StorageError> {
        if let Some(existing) = self.store.conversation(user_id, contact_id).await? {
            return Ok(existing);
        }

        let seeded = (self.seeder)(user_id, contact_id);
        self.store
            .save_conversation(user_id, contact_id, &seeded)
            .await?;
        Ok(seeded)
    }

    /// Send a message to a contact. Persists it on success; for the AI
    /// contact, also schedules a simulated typing-then-reply. Returns `None`
    /// when the transport refused the send (it has already notified the
    /// user).
    pub async fn send_text(
        &self,
        user_id: &str,
        contact_id: &str,
        content: &str,
    ) -> Result<Option<Message>, StorageError> {
        let Some(message) = self.socket.send_message(contact_id, content, Origin::User) else {
            return Ok(None);
        };
        self.store
            .append_message(user_id, contact_id, &message)
            .await?;

        if let Some(contact) = self.contact(contact_id) {
            if contact.is_ai {
                let reply = ai_reply(content);
                let _ = self.socket.simulate_inbound(contact, &reply);
            }
        }

        Ok(Some(message))
    }

    /// Persist a message delivered by the transport fan-out
    pub async fn record_inbound(&self, user_id: &str, message: &Message) -> Result<(), StorageError> {
        self.store
            .append_message(user_id, &message.sender_id, message)
            .await
    }

    /// Mark every unread message from the contact as read
    pub async fn mark_conversation_read(
        &self,
        user_id: &str,
        contact_id: &str,
    ) -> Result<(), StorageError> {
        let Some(messages) = self.store.conversation(user_id, contact_id).await? else {
            return Ok(());
        };

        let updated: Vec<Message> = messages
            .into_iter()
            .map(|msg| {
                if msg.sender_id == contact_id && !msg.read {
                    msg.mark_read()
                } else {
                    msg
                }
            })
            .collect();

        self.store
            .save_conversation(user_id, contact_id, &updated)
            .await
    }

    /// Number of unread messages from the contact
    pub async fn unread_count(
        &self,
        user_id: &str,
        contact_id: &str,
    ) -> Result<usize, StorageError> {
        let messages = self
            .store
            .conversation(user_id, contact_id)
            .await?
            .unwrap_or_default();
        Ok(messages
            .iter()
            .filter(|msg| msg.sender_id == contact_id && !msg.read)
            .count())
    }
}
