//! Mock roster and seeded demo conversations

use chrono::{Duration, Utc};

use crate::domain::entities::{avatar_url, Contact, Message};

/// The fixed demo roster: the AI assistant plus five human contacts
pub fn mock_contacts() -> Vec<Contact> {
    vec![
        Contact::new("ai", "AI Assistant", "ai@messagesphere.com")
            .with_avatar(avatar_url("AI", "6366F1"))
            .with_presence(true, "Active now")
            .ai(),
        Contact::new("2", "Jane Smith", "jane@example.com")
            .with_presence(true, "Active now")
            .with_unread(3),
        Contact::new("3", "Robert Johnson", "robert@example.com")
            .with_avatar(avatar_url("Robert Johnson", "26A69A"))
            .with_presence(false, "Last seen 2 hours ago"),
        Contact::new("4", "Sarah Williams", "sarah@example.com")
            .with_avatar(avatar_url("Sarah Williams", "EF5350"))
            .with_presence(false, "Last seen yesterday"),
        Contact::new("5", "Michael Brown", "michael@example.com")
            .with_avatar(avatar_url("Michael Brown", "FF9800"))
            .with_presence(true, "Active now"),
        Contact::new("6", "Emily Davis", "emily@example.com")
            .with_avatar(avatar_url("Emily Davis", "9C27B0"))
            .with_presence(false, "Last seen 3 days ago"),
    ]
}

/// Initial messages shown the first time a conversation is opened
pub fn initial_conversation(user_id: &str, contact_id: &str) -> Vec<Message> {
    let now = Utc::now();
    match contact_id {
        "ai" => vec![Message::new(
            "ai",
            user_id,
            "Hello! I'm your AI assistant. How can I help you today?",
        )
        .with_id("ai-msg-1")
        .with_timestamp(now - Duration::minutes(5))
        .mark_read()],
        "2" => vec![
            Message::new(
                "2",
                user_id,
                "Hi there! Have you checked out the new project requirements?",
            )
            .with_id("jane-msg-1")
            .with_timestamp(now - Duration::minutes(30)),
            Message::new("2", user_id, "I think we need to discuss the timeline.")
                .with_id("jane-msg-2")
                .with_timestamp(now - Duration::minutes(29)),
            Message::new("2", user_id, "Let me know when you're free to chat!")
                .with_id("jane-msg-3")
                .with_timestamp(now - Duration::minutes(28)),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_has_exactly_one_ai_contact() {
        let contacts = mock_contacts();
        assert_eq!(contacts.len(), 6);
        assert_eq!(contacts.iter().filter(|c| c.is_ai).count(), 1);
        assert_eq!(contacts[0].id, "ai");
    }

    #[test]
    fn test_jane_seed_is_unread_and_addressed_to_the_user() {
        let seed = initial_conversation("u1", "2");
        assert_eq!(seed.len(), 3);
        assert!(seed.iter().all(|m| m.sender_id == "2"));
        assert!(seed.iter().all(|m| m.receiver_id == "u1"));
        assert!(seed.iter().all(|m| !m.read));
    }

    #[test]
    fn test_unknown_contact_has_no_seed() {
        assert!(initial_conversation("u1", "5").is_empty());
    }
}
