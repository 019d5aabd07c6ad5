use serde::{Deserialize, Serialize};

/// A contact in the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub online: bool,
    pub last_seen: String,
    pub unread_count: u32,
    pub is_ai: bool,
}

impl Contact {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            avatar: avatar_url(&name, "0D8ABC"),
            name,
            email: email.into(),
            online: false,
            last_seen: "Offline".to_string(),
            unread_count: 0,
            is_ai: false,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    pub fn with_presence(mut self, online: bool, last_seen: impl Into<String>) -> Self {
        self.online = online;
        self.last_seen = last_seen.into();
        self
    }

    pub fn with_unread(mut self, count: u32) -> Self {
        self.unread_count = count;
        self
    }

    /// Mark this contact as the AI assistant
    pub fn ai(mut self) -> Self {
        self.is_ai = true;
        self
    }
}

/// Placeholder avatar in the ui-avatars.com URL scheme
pub fn avatar_url(name: &str, background: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background={}&color=fff",
        name.replace(' ', "+"),
        background
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_url_encodes_spaces() {
        assert_eq!(
            avatar_url("Jane Smith", "0D8ABC"),
            "https://ui-avatars.com/api/?name=Jane+Smith&background=0D8ABC&color=fff"
        );
    }
}
