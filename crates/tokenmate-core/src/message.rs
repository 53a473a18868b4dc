//! Conversation Messages
//!
//! Wire format shared by the caller's history and the completion API.

use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt/instructions
    System,
    /// User input
    User,
    /// Assistant (LLM) response
    Assistant,
}

impl Role {
    /// Parse a role a caller is allowed to put in its history.
    ///
    /// System messages are synthesized by the pipeline only.
    pub fn conversational(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// A single message in a conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Text content
    pub content: String,
}

impl Message {
    /// Create a new message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(Message::system("Be brief.")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "Be brief."}));
    }

    #[test]
    fn test_conversational_roles() {
        assert_eq!(Role::conversational("user"), Some(Role::User));
        assert_eq!(Role::conversational("assistant"), Some(Role::Assistant));
        assert_eq!(Role::conversational("system"), None);
        assert_eq!(Role::conversational("User"), None);
    }
}
