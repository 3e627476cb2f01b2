//! A single message in a conversation.

use super::{MessageContent, MessageId, Role};
use serde::{Deserialize, Serialize};

/// A message within a conversation history.
///
/// Messages are values: the turn engine never edits one in place. Rewriting a
/// message produces a new value through [`Message::with_content`], keeping the
/// identifier and role of the original.
///
/// # Examples
///
/// ```
/// use colloquy::turn::domain::{Message, Role};
///
/// let original = Message::user("/edit fix the bug");
/// let rewritten = original.with_content("Rewrite the code: fix the bug");
///
/// assert_eq!(rewritten.id(), original.id());
/// assert_eq!(rewritten.role(), Role::User);
/// assert_eq!(original.content().leading_text(), Some("/edit fix the bug"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: MessageContent,
}

impl Message {
    /// Creates a message with a fresh identifier.
    #[must_use]
    pub fn new(role: Role, content: impl Into<MessageContent>) -> Self {
        Self::with_id(MessageId::new(), role, content)
    }

    /// Creates a message with a specified identifier.
    #[must_use]
    pub fn with_id(id: MessageId, role: Role, content: impl Into<MessageContent>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::System, content)
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the message role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the message content.
    #[must_use]
    pub const fn content(&self) -> &MessageContent {
        &self.content
    }

    /// Returns a new message with the same identifier and role but new
    /// content.
    #[must_use]
    pub fn with_content(&self, content: impl Into<MessageContent>) -> Self {
        Self {
            id: self.id,
            role: self.role,
            content: content.into(),
        }
    }
}
