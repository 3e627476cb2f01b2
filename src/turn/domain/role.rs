//! Message author roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the person driving the conversation.
    User,
    /// Output produced by the language model.
    Assistant,
    /// Instructions injected ahead of the conversation.
    System,
}

impl Role {
    /// Returns the role as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an invalid role string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid role: '{0}'")]
pub struct ParseRoleError(String);

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "system" => Ok(Self::System),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}
