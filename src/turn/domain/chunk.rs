//! Incremental model output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MessageContent, Role};

/// A chunk exactly as the model client produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChunk {
    /// Author of the partial message, normally the assistant.
    pub role: Role,
    /// The partial content.
    pub content: MessageContent,
    /// Provider-specific structured deltas (tool call fragments and the like).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<Value>,
}

impl RawChunk {
    /// Creates an assistant text chunk.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
            structured: None,
        }
    }

    /// Attaches a structured delta.
    #[must_use]
    pub fn with_structured(mut self, structured: Value) -> Self {
        self.structured = Some(structured);
        self
    }
}

/// A chunk as yielded to the caller: a text delta plus any structured delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedChunk {
    /// The text delta.
    pub text: String,
    /// Structured delta carried through from the raw chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<Value>,
}

impl From<RawChunk> for NormalizedChunk {
    fn from(raw: RawChunk) -> Self {
        Self {
            text: raw.content.render(),
            structured: raw.structured,
        }
    }
}
