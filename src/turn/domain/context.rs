//! Context gathered for a turn: editor input, attached items and selected
//! code.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::MessageContent;

/// The raw rich-text document the user submitted.
///
/// The document is opaque to the turn engine except for
/// [`EditorState::plain_text`], which adapters use to recover what was typed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditorState(Value);

impl EditorState {
    /// Wraps an editor document.
    #[must_use]
    pub const fn new(document: Value) -> Self {
        Self(document)
    }

    /// Builds a single-paragraph document holding `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use colloquy::turn::domain::EditorState;
    ///
    /// let state = EditorState::from_text("/edit fix the bug");
    /// assert_eq!(state.plain_text(), "/edit fix the bug");
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self(json!({
            "type": "doc",
            "content": [
                { "type": "paragraph", "content": [{ "type": "text", "text": text }] }
            ]
        }))
    }

    /// Returns the underlying document.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.0
    }

    /// Extracts the typed text.
    ///
    /// Text nodes are concatenated; the children of the root node are
    /// treated as blocks and separated by a newline.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self.0.get("content").and_then(Value::as_array) {
            Some(blocks) => blocks
                .iter()
                .map(|block| {
                    let mut text = String::new();
                    collect_text(block, &mut text);
                    text
                })
                .collect::<Vec<_>>()
                .join("\n"),
            None => {
                let mut text = String::new();
                collect_text(&self.0, &mut text);
                text
            }
        }
    }
}

fn collect_text(node: &Value, out: &mut String) {
    if let Some(text) = node.get("text").and_then(Value::as_str) {
        out.push_str(text);
    }
    if let Some(children) = node.get("content").and_then(Value::as_array) {
        for child in children {
            collect_text(child, out);
        }
    }
}

/// Flags the user toggled when submitting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputModifiers {
    /// Retrieve context from the wider codebase.
    #[serde(default)]
    pub use_codebase: bool,
    /// Do not attach any automatic context.
    #[serde(default)]
    pub no_context: bool,
}

/// Where a context item came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ContextItemUri {
    /// A file path.
    File(String),
    /// A URL.
    Url(String),
}

/// A piece of context the user attached to a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItem {
    /// Short display name.
    pub name: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// The text sent to the model.
    pub content: String,
    /// Origin of the item, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<ContextItemUri>,
}

impl ContextItem {
    /// Creates a context item.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            content: content.into(),
            uri: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the origin.
    #[must_use]
    pub fn with_uri(mut self, uri: ContextItemUri) -> Self {
        self.uri = Some(uri);
        self
    }
}

/// A range of code the user selected in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRange {
    /// File the selection belongs to.
    pub filepath: String,
    /// First selected line (zero based).
    pub start_line: u32,
    /// Last selected line (inclusive).
    pub end_line: u32,
    /// The selected text.
    pub contents: String,
}

impl CodeRange {
    /// Creates a code range.
    #[must_use]
    pub fn new(
        filepath: impl Into<String>,
        start_line: u32,
        end_line: u32,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            filepath: filepath.into(),
            start_line,
            end_line,
            contents: contents.into(),
        }
    }
}

/// What the context provider is asked to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRequest {
    /// The submitted document.
    pub editor_state: EditorState,
    /// Submission flags.
    pub modifiers: InputModifiers,
    /// Text to place ahead of the user's input.
    pub prompt_preamble: Option<String>,
}

/// What the context provider resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GatheredContext {
    /// Attached context items.
    pub items: Vec<ContextItem>,
    /// Selected code ranges.
    pub selected_code: Vec<CodeRange>,
    /// The message content for the turn's user message.
    pub content: MessageContent,
}
