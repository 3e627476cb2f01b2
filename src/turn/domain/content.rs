//! Message content: either a plain string or an ordered list of typed parts.
//!
//! Only text parts are ever inspected or rewritten by the turn engine. Every
//! other part kind is carried through untouched.

use serde::{Deserialize, Serialize};

/// The content of a message.
///
/// # Serialisation
///
/// Plain strings serialise as a JSON string; part lists serialise as an array
/// of tagged parts:
///
/// ```json
/// "Hello"
/// [{ "type": "text", "text": "Hello" }, { "type": "image_url", "url": "..." }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// A single plain string.
    Text(String),
    /// An ordered sequence of typed parts.
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Returns the text the content "starts with".
    ///
    /// For a plain string this is the string itself; for a part list it is
    /// the first text-bearing part. Returns `None` when no text is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use colloquy::turn::domain::{ContentPart, MessageContent};
    ///
    /// let content = MessageContent::Parts(vec![
    ///     ContentPart::image_url("https://example.com/a.png"),
    ///     ContentPart::text("/edit tidy this"),
    /// ]);
    /// assert_eq!(content.leading_text(), Some("/edit tidy this"));
    /// ```
    #[must_use]
    pub fn leading_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Parts(parts) => parts.iter().find_map(ContentPart::as_text),
        }
    }

    /// Returns a copy of this content with the leading text replaced.
    ///
    /// A plain string is replaced wholesale. In a part list only the first
    /// text-bearing part changes; every other part keeps its position and
    /// value. Content without any text is returned unchanged.
    #[must_use]
    pub fn with_leading_text(&self, replacement: &str) -> Self {
        match self {
            Self::Text(_) => Self::Text(replacement.to_owned()),
            Self::Parts(parts) => {
                let target = parts.iter().position(ContentPart::is_text);
                Self::Parts(
                    parts
                        .iter()
                        .enumerate()
                        .map(|(index, part)| {
                            if Some(index) == target {
                                ContentPart::text(replacement)
                            } else {
                                part.clone()
                            }
                        })
                        .collect(),
                )
            }
        }
    }

    /// Flattens the content into display text.
    ///
    /// Text parts are joined with a newline; non-text parts are dropped.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(ContentPart::as_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Converts the content into a part list.
    #[must_use]
    pub fn into_parts(self) -> Vec<ContentPart> {
        match self {
            Self::Text(text) => vec![ContentPart::text(text)],
            Self::Parts(parts) => parts,
        }
    }

    /// Returns `true` when the content carries no non-blank text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.render().trim().is_empty()
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for MessageContent {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MessageContent {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<ContentPart>> for MessageContent {
    fn from(value: Vec<ContentPart>) -> Self {
        Self::Parts(value)
    }
}

/// A single typed part of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text.
    Text(TextPart),
    /// A reference to an image.
    ImageUrl(ImageUrlPart),
}

impl ContentPart {
    /// Creates a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextPart::new(text))
    }

    /// Creates an image part.
    #[must_use]
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl(ImageUrlPart { url: url.into() })
    }

    /// Returns the text of a text part.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(part) => Some(&part.text),
            Self::ImageUrl(_) => None,
        }
    }

    /// Returns `true` for text parts.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

/// Text content within a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    /// The text content.
    pub text: String,
}

impl TextPart {
    /// Creates a new text part.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An image referenced by URL (or data URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrlPart {
    /// Location of the image.
    pub url: String,
}
