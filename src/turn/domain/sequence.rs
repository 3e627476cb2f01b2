//! Structurally shared, immutable ordered sequences.
//!
//! Conversation history is observed by several parties at once (a UI, the
//! orchestrator, the model client). Edits therefore never touch the
//! sequence a caller holds: every edit returns a new [`Sequence`] whose
//! unchanged elements are the same allocations as before, while the edited
//! slot holds a freshly allocated value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::{ContextItem, Message};

/// Ordered history of turn items, in conversation order.
pub type History = Sequence<HistoryItem>;

/// Flattened message list sent to the model.
pub type MessageList = Sequence<Message>;

/// An immutable ordered sequence with structural sharing.
///
/// Cloning is cheap (one reference-count increment). Equality compares
/// elements; [`Sequence::ptr_eq`] tells whether two handles are the very same
/// sequence.
///
/// # Examples
///
/// ```
/// use colloquy::turn::domain::{Message, MessageList};
///
/// let list = MessageList::from_iter([Message::user("a"), Message::assistant("b")]);
/// let edited = list.replaced_at(1, Message::assistant("c")).expect("in range");
///
/// assert!(list.shares_element(&edited, 0));
/// assert!(!list.shares_element(&edited, 1));
/// assert_eq!(list.len(), 2);
/// ```
pub struct Sequence<T> {
    items: Arc<[Arc<T>]>,
}

impl<T> Sequence<T> {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the sequence holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index).map(AsRef::as_ref)
    }

    /// Returns the last element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last().map(AsRef::as_ref)
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter().map(AsRef::as_ref)
    }

    /// Returns `true` when both handles point at the same sequence.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Returns `true` when both sequences hold the same allocation at
    /// `index`.
    #[must_use]
    pub fn shares_element(&self, other: &Self, index: usize) -> bool {
        match (self.items.get(index), other.items.get(index)) {
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns a new sequence with `value` written at `index`.
    ///
    /// `index == len` appends. Every other slot is shared with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceIndexError::OutOfRange`] when `index > len`.
    pub fn replaced_at(&self, index: usize, value: T) -> Result<Self, SequenceIndexError> {
        let len = self.len();
        if index > len {
            return Err(SequenceIndexError::OutOfRange { index, len });
        }

        let mut replacement = Some(Arc::new(value));
        let mut items: Vec<Arc<T>> = Vec::with_capacity(len.max(index + 1));
        for (position, item) in self.items.iter().enumerate() {
            if position == index {
                if let Some(written) = replacement.take() {
                    items.push(written);
                }
            } else {
                items.push(Arc::clone(item));
            }
        }
        if let Some(appended) = replacement {
            items.push(appended);
        }

        Ok(Self {
            items: Arc::from(items),
        })
    }

    /// Returns the first `len` elements as a new sequence sharing every
    /// element with `self`. Returns `self` unchanged when `len` covers the
    /// whole sequence.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Self {
        if len >= self.len() {
            return self.clone();
        }
        Self {
            items: self.items.iter().take(len).cloned().collect(),
        }
    }
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Serialize> Serialize for Sequence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sequence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Errors for positional sequence edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceIndexError {
    /// The index lies beyond the append position.
    #[error("index {index} is out of range for a sequence of length {len}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The sequence length at the time of the edit.
        len: usize,
    },
}

/// One entry of the conversation history: a message plus the context items
/// the user attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    message: Message,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    context_items: Vec<ContextItem>,
}

impl HistoryItem {
    /// Creates a history item without context items.
    #[must_use]
    pub const fn new(message: Message) -> Self {
        Self {
            message,
            context_items: Vec::new(),
        }
    }

    /// Attaches context items.
    #[must_use]
    pub fn with_context_items(mut self, context_items: Vec<ContextItem>) -> Self {
        self.context_items = context_items;
        self
    }

    /// Returns the message.
    #[must_use]
    pub const fn message(&self) -> &Message {
        &self.message
    }

    /// Returns the attached context items.
    #[must_use]
    pub fn context_items(&self) -> &[ContextItem] {
        &self.context_items
    }
}
