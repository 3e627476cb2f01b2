//! Flattening history into the message list sent to the model.

use crate::turn::domain::{ContentPart, History, HistoryItem, Message, MessageList, Role};

/// Builds the model's message list from `history`.
///
/// An optional system message comes first. Each history item contributes its
/// message; a user message with context items gains one text part per
/// non-blank item, after the user's own parts, so the text the user typed
/// stays the message's leading text.
#[must_use]
pub fn construct_messages(history: &History, system_message: Option<&str>) -> MessageList {
    let system = system_message
        .filter(|text| !text.trim().is_empty())
        .map(Message::system);

    system
        .into_iter()
        .chain(history.iter().map(flatten_item))
        .collect()
}

fn flatten_item(item: &HistoryItem) -> Message {
    let message = item.message();
    if message.role() != Role::User || item.context_items().is_empty() {
        return message.clone();
    }

    let context_parts = item
        .context_items()
        .iter()
        .filter(|context_item| !context_item.content.trim().is_empty())
        .map(|context_item| ContentPart::text(format!("{}\n", context_item.content)));

    let parts: Vec<ContentPart> = message
        .content()
        .clone()
        .into_parts()
        .into_iter()
        .chain(context_parts)
        .collect();
    message.with_content(parts)
}
