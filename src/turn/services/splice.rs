//! Rewriting the message that invoked a slash command.

use crate::turn::domain::{MessageList, Role, strip_marker};

/// Replaces the text of the most recent user message that starts with
/// `command_name` and returns the new list.
///
/// Messages are scanned from the end. Non-user messages are skipped. The
/// first user message whose leading text (the string itself, or its first
/// text part) starts with `command_name`, optionally preceded by `/`, is
/// rewritten: a plain string is replaced wholesale, and in a part list only
/// that first text part changes. Scanning stops there, so at most one message
/// is rewritten per call.
///
/// When nothing qualifies the input list is returned as is (the same
/// sequence, see [`MessageList::ptr_eq`]). That happens for programmatic
/// invocations and is not an error.
///
/// # Examples
///
/// ```
/// use colloquy::turn::domain::{Message, MessageList};
/// use colloquy::turn::services::splice;
///
/// let messages = MessageList::from_iter([
///     Message::user("/edit fix the bug"),
///     Message::assistant("Done."),
/// ]);
/// let spliced = splice(&messages, "edit", "Rewrite the code: fix the bug");
///
/// assert_eq!(
///     spliced.get(0).and_then(|message| message.content().leading_text()),
///     Some("Rewrite the code: fix the bug")
/// );
/// assert!(spliced.shares_element(&messages, 1));
/// ```
#[must_use]
pub fn splice(messages: &MessageList, command_name: &str, replacement: &str) -> MessageList {
    if command_name.is_empty() {
        return messages.clone();
    }

    let target = messages
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, message)| message.role() == Role::User)
        .find(|(_, message)| {
            message
                .content()
                .leading_text()
                .is_some_and(|text| strip_marker(text).starts_with(command_name))
        });

    let Some((index, message)) = target else {
        return messages.clone();
    };

    let rewritten = message.with_content(message.content().with_leading_text(replacement));
    messages
        .replaced_at(index, rewritten)
        .unwrap_or_else(|_| messages.clone())
}
