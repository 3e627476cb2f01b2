//! Slash-command resolution.
//!
//! A command matches when the input, after removing an optional leading `/`,
//! starts with the command's name followed by whitespace or the end of the
//! input. Names are compared case-sensitively.
//!
//! When several names match, the longest name wins; equal lengths keep the
//! first registered.

use crate::turn::config::MarkerPolicy;
use crate::turn::domain::{COMMAND_MARKER, CommandDescriptor, ResolvedCommand};

/// Resolves `raw_input` against `registered`, accepting input with or
/// without the leading marker.
///
/// # Examples
///
/// ```
/// use colloquy::turn::domain::CommandDescriptor;
/// use colloquy::turn::services::resolve;
///
/// let commands = [
///     CommandDescriptor::new("edit", "Edit code", "{{{ input }}}"),
///     CommandDescriptor::new("commit", "Write a commit message", "{{{ input }}}"),
/// ];
/// let resolved = resolve("edit fix the bug", &commands).expect("edit matches");
///
/// assert_eq!(resolved.descriptor.name, "edit");
/// assert_eq!(resolved.input, "fix the bug");
/// ```
#[must_use]
pub fn resolve<'a>(
    raw_input: &'a str,
    registered: &'a [CommandDescriptor],
) -> Option<ResolvedCommand<'a>> {
    resolve_with_policy(raw_input, registered, MarkerPolicy::Optional)
}

/// Resolves `raw_input` against `registered` under `policy`.
#[must_use]
pub fn resolve_with_policy<'a>(
    raw_input: &'a str,
    registered: &'a [CommandDescriptor],
    policy: MarkerPolicy,
) -> Option<ResolvedCommand<'a>> {
    let normalized = match (raw_input.strip_prefix(COMMAND_MARKER), policy) {
        (Some(stripped), _) => stripped,
        (None, MarkerPolicy::Optional) => raw_input,
        (None, MarkerPolicy::Required) => return None,
    };

    registered
        .iter()
        .filter_map(|descriptor| {
            remainder_after(normalized, &descriptor.name).map(|input| ResolvedCommand {
                descriptor,
                input,
            })
        })
        .reduce(|best, candidate| {
            if candidate.descriptor.name.len() > best.descriptor.name.len() {
                candidate
            } else {
                best
            }
        })
}

fn remainder_after<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    let rest = text.strip_prefix(name)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}
