//! Identifier newtypes for messages and turns.
//!
//! Both wrap a v4 UUID; keeping them distinct stops a message identifier
//! from being handed to something expecting a turn.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocates a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Unwraps the UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

uuid_newtype! {
    /// Identifies one message in a conversation history.
    ///
    /// Rewriting a message's content keeps its identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use colloquy::turn::domain::MessageId;
    ///
    /// let first = MessageId::new();
    /// assert_ne!(first, MessageId::new());
    /// ```
    MessageId
}

uuid_newtype! {
    /// Identifies one orchestrated turn.
    ///
    /// Observer events carry it so interleaved turns can be told apart in
    /// logs.
    TurnId
}
