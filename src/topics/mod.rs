//! Typed envelopes exchanged between the moderator and players.
//!
//! - [`Topic`] — Channel identifier (`private:<player>`, `public`, or a named channel)
//! - [`Message`] — Sender, receiver, topic and a closed [`Content`] payload
//! - [`Briefing`] — What the moderator tells a player before it decides
//! - [`Decision`] — What a player answers with
mod content;
mod message;
mod topic;

pub use content::*;
pub use message::*;
pub use topic::*;
