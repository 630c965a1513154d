//! Chat session transport.
//!
//! The relay core only sees [`Stanza`] values coming in and [`Outgoing`]
//! values going out. [`StanzaSource`] and [`StanzaSink`] are the seams a
//! concrete session implements; [`irc`] provides the IRC client session.

pub mod irc;
mod outbound;

pub use outbound::{ReplySender, reply_queue};

use crate::error::TransportError;
use async_trait::async_trait;

/// One discrete unit received from the chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stanza {
    /// A chat message addressed to the bot.
    Message {
        /// Sender identity replies are addressed to.
        from: String,
        /// Message text, if the message carried one.
        body: Option<String>,
    },
    /// A presence change from a peer.
    Presence {
        from: String,
        kind: PresenceKind,
    },
    /// A protocol-level error reported by the server.
    Error {
        /// Originating entity, when the protocol names one.
        from: Option<String>,
        /// Raw error text for logging.
        text: String,
    },
}

impl Stanza {
    /// Classification label for logging and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::Presence { .. } => "presence",
            Self::Error { .. } => "error",
        }
    }
}

/// Presence variants the relay distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceKind {
    /// The peer asks the bot to subscribe (an invite to `channel`).
    Subscribe { channel: String },
    /// The peer went offline.
    Unavailable,
}

/// One unit the relay asks the session to transmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Chat message to a peer. May span several lines.
    Chat { to: String, body: String },
    /// Replace the bot's own status text.
    Status(String),
    /// Accept a subscription request.
    AcceptSubscription { from: String, channel: String },
    /// Liveness ping toward the server.
    KeepAlive,
}

/// Inbound half of a chat session.
#[async_trait]
pub trait StanzaSource: Send {
    /// Wait for the next stanza.
    ///
    /// Returns `Ok(None)` when the session ended cleanly. Implementations
    /// must be cancel-safe.
    async fn next_stanza(&mut self) -> Result<Option<Stanza>, TransportError>;
}

/// Outbound half of a chat session.
#[async_trait]
pub trait StanzaSink: Send {
    /// Transmit one outgoing unit.
    async fn deliver(&mut self, out: Outgoing) -> Result<(), TransportError>;

    /// The bot's own identity on this session.
    fn self_identity(&self) -> &str;
}
