//! Non-blocking outbound queue shared by the dispatcher, handlers and
//! device tasks.
//!
//! The queue is unbounded so producers never wait on the network; a single
//! writer task drains it in FIFO order, which keeps replies in the order
//! handlers produced them.

use super::Outgoing;
use tokio::sync::mpsc;
use tracing::debug;

/// Create a reply queue: the cloneable sender and the writer's receiver.
pub fn reply_queue() -> (ReplySender, mpsc::UnboundedReceiver<Outgoing>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ReplySender { tx }, rx)
}

/// Cloneable handle for queueing outbound units.
#[derive(Debug, Clone)]
pub struct ReplySender {
    tx: mpsc::UnboundedSender<Outgoing>,
}

impl ReplySender {
    /// Queue a chat message to `to`.
    pub fn send_message(&self, to: &str, body: impl Into<String>) {
        let body = body.into();
        debug!(to = %to, body = %body, "[message] SENT");
        self.push(Outgoing::Chat {
            to: to.to_string(),
            body,
        });
    }

    /// Queue a status text change.
    pub fn set_status(&self, text: impl Into<String>) {
        self.push(Outgoing::Status(text.into()));
    }

    /// Queue acceptance of a subscription request.
    pub fn accept_subscription(&self, from: &str, channel: &str) {
        self.push(Outgoing::AcceptSubscription {
            from: from.to_string(),
            channel: channel.to_string(),
        });
    }

    fn push(&self, out: Outgoing) {
        if let Err(mpsc::error::SendError(out)) = self.tx.send(out) {
            debug!(dropped = ?out, "Reply queue closed, dropping outbound unit");
        }
    }
}
