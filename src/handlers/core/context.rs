//! Handler context and the handler contract.

use crate::device::DeviceIssuer;
use crate::transport::ReplySender;

/// One tokenized chat command, built per inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Lowercased, trimmed first segment of the body.
    pub command: String,
    /// Trimmed second segment of the body. Always present once a request
    /// exists; bodies without a separator never become requests.
    pub argument: String,
    /// Sender identity; replies are addressed here.
    pub origin: String,
    /// The complete, unsplit message body.
    pub body: String,
}

/// Whether a handler took responsibility for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    /// The handler did not recognize the request; the dispatcher answers
    /// with the unknown-command reply.
    Declined,
}

/// Capabilities available to a handler while it processes one request.
pub struct Context<'a> {
    pub request: &'a Request,
    replies: &'a ReplySender,
    device: &'a dyn DeviceIssuer,
}

impl<'a> Context<'a> {
    pub fn new(
        request: &'a Request,
        replies: &'a ReplySender,
        device: &'a dyn DeviceIssuer,
    ) -> Self {
        Self {
            request,
            replies,
            device,
        }
    }

    /// Reply to the sender of the request.
    pub fn reply(&self, body: impl Into<String>) {
        self.replies.send_message(&self.request.origin, body);
    }

    /// Replace the bot's status text.
    pub fn set_status(&self, text: impl Into<String>) {
        self.replies.set_status(text);
    }

    /// Hand a compound token to the device issuer. Does not wait.
    pub fn issue_device_request(&self, token: &str) {
        self.device.issue(token, &self.request.origin);
    }
}

/// A chat command handler.
///
/// Handlers never block: replies are queued and device requests are issued
/// in the background.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &Context<'_>) -> Outcome;
}
