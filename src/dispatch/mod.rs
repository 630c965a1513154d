//! Message dispatch.
//!
//! Turns each inbound stanza into at most one handler invocation:
//!
//! 1. Error stanzas are logged and dropped.
//! 2. Anything that is not a chat message is ignored.
//! 3. The body is tokenized; a missing body is ignored and a body without a
//!    separator gets the help text.
//! 4. The command is looked up in the [`Registry`]. Unknown commands, and
//!    commands whose handler declines, get the unknown-command reply.
//!
//! Dispatch is synchronous and never waits on the network: replies are
//! queued and device requests run on their own tasks.

mod tokenizer;

pub use tokenizer::{Tokenized, Tokenizer};

use crate::device::DeviceIssuer;
use crate::handlers::{Context, Outcome, Registry, Request};
use crate::help::HelpText;
use crate::telemetry::CommandTimer;
use crate::transport::{ReplySender, Stanza};
use std::sync::Arc;
use tracing::{Level, debug, span, warn};

/// Routes inbound stanzas to command handlers.
pub struct Dispatcher {
    tokenizer: Tokenizer,
    registry: Arc<Registry>,
    replies: ReplySender,
    device: Arc<dyn DeviceIssuer>,
    help: HelpText,
}

impl Dispatcher {
    pub fn new(
        tokenizer: Tokenizer,
        registry: Arc<Registry>,
        replies: ReplySender,
        device: Arc<dyn DeviceIssuer>,
        help: HelpText,
    ) -> Self {
        Self {
            tokenizer,
            registry,
            replies,
            device,
            help,
        }
    }

    /// Process one inbound stanza.
    pub fn dispatch(&self, stanza: &Stanza) {
        crate::metrics::record_stanza(stanza.kind());

        let (from, body) = match stanza {
            Stanza::Error { from, text } => {
                warn!(from = from.as_deref(), error = %text, "[error] protocol error stanza");
                return;
            }
            Stanza::Message { from, body } => (from, body.as_deref()),
            Stanza::Presence { .. } => return,
        };

        let (command, argument) = match self.tokenizer.split(body) {
            None => return,
            Some(Tokenized::NeedsHelp) => {
                debug!(from = %from, "No separator in message, sending help");
                self.replies.send_message(from, self.help.as_str());
                crate::metrics::record_help_sent();
                return;
            }
            Some(Tokenized::Command { command, argument }) => (command, argument),
        };

        let request = Request {
            command,
            argument: argument.to_string(),
            origin: from.clone(),
            body: body.unwrap_or_default().to_string(),
        };

        let outcome = match self.registry.lookup(&request.command) {
            Some(handler) => {
                let command_span = span!(
                    Level::DEBUG,
                    "command",
                    name = %request.command,
                    origin = %request.origin,
                );
                let _enter = command_span.enter();
                let _timer = CommandTimer::new(&request.command);

                let ctx = Context::new(&request, &self.replies, self.device.as_ref());
                handler.handle(&ctx)
            }
            None => Outcome::Declined,
        };

        if outcome == Outcome::Declined {
            debug!(command = %request.command, from = %from, "Unknown command");
            crate::metrics::record_unknown_command();
            self.replies
                .send_message(from, unknown_command_reply(&request.command));
        }
    }
}

/// Reply for a command nobody handled.
pub fn unknown_command_reply(command: &str) -> String {
    format!("Unknown command: \"{command}\". Type \"help\" for more information.")
}
