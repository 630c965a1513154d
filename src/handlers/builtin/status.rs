//! Handler for the `message` command.

use crate::handlers::{Context, Handler, Outcome};

/// Handler for `message;<text>`: sets the bot's status text and confirms.
pub struct StatusHandler;

impl Handler for StatusHandler {
    fn handle(&self, ctx: &Context<'_>) -> Outcome {
        let text = ctx.request.argument.as_str();
        ctx.set_status(text);
        ctx.reply(format!("Status message now set to {text}"));
        Outcome::Handled
    }
}
