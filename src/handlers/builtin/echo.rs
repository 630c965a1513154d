//! Handler for the `echo` command.

use crate::handlers::{Context, Handler, Outcome};

/// Handler for `echo;<text>`.
///
/// Replies with the complete original body (`echo;hello`), not just the
/// argument. The other built-ins act on the argument; echo intentionally
/// bounces the whole message back.
pub struct EchoHandler;

impl Handler for EchoHandler {
    fn handle(&self, ctx: &Context<'_>) -> Outcome {
        ctx.reply(ctx.request.body.as_str());
        Outcome::Handled
    }
}
