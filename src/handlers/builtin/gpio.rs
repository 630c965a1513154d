//! Handlers for the `on` and `off` commands.

use crate::gpio::GpioAction;
use crate::handlers::{Context, Handler, Outcome};
use tracing::debug;

/// Handler for `on;<pins>` and `off;<pins>`.
///
/// `on;04,17,25` acknowledges, encodes `SET_GPIO_04--SET_GPIO_17--SET_GPIO_25`
/// and hands it to the device issuer. The acknowledgement goes out before the
/// device is contacted, and the device outcome never changes the result.
pub struct GpioHandler {
    action: GpioAction,
}

impl GpioHandler {
    pub fn on() -> Self {
        Self {
            action: GpioAction::Set,
        }
    }

    pub fn off() -> Self {
        Self {
            action: GpioAction::Reset,
        }
    }
}

impl Handler for GpioHandler {
    fn handle(&self, ctx: &Context<'_>) -> Outcome {
        let argument = ctx.request.argument.as_str();
        ctx.reply(format!(
            "Received gpio '{}' cmd:{argument}",
            self.action.command()
        ));

        let token = self.action.encode(argument);
        debug!(action = ?self.action, token = %token, "Encoded GPIO command");
        ctx.issue_device_request(&token);

        Outcome::Handled
    }
}
