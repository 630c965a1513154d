//! Built-in chat commands: `echo`, `on`, `off`, `message`.

mod echo;
mod gpio;
mod status;

pub use echo::EchoHandler;
pub use gpio::GpioHandler;
pub use status::StatusHandler;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{Context, Handler, Outcome, Request};
    use crate::test_support::{RecordingDevice, drain};
    use crate::transport::{Outgoing, reply_queue};

    fn request(command: &str, argument: &str, body: &str) -> Request {
        Request {
            command: command.into(),
            argument: argument.into(),
            origin: "alice@example".into(),
            body: body.into(),
        }
    }

    fn chat(body: &str) -> Outgoing {
        Outgoing::Chat {
            to: "alice@example".into(),
            body: body.into(),
        }
    }

    #[test]
    fn echo_returns_whole_body() {
        let (replies, mut rx) = reply_queue();
        let device = RecordingDevice::default();
        let req = request("echo", "hello", "echo ; hello");

        let outcome = EchoHandler.handle(&Context::new(&req, &replies, &device));

        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(drain(&mut rx), vec![chat("echo ; hello")]);
        assert!(device.tokens().is_empty());
    }

    #[test]
    fn on_acknowledges_then_issues() {
        let (replies, mut rx) = reply_queue();
        let device = RecordingDevice::default();
        let req = request("on", "04,17,25", "on;04,17,25");

        let outcome = GpioHandler::on().handle(&Context::new(&req, &replies, &device));

        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(drain(&mut rx), vec![chat("Received gpio 'on' cmd:04,17,25")]);
        assert_eq!(
            device.issued(),
            vec![(
                "SET_GPIO_04--SET_GPIO_17--SET_GPIO_25".to_string(),
                "alice@example".to_string()
            )]
        );
    }

    #[test]
    fn off_uses_reset_prefix() {
        let (replies, mut rx) = reply_queue();
        let device = RecordingDevice::default();
        let req = request("off", "17", "off;17");

        GpioHandler::off().handle(&Context::new(&req, &replies, &device));

        assert_eq!(drain(&mut rx), vec![chat("Received gpio 'off' cmd:17")]);
        assert_eq!(device.tokens(), vec!["RESET_GPIO_17".to_string()]);
    }

    #[test]
    fn message_sets_status_and_confirms() {
        let (replies, mut rx) = reply_queue();
        let device = RecordingDevice::default();
        let req = request("message", "In the lab", "message;In the lab");

        let outcome = StatusHandler.handle(&Context::new(&req, &replies, &device));

        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(
            drain(&mut rx),
            vec![
                Outgoing::Status("In the lab".into()),
                chat("Status message now set to In the lab"),
            ]
        );
    }
}
