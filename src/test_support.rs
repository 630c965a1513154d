//! Shared fixtures for unit tests.

use crate::device::DeviceIssuer;
use crate::handlers::{Context, Handler, Outcome};
use crate::transport::Outgoing;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;

/// Device issuer that records `(token, origin)` pairs instead of sending.
#[derive(Default)]
pub struct RecordingDevice {
    issued: Mutex<Vec<(String, String)>>,
}

impl RecordingDevice {
    pub fn issued(&self) -> Vec<(String, String)> {
        self.issued.lock().unwrap().clone()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.issued().into_iter().map(|(token, _)| token).collect()
    }
}

impl DeviceIssuer for RecordingDevice {
    fn issue(&self, token: &str, origin: &str) {
        self.issued
            .lock()
            .unwrap()
            .push((token.to_string(), origin.to_string()));
    }
}

/// Handler with a fixed outcome and no side effects.
pub struct Fixed(pub Outcome);

impl Handler for Fixed {
    fn handle(&self, _ctx: &Context<'_>) -> Outcome {
        self.0
    }
}

/// Everything currently queued, in order.
pub fn drain(rx: &mut UnboundedReceiver<Outgoing>) -> Vec<Outgoing> {
    let mut out = Vec::new();
    while let Ok(unit) = rx.try_recv() {
        out.push(unit);
    }
    out
}
