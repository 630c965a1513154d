//! Telemetry utilities for command timing and log correlation.

use std::time::Instant;
use tracing::{Span, info_span};

/// Guard for timing handler execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, duration);
    }
}

/// Span for one chat session (connect until disconnect).
pub fn session(server: &str, nick: &str) -> Span {
    info_span!("session", server = %server, nick = %nick)
}

/// Span for a spawned device request.
pub fn device_request(token: &str, origin: &str) -> Span {
    info_span!("device", token = %token, origin = %origin)
}
