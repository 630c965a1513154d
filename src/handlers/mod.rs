//! Chat command handlers.
//!
//! Handlers receive an explicit [`Context`] carrying the tokenized
//! [`Request`] plus the reply, status and device capabilities, and report
//! an [`Outcome`] back to the dispatcher.

mod builtin;
mod core;

pub use self::core::{Context, Handler, Outcome, Registry, RegistryBuilder, Request};
pub use builtin::{EchoHandler, GpioHandler, StatusHandler};
