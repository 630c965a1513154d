//! Command handler registry.
//!
//! Built once at startup through [`RegistryBuilder`] and read-only after
//! that. Registering a name twice keeps the later handler.

use super::context::Handler;
use crate::gpio::GpioAction;
use crate::handlers::{EchoHandler, GpioHandler, StatusHandler};
use std::collections::HashMap;
use tracing::debug;

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<String, Box<dyn Handler>>,
}

impl Registry {
    /// Start an empty builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry with the built-in `echo`, `on`, `off` and `message` commands.
    pub fn with_builtins() -> Self {
        Self::builder()
            .register("echo", EchoHandler)
            .register(GpioAction::Set.command(), GpioHandler::on())
            .register(GpioAction::Reset.command(), GpioHandler::off())
            .register("message", StatusHandler)
            .build()
    }

    /// Look up the handler for a canonical (lowercase) command name.
    pub fn lookup(&self, command: &str) -> Option<&dyn Handler> {
        self.handlers.get(command).map(|h| h.as_ref())
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Collects handlers before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HashMap<String, Box<dyn Handler>>,
}

impl RegistryBuilder {
    /// Register `handler` under `name`, replacing any earlier handler.
    ///
    /// Names are trimmed and lowercased to match tokenized commands.
    pub fn register(mut self, name: &str, handler: impl Handler + 'static) -> Self {
        let name = name.trim().to_lowercase();
        if self.handlers.insert(name.clone(), Box::new(handler)).is_some() {
            debug!(command = %name, "Replaced existing command handler");
        }
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            handlers: self.handlers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{Context, Outcome, Request};
    use crate::test_support::{Fixed, RecordingDevice};
    use crate::transport::reply_queue;

    fn run(registry: &Registry, command: &str) -> Option<Outcome> {
        let (replies, _rx) = reply_queue();
        let device = RecordingDevice::default();
        let request = Request {
            command: command.into(),
            argument: "x".into(),
            origin: "alice".into(),
            body: format!("{command};x"),
        };
        let ctx = Context::new(&request, &replies, &device);
        registry.lookup(command).map(|h| h.handle(&ctx))
    }

    #[test]
    fn builtins_are_registered() {
        let registry = Registry::with_builtins();
        assert_eq!(registry.commands(), vec!["echo", "message", "off", "on"]);
        assert!(registry.lookup("help").is_none());
    }

    #[test]
    fn later_registration_wins() {
        let registry = Registry::builder()
            .register("ping", Fixed(Outcome::Handled))
            .register("ping", Fixed(Outcome::Declined))
            .build();
        assert_eq!(registry.commands(), vec!["ping"]);
        assert_eq!(run(&registry, "ping"), Some(Outcome::Declined));
    }

    #[test]
    fn names_are_canonicalized() {
        let registry = Registry::builder()
            .register("  Status ", Fixed(Outcome::Handled))
            .build();
        assert!(registry.lookup("status").is_some());
        assert!(registry.lookup("Status").is_none());
    }

    #[test]
    fn builtin_can_be_overridden() {
        let registry = Registry::builder()
            .register("echo", EchoHandler)
            .register("echo", Fixed(Outcome::Declined))
            .build();
        assert_eq!(run(&registry, "echo"), Some(Outcome::Declined));
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::builder().build();
        assert!(registry.commands().is_empty());
        assert_eq!(run(&registry, "echo"), None);
    }
}
