//! Message body tokenizer.
//!
//! Splits a chat message body into `(command, argument)` on a configurable
//! separator regex (default: `;` with optional surrounding whitespace).

use regex::Regex;

/// Result of tokenizing a message body that was present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokenized<'a> {
    /// The separator was found.
    Command {
        /// Trimmed, lowercased first segment.
        command: String,
        /// Trimmed second segment.
        argument: &'a str,
    },
    /// No separator: the sender gets help text and nothing is dispatched.
    NeedsHelp,
}

/// Splits message bodies on the configured separator.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    separator: Regex,
}

impl Tokenizer {
    /// Compile a tokenizer from a separator pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            separator: Regex::new(pattern)?,
        })
    }

    /// Split a message body.
    ///
    /// Returns `None` when there is no body at all. Only the second segment
    /// becomes the argument; anything after a second separator is dropped.
    pub fn split<'a>(&self, body: Option<&'a str>) -> Option<Tokenized<'a>> {
        let body = body?;
        let mut segments = self.separator.split(body);
        let command = segments.next().unwrap_or_default().trim().to_lowercase();

        Some(match segments.next() {
            Some(argument) => Tokenized::Command {
                command,
                argument: argument.trim(),
            },
            None => Tokenized::NeedsHelp,
        })
    }
}
