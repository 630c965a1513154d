//! Help text sent on malformed input and accepted subscriptions.

use std::sync::Arc;

/// Rendered help text, cheap to clone.
#[derive(Debug, Clone)]
pub struct HelpText(Arc<str>);

impl HelpText {
    /// Render the help text advertising `pins`.
    pub fn new(pins: &[String]) -> Self {
        let text = format!(
            "Currently 'echo', 'on', 'off' and 'message' are supported:\n\
             echo;example text\n\
             on;04\n\
             off;17\n\
             on;04,17,25\n\
             message;new status text\n\
             \n\
             on/off gpio list: {{{}}}.\n",
            pins.join(", ")
        );
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
