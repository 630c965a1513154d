//! Subscription handling.
//!
//! Runs ahead of the dispatcher on every stanza. With auto-subscribe enabled,
//! a subscription request is accepted and the requester gets the help text.

use crate::help::HelpText;
use crate::transport::{PresenceKind, ReplySender, Stanza};
use tracing::{debug, info};

pub struct Subscriptions {
    auto_accept: bool,
    help: HelpText,
    replies: ReplySender,
}

impl Subscriptions {
    pub fn new(auto_accept: bool, help: HelpText, replies: ReplySender) -> Self {
        Self {
            auto_accept,
            help,
            replies,
        }
    }

    /// Inspect a stanza; only presence stanzas are acted on.
    pub fn observe(&self, stanza: &Stanza) {
        let Stanza::Presence { from, kind } = stanza else {
            return;
        };

        match kind {
            PresenceKind::Subscribe { channel } if self.auto_accept => {
                info!(from = %from, channel = %channel, "Accepting subscription request");
                self.replies.accept_subscription(from, channel);
                self.replies.send_message(from, self.help.as_str());
                crate::metrics::record_help_sent();
            }
            PresenceKind::Subscribe { channel } => {
                debug!(
                    from = %from,
                    channel = %channel,
                    "Auto-subscribe disabled, ignoring request"
                );
            }
            PresenceKind::Unavailable => {
                debug!(from = %from, "Peer went offline");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::drain;
    use crate::transport::{Outgoing, reply_queue};

    fn subscribe() -> Stanza {
        Stanza::Presence {
            from: "alice".into(),
            kind: PresenceKind::Subscribe {
                channel: "#lab".into(),
            },
        }
    }

    #[test]
    fn accepts_and_sends_help_when_enabled() {
        let (replies, mut rx) = reply_queue();
        let help = HelpText::new(&["04".to_string()]);
        Subscriptions::new(true, help.clone(), replies).observe(&subscribe());

        assert_eq!(
            drain(&mut rx),
            vec![
                Outgoing::AcceptSubscription {
                    from: "alice".into(),
                    channel: "#lab".into()
                },
                Outgoing::Chat {
                    to: "alice".into(),
                    body: help.as_str().to_string()
                },
            ]
        );
    }

    #[test]
    fn ignores_requests_when_disabled() {
        let (replies, mut rx) = reply_queue();
        Subscriptions::new(false, HelpText::new(&[]), replies).observe(&subscribe());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn ignores_other_stanzas() {
        let (replies, mut rx) = reply_queue();
        let subs = Subscriptions::new(true, HelpText::new(&[]), replies);
        subs.observe(&Stanza::Message {
            from: "alice".into(),
            body: Some("echo;hi".into()),
        });
        subs.observe(&Stanza::Presence {
            from: "alice".into(),
            kind: PresenceKind::Unavailable,
        });
        assert!(drain(&mut rx).is_empty());
    }
}
