//! Session loop.
//!
//! Drives one connected chat session: inbound stanzas are observed for
//! subscriptions and dispatched one at a time, the outbound queue is
//! drained into the sink in FIFO order, and a keepalive is sent on a fixed
//! period. The loop ends when the source ends or fails; reconnecting is the
//! caller's decision.

use crate::dispatch::Dispatcher;
use crate::error::TransportError;
use crate::presence::Subscriptions;
use crate::transport::{Outgoing, StanzaSink, StanzaSource};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

pub struct Relay {
    dispatcher: Dispatcher,
    subscriptions: Subscriptions,
    /// Last status text, re-announced at the start of every session.
    status: String,
    keepalive: Duration,
}

impl Relay {
    pub fn new(
        dispatcher: Dispatcher,
        subscriptions: Subscriptions,
        status: impl Into<String>,
        keepalive: Duration,
    ) -> Self {
        Self {
            dispatcher,
            subscriptions,
            status: status.into(),
            keepalive,
        }
    }

    /// Run one session until the source ends (`Ok`) or a transport error.
    ///
    /// `outbound` outlives the session, so units queued while disconnected
    /// are delivered on the next one.
    pub async fn run<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        outbound: &mut UnboundedReceiver<Outgoing>,
    ) -> Result<(), TransportError>
    where
        S: StanzaSource,
        K: StanzaSink,
    {
        info!(identity = %sink.self_identity(), "Session online");
        sink.deliver(Outgoing::Status(self.status.clone())).await?;

        let mut keepalive =
            tokio::time::interval_at(Instant::now() + self.keepalive, self.keepalive);
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                Some(out) = outbound.recv() => {
                    if let Outgoing::Status(text) = &out {
                        self.status.clone_from(text);
                    }
                    sink.deliver(out).await?;
                }

                stanza = source.next_stanza() => match stanza? {
                    Some(stanza) => {
                        self.subscriptions.observe(&stanza);
                        self.dispatcher.dispatch(&stanza);
                    }
                    None => {
                        info!("Chat server closed the session");
                        return Ok(());
                    }
                },

                _ = keepalive.tick() => {
                    debug!("Sending keepalive");
                    sink.deliver(Outgoing::KeepAlive).await?;
                }
            }
        }
    }
}
