//! gpio-relay - chat-driven GPIO command relay
//!
//! Listens for direct chat messages, turns `command;argument` bodies into
//! handler calls and forwards GPIO commands to a device-control HTTP
//! endpoint.

mod cli;
mod config;
mod device;
mod dispatch;
mod error;
mod gpio;
mod handlers;
mod help;
mod http;
mod metrics;
mod presence;
mod session;
mod telemetry;
mod transport;

#[cfg(test)]
mod test_support;

use crate::cli::Args;
use crate::config::Config;
use crate::device::HttpDevice;
use crate::dispatch::{Dispatcher, Tokenizer};
use crate::handlers::Registry;
use crate::help::HelpText;
use crate::presence::Subscriptions;
use crate::session::Relay;
use crate::transport::reply_queue;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config).map_err(|e| {
        error!(path = %args.config.display(), error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), args.config.display());
    }

    if config.override_device_host(args.host.as_deref()) {
        info!(host = %config.device.host, "Host Address parameter defined");
    } else {
        info!(host = %config.device.host, "Using default Host Address");
    }

    info!(
        server = %config.client.host,
        nick = %config.client.nick,
        device = %format!("{}:{}", config.device.host, config.device.port),
        "Starting gpio-relay"
    );

    // Prometheus metrics are optional; absent or 0 disables the endpoint.
    match http::spawn(config.metrics_port) {
        Some(_) => info!(port = ?config.metrics_port, "Prometheus HTTP server started"),
        None => info!("Prometheus HTTP server disabled"),
    }

    let (replies, mut outbound) = reply_queue();
    let help = HelpText::new(&config.device.pins);
    let registry = Arc::new(Registry::with_builtins());
    info!(commands = ?registry.commands(), "Command registry ready");

    let device = Arc::new(HttpDevice::new(&config.device, replies.clone())?);
    let dispatcher = Dispatcher::new(
        Tokenizer::new(&config.command_argument_separator)?,
        registry,
        replies.clone(),
        device,
        help.clone(),
    );
    let subscriptions = Subscriptions::new(config.allow_auto_subscribe, help, replies);
    let mut relay = Relay::new(
        dispatcher,
        subscriptions,
        config.status_message.clone(),
        Duration::from_secs(config.client.keepalive_secs),
    );

    let client = &config.client;
    let reconnect_delay = Duration::from_secs(client.reconnect_delay_secs);

    loop {
        let span = telemetry::session(&client.host, &client.nick);
        let result = async {
            let (mut source, mut sink) = transport::irc::connect(client).await?;
            relay.run(&mut source, &mut sink, &mut outbound).await
        }
        .instrument(span)
        .await;

        match result {
            Ok(()) => warn!("Chat session ended"),
            Err(e) => error!(error = %e, code = e.error_code(), "Chat session failed"),
        }

        if !client.reconnect {
            info!("Reconnect disabled, shutting down");
            return Ok(());
        }

        info!(delay_secs = client.reconnect_delay_secs, "Reconnecting");
        tokio::time::sleep(reconnect_delay).await;
    }
}
