//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{
    default_advertised_pins, default_device_host, default_device_port, default_device_timeout,
    default_irc_port, default_keepalive, default_realname, default_reconnect_delay,
    default_separator, default_status_message, default_true,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Presence text set once the chat session is online.
    #[serde(default = "default_status_message")]
    pub status_message: String,
    /// Regex separating the command from its argument in a message body.
    #[serde(default = "default_separator")]
    pub command_argument_separator: String,
    /// Accept subscription requests (IRC invites) and greet with help text.
    #[serde(default)]
    pub allow_auto_subscribe: bool,
    /// Prometheus metrics HTTP port. Absent or 0 disables the endpoint.
    pub metrics_port: Option<u16>,
    /// Chat session settings.
    pub client: ClientConfig,
    /// Device-control endpoint settings.
    #[serde(default)]
    pub device: DeviceConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply the command-line host override.
    ///
    /// Blank values are ignored so `gpio-relay ""` keeps the configured host.
    /// Returns `true` when the override was applied.
    pub fn override_device_host(&mut self, host: Option<&str>) -> bool {
        match host.map(str::trim) {
            Some(host) if !host.is_empty() => {
                self.device.host = host.to_string();
                true
            }
            _ => false,
        }
    }
}

/// Chat server connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Chat server hostname.
    pub host: String,
    /// Chat server port (default: 6667).
    #[serde(default = "default_irc_port")]
    pub port: u16,
    /// Connect with TLS.
    #[serde(default)]
    pub tls: bool,
    /// Verify the server certificate when `tls` is set (default: true).
    #[serde(default = "default_true")]
    pub verify_cert: bool,
    /// Nickname the bot registers with; peers address commands to it.
    pub nick: String,
    /// Username (defaults to the nickname).
    pub username: Option<String>,
    /// Real name / gecos field.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Connection password, sent with PASS before registration.
    pub password: Option<String>,
    /// Re-establish the session when it drops (default: true).
    #[serde(default = "default_true")]
    pub reconnect: bool,
    /// Seconds to wait before reconnecting (default: 5).
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_secs: u64,
    /// Seconds between keepalive pings (default: 30).
    #[serde(default = "default_keepalive")]
    pub keepalive_secs: u64,
    /// Channels to join once online.
    #[serde(default)]
    pub channels: Vec<String>,
}

impl ClientConfig {
    /// Username sent in USER, falling back to the nickname.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nick)
    }
}

/// Device-control HTTP endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Device host (default: "localhost"); the first CLI argument overrides it.
    #[serde(default = "default_device_host")]
    pub host: String,
    /// Device HTTP port (default: 8080).
    #[serde(default = "default_device_port")]
    pub port: u16,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_device_timeout")]
    pub timeout_secs: u64,
    /// Send a follow-up chat message when a device request fails.
    #[serde(default)]
    pub notify_failures: bool,
    /// GPIO pins advertised in the help text. Not used for validation.
    #[serde(default = "default_advertised_pins")]
    pub pins: Vec<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: default_device_host(),
            port: default_device_port(),
            timeout_secs: default_device_timeout(),
            notify_failures: false,
            pins: default_advertised_pins(),
        }
    }
}
