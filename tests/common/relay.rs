//! Relay process management.
//!
//! Spawns the compiled `gpio-relay` binary against a generated config file.

use std::process::{Child, Command, Stdio};
use tempfile::TempDir;

/// A running relay process. Killed on drop.
pub struct RelayProcess {
    child: Child,
    _dir: TempDir,
}

impl RelayProcess {
    /// Write `config` to a temp dir and start the relay with it.
    ///
    /// `host` is passed as the positional device host argument when set.
    pub fn spawn(config: &str, host: Option<&str>) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, config)?;

        let mut command = Command::new(env!("CARGO_BIN_EXE_gpio-relay"));
        command
            .arg("--config")
            .arg(&config_path)
            .env("RUST_LOG", "gpio_relay=debug")
            .stdout(Stdio::null());
        if let Some(host) = host {
            command.arg(host);
        }

        Ok(Self {
            child: command.spawn()?,
            _dir: dir,
        })
    }

    /// Whether the process has exited, without waiting.
    pub fn has_exited(&mut self) -> anyhow::Result<bool> {
        Ok(self.child.try_wait()?.is_some())
    }
}

impl Drop for RelayProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Minimal config pointing the relay at the fake services.
///
/// `device_host` is the config-file device host; tests exercising the
/// positional override set it to an unreachable name.
pub fn config(irc_port: u16, device_host: &str, device_port: u16, extra_top: &str) -> String {
    format!(
        r#"
{extra_top}
metrics_port = 0

[client]
host = "127.0.0.1"
port = {irc_port}
nick = "gpiobot"
reconnect = false
keepalive_secs = 3600

[device]
host = "{device_host}"
port = {device_port}
timeout_secs = 5
pins = ["04", "17"]
"#
    )
}
