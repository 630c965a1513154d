//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Relay chat commands to a GPIO device-control endpoint.
#[derive(Parser, Debug)]
#[command(name = "gpio-relay", version, about)]
pub struct Args {
    /// Device host address. Overrides `device.host` from the config file.
    #[arg(value_name = "HOST")]
    pub host: Option<String>,

    /// Path to the TOML configuration file.
    #[arg(long, short, value_name = "PATH", default_value = "config.toml")]
    pub config: PathBuf,
}
