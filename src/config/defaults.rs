//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Relay Defaults
// =============================================================================

pub fn default_status_message() -> String {
    "A GPIO relay bot".to_string()
}

/// Optional whitespace around a single `;`.
pub fn default_separator() -> String {
    r"\s*;\s*".to_string()
}

// =============================================================================
// Client Defaults
// =============================================================================

pub fn default_irc_port() -> u16 {
    6667
}

pub fn default_realname() -> String {
    "gpio-relay".to_string()
}

pub fn default_reconnect_delay() -> u64 {
    5
}

pub fn default_keepalive() -> u64 {
    30
}

// =============================================================================
// Device Defaults
// =============================================================================

pub fn default_device_host() -> String {
    "localhost".to_string()
}

pub fn default_device_port() -> u16 {
    8080
}

pub fn default_device_timeout() -> u64 {
    10
}

pub fn default_advertised_pins() -> Vec<String> {
    ["04", "17", "21", "22", "23", "24", "25"]
        .into_iter()
        .map(String::from)
        .collect()
}
