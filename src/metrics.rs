//! Prometheus metrics collection for gpio-relay.
//!
//! Exposed on an HTTP endpoint when `metrics_port` is configured.
//!
//! - `relay_stanzas_total{kind}` - Inbound stanzas by classification
//! - `relay_commands_total{command}` - Commands dispatched to a handler
//! - `relay_command_duration_seconds{command}` - Handler latency histogram
//! - `relay_unknown_commands_total` - Unknown or declined commands
//! - `relay_help_sent_total` - Help replies (malformed input, subscriptions)
//! - `relay_device_requests_total{outcome}` - Device requests by outcome
//! - `relay_device_request_duration_seconds` - Device round-trip latency

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Inbound stanzas by kind (message, presence, error).
pub static STANZAS: OnceLock<IntCounterVec> = OnceLock::new();

/// Commands dispatched to a registered handler.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Commands answered with the unknown-command reply.
pub static UNKNOWN_COMMANDS: OnceLock<IntCounter> = OnceLock::new();

/// Help replies sent.
pub static HELP_SENT: OnceLock<IntCounter> = OnceLock::new();

/// Device requests by outcome ("ok" or an error code).
pub static DEVICE_REQUESTS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Handler latency by command.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Device request round-trip latency.
pub static DEVICE_LATENCY: OnceLock<Histogram> = OnceLock::new();

/// Initialize all metrics and register them with the global registry.
pub fn init() {
    let r = registry();

    // Helper macro to register metric
    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(
                            error = %e,
                            concat!("Failed to register metric ", stringify!($metric))
                        );
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => tracing::warn!(
                    error = %e,
                    concat!("Failed to create metric ", stringify!($metric))
                ),
            }
        };
    }

    register!(
        STANZAS,
        IntCounterVec::new(
            Opts::new("relay_stanzas_total", "Inbound stanzas by kind"),
            &["kind"]
        )
    );
    register!(
        COMMAND_COUNTER,
        IntCounterVec::new(
            Opts::new("relay_commands_total", "Commands dispatched by name"),
            &["command"]
        )
    );
    register!(
        UNKNOWN_COMMANDS,
        IntCounter::new("relay_unknown_commands_total", "Unknown or declined commands")
    );
    register!(
        HELP_SENT,
        IntCounter::new("relay_help_sent_total", "Help replies sent")
    );
    register!(
        DEVICE_REQUESTS,
        IntCounterVec::new(
            Opts::new("relay_device_requests_total", "Device requests by outcome"),
            &["outcome"]
        )
    );
    register!(
        COMMAND_LATENCY,
        HistogramVec::new(
            HistogramOpts::new("relay_command_duration_seconds", "Handler latency by command")
                .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]),
            &["command"]
        )
    );
    register!(
        DEVICE_LATENCY,
        Histogram::with_opts(
            HistogramOpts::new(
                "relay_device_request_duration_seconds",
                "Device request round-trip latency"
            )
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])
        )
    );
}

/// Render all registered metrics in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ========================================================================
// Recording helpers (no-ops until init() has run)
// ========================================================================

pub fn record_stanza(kind: &str) {
    if let Some(c) = STANZAS.get() {
        c.with_label_values(&[kind]).inc();
    }
}

pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

pub fn record_unknown_command() {
    if let Some(c) = UNKNOWN_COMMANDS.get() {
        c.inc();
    }
}

pub fn record_help_sent() {
    if let Some(c) = HELP_SENT.get() {
        c.inc();
    }
}

pub fn record_device_request(outcome: &str, duration_secs: f64) {
    if let Some(c) = DEVICE_REQUESTS.get() {
        c.with_label_values(&[outcome]).inc();
    }
    if let Some(h) = DEVICE_LATENCY.get() {
        h.observe(duration_secs);
    }
}
