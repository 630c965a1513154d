//! Device request issuer.
//!
//! Sends compound GPIO tokens to the device-control HTTP service as
//! `GET http://<host>:<port>/gpio/<token>`. Requests run on their own task so
//! the dispatcher never waits for the device; the outcome is observed by
//! logging and metrics only, plus an optional follow-up chat notice on
//! failure.

use crate::config::DeviceConfig;
use crate::error::DeviceError;
use crate::transport::ReplySender;
use reqwest::Url;
use std::time::{Duration, Instant};
use tracing::{Instrument, info, warn};

/// Capability handlers use to reach the device.
pub trait DeviceIssuer: Send + Sync {
    /// Issue `token` on behalf of `origin` without waiting for the outcome.
    fn issue(&self, token: &str, origin: &str);
}

/// Successful device answer.
#[derive(Debug, Clone)]
pub struct DeviceResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP-backed [`DeviceIssuer`].
pub struct HttpDevice {
    client: reqwest::Client,
    base: Url,
    timeout: Duration,
    notify_failures: bool,
    replies: ReplySender,
}

impl HttpDevice {
    /// Build an issuer for the configured endpoint.
    ///
    /// `replies` carries the optional failure notices back to the chat peer.
    pub fn new(config: &DeviceConfig, replies: ReplySender) -> Result<Self, DeviceError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gpio-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let raw = format!("http://{}:{}/gpio", config.host, config.port);
        let base = Url::parse(&raw).map_err(|e| DeviceError::Url(format!("{raw}: {e}")))?;

        info!(endpoint = %base, timeout_secs = config.timeout_secs, "Device endpoint configured");

        Ok(Self {
            client,
            base,
            timeout,
            notify_failures: config.notify_failures,
            replies,
        })
    }

    /// URL for a compound token.
    ///
    /// The token becomes exactly one path segment; reserved characters are
    /// percent-encoded so decoded input cannot leave the `/gpio/` prefix.
    pub fn url_for(&self, token: &str) -> Result<Url, DeviceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DeviceError::Url(format!("{} cannot hold a path", self.base)))?
            .push(token);
        Ok(url)
    }

    fn report(&self, token: &str, origin: &str, result: &Result<DeviceResponse, DeviceError>) {
        report(&self.replies, self.notify_failures, token, origin, result);
    }
}

impl DeviceIssuer for HttpDevice {
    fn issue(&self, token: &str, origin: &str) {
        info!(token = %token, "SEND_CMD");

        let url = match self.url_for(token) {
            Ok(url) => url,
            Err(e) => {
                crate::metrics::record_device_request(e.error_code(), 0.0);
                self.report(token, origin, &Err(e));
                return;
            }
        };

        let client = self.client.clone();
        let timeout = self.timeout;
        let replies = self.replies.clone();
        let notify = self.notify_failures;
        let token = token.to_string();
        let origin = origin.to_string();
        let span = crate::telemetry::device_request(&token, &origin);

        tokio::spawn(
            async move {
                let start = Instant::now();
                let result = fetch(&client, url, timeout).await;
                let outcome = match &result {
                    Ok(_) => "ok",
                    Err(e) => e.error_code(),
                };
                crate::metrics::record_device_request(outcome, start.elapsed().as_secs_f64());
                report(&replies, notify, &token, &origin, &result);
            }
            .instrument(span),
        );
    }
}

/// Perform one GET and collect status and body.
pub async fn fetch(
    client: &reqwest::Client,
    url: Url,
    timeout: Duration,
) -> Result<DeviceResponse, DeviceError> {
    let response = tokio::time::timeout(timeout, client.get(url).send())
        .await
        .map_err(|_| DeviceError::Timeout)??;

    let status = response.status();
    info!(status = status.as_u16(), headers = ?response.headers(), "Device responded");

    let body = tokio::time::timeout(timeout, response.text())
        .await
        .map_err(|_| DeviceError::Timeout)??;

    if status.is_success() {
        Ok(DeviceResponse {
            status: status.as_u16(),
            body,
        })
    } else {
        Err(DeviceError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn report(
    replies: &ReplySender,
    notify_failures: bool,
    token: &str,
    origin: &str,
    result: &Result<DeviceResponse, DeviceError>,
) {
    match result {
        Ok(response) => {
            info!(
                token = %token,
                status = response.status,
                body = %response.body,
                "Device request completed"
            );
        }
        Err(e) => {
            warn!(token = %token, error = %e, code = e.error_code(), "Device request failed");
            if notify_failures {
                replies.send_message(origin, format!("Device request {token} failed: {e}"));
            }
        }
    }
}
