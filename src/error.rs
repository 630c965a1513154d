//! Unified error handling for gpio-relay.
//!
//! Runtime errors are split by layer (chat transport, device requests) and
//! carry a static code for metric labeling. Configuration errors live in
//! [`crate::config`] next to the loader.

use thiserror::Error;

// ============================================================================
// Transport Errors (chat session)
// ============================================================================

/// Errors raised by the chat session transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line codec error: {0}")]
    Codec(#[from] tokio_util::codec::LinesCodecError),

    #[error("tls error: {0}")]
    Tls(String),

    #[error("registration rejected: {0}")]
    Registration(String),

    #[error("connection closed by server")]
    Closed,
}

impl TransportError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Codec(_) => "codec",
            Self::Tls(_) => "tls",
            Self::Registration(_) => "registration",
            Self::Closed => "closed",
        }
    }
}

// ============================================================================
// Device Errors (GPIO HTTP endpoint)
// ============================================================================

/// Errors raised while issuing a request to the device-control endpoint.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("invalid device url: {0}")]
    Url(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("device answered {status}: {body}")]
    Status { status: u16, body: String },
}

impl DeviceError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Url(_) => "bad_url",
            Self::Http(e) if e.is_connect() => "connect",
            Self::Http(e) if e.is_timeout() => "timeout",
            Self::Http(_) => "http",
            Self::Timeout => "timeout",
            Self::Status { .. } => "bad_status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_codes() {
        assert_eq!(TransportError::Closed.error_code(), "closed");
        assert_eq!(
            TransportError::Registration("bad password".into()).error_code(),
            "registration"
        );
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(TransportError::from(io).error_code(), "io");
    }

    #[test]
    fn test_device_error_codes() {
        assert_eq!(DeviceError::Timeout.error_code(), "timeout");
        assert_eq!(DeviceError::Url("x".into()).error_code(), "bad_url");
        let err = DeviceError::Status {
            status: 404,
            body: "no such pin".into(),
        };
        assert_eq!(err.error_code(), "bad_status");
        assert_eq!(err.to_string(), "device answered 404: no such pin");
    }
}
