//! Metrics and liveness endpoint.
//!
//! `GET /metrics` serves the Prometheus text format; `GET /healthz` answers
//! `ok` while the process is running.

use axum::{Router, routing::get};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

async fn health_handler() -> &'static str {
    "ok"
}

fn router() -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(health_handler))
}

/// Start the endpoint on `0.0.0.0:port` in a background task.
///
/// Port `None` or `0` disables the endpoint and returns `None`.
pub fn spawn(port: Option<u16>) -> Option<JoinHandle<()>> {
    let port = port.filter(|p| *p != 0)?;
    crate::metrics::init();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    Some(tokio::spawn(serve(addr)))
}

async fn serve(addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind metrics endpoint");
            return;
        }
    };
    tracing::info!(%addr, "Metrics endpoint listening");

    if let Err(e) = axum::serve(listener, router()).await {
        tracing::error!(error = %e, "Metrics endpoint error");
    }
}
