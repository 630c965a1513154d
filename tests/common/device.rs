//! Fake device-control service.
//!
//! Serves `GET /gpio/:token` and reports every decoded token it receives.
//! A response delay can be configured to stand in for a slow device.

use axum::Router;
use axum::extract::{Path, State};
use axum::routing::get;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;

pub struct FakeDevice {
    port: u16,
    tokens: mpsc::UnboundedReceiver<String>,
    completed: mpsc::UnboundedReceiver<String>,
}

#[derive(Clone)]
struct DeviceState {
    tokens: mpsc::UnboundedSender<String>,
    completed: mpsc::UnboundedSender<String>,
    delay: Duration,
}

async fn gpio(State(state): State<DeviceState>, Path(token): Path<String>) -> String {
    let _ = state.tokens.send(token.clone());
    tokio::time::sleep(state.delay).await;
    let _ = state.completed.send(token.clone());
    format!("done {token}")
}

impl FakeDevice {
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with_delay(Duration::ZERO).await
    }

    /// Device that holds every request for `delay` before answering.
    pub async fn spawn_with_delay(delay: Duration) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let (tokens_tx, tokens) = mpsc::unbounded_channel();
        let (completed_tx, completed) = mpsc::unbounded_channel();
        let state = DeviceState {
            tokens: tokens_tx,
            completed: completed_tx,
            delay,
        };
        let app = Router::new()
            .route("/gpio/:token", get(gpio))
            .with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            port,
            tokens,
            completed,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Next token the device was asked to apply.
    pub async fn next_token(&mut self) -> anyhow::Result<String> {
        timeout(Duration::from_secs(5), self.tokens.recv())
            .await?
            .ok_or_else(|| anyhow::anyhow!("device server stopped"))
    }

    /// Next token whose response was sent.
    pub async fn next_completion(&mut self) -> anyhow::Result<String> {
        timeout(Duration::from_secs(10), self.completed.recv())
            .await?
            .ok_or_else(|| anyhow::anyhow!("device server stopped"))
    }

    /// Token of a finished response, without waiting.
    pub fn try_completion(&mut self) -> Option<String> {
        self.completed.try_recv().ok()
    }
}
