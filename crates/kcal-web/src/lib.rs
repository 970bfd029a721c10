//! Browser-based calorie tracking form for kcal-rs.
//!
//! `kcal-web` provides an axum web server that renders the tracker form,
//! exposes the same operations as a JSON API, and pushes refreshed state to
//! WebSocket clients whenever a day is saved.
//!
//! # Quick start
//!
//! ```ignore
//! use kcal_web::{WebConfig, spawn_web};
//! use kcal_rs::ui::tracing::LogBuffer;
//!
//! let (ws_tx, _) = tokio::sync::broadcast::channel(64);
//! let addr = spawn_web(WebConfig::default(), ws_tx, LogBuffer::default()).await?;
//! println!("Tracker: http://{addr}");
//! ```
//!
//! # Architecture
//!
//! ```text
//! browser ──GET / , POST /submit──▶ pages ─┐
//! script  ──/api/state, /api/submit──▶ api ─┼─▶ kcal_rs::form ──▶ history file
//!                                          │
//! WebSocket clients ◀──WsMessage── broadcast ◀─ (after every save)
//! ```
//!
//! Handlers hold no per-user state: every request re-reads the history file.

mod api;
pub mod broadcast;
mod pages;
mod server;
pub mod snapshot;
mod ws;

pub use broadcast::WsMessage;
pub use snapshot::FormSnapshot;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use kcal_rs::KcalConfig;
use kcal_rs::ui::tracing::LogBuffer;

use crate::api::AppState;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3002`.
    pub bind_addr: SocketAddr,
    /// Directory of extra static files served as the router fallback.
    ///
    /// If `None`, only the form, API and WS endpoints are served.
    pub static_dir: Option<PathBuf>,
    /// Maximum WebSocket broadcast channel capacity. Default: 64.
    ///
    /// Clients that fall behind by this many messages receive a fresh
    /// snapshot to resynchronize.
    pub broadcast_capacity: usize,
    /// Tracker settings (history file, input bounds).
    pub tracker: KcalConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3002)),
            static_dir: None,
            broadcast_capacity: 64,
            tracker: KcalConfig::default(),
        }
    }
}

/// Spawn the web server on a Tokio task.
///
/// Returns the bound address. The server runs until the Tokio runtime shuts
/// down.
///
/// # Arguments
///
/// * `config` — Server configuration.
/// * `broadcast_tx` — Sender half of the WebSocket broadcast channel. Keep a
///   receiver (or call `subscribe`) to observe saves from outside the server.
/// * `logs` — Buffer filled by [`UiTracingLayer`](kcal_rs::ui::tracing::UiTracingLayer);
///   its tail is included in every snapshot.
pub async fn spawn_web(
    config: WebConfig,
    broadcast_tx: tokio::sync::broadcast::Sender<WsMessage>,
    logs: LogBuffer,
) -> std::io::Result<SocketAddr> {
    let app_state = AppState {
        config: Arc::new(config.tracker),
        broadcast_tx,
        logs,
    };
    let router = server::build_router(app_state, config.static_dir);
    server::start_server(router, config.bind_addr).await
}
