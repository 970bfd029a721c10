//! Calorie tracker web server.
//!
//! Serves the tracker form and JSON API over HTTP and keeps the history in a
//! flat text file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p kcal-web
//! cargo run -p kcal-web -- --port 8080
//! cargo run -p kcal-web -- --history-file ~/calories.txt
//! ```
//!
//! Then open the printed URL in a browser.
//!
//! ## Submitting from a script
//!
//! **REST** (`POST /api/submit`):
//! ```json
//! {"limit": 2000, "meals": [450, 700, 300, 0, 120]}
//! ```

use std::path::PathBuf;

use clap::Parser;
use kcal_rs::KcalConfig;
use kcal_rs::history::DEFAULT_HISTORY_FILE;
use kcal_rs::ui::tracing::UiTracingLayer;
use kcal_web::{WebConfig, WsMessage, spawn_web};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Daily calorie tracker.
#[derive(Parser)]
#[command(about = "Single-user calorie tracker with a browser-based form")]
struct Args {
    /// Port for the web server.
    #[arg(long, default_value_t = 3002)]
    port: u16,

    /// History file the days are appended to.
    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    history_file: PathBuf,

    /// Directory of extra static files to serve.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    // 1. Logging: terminal output plus the in-memory buffer shown by the UI.
    let (ui_layer, logs) = UiTracingLayer::new();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(ui_layer)
        .init();

    // 2. Configuration from the command line.
    let web_config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
        static_dir: args.static_dir,
        tracker: KcalConfig::default().with_history_path(args.history_file),
        ..Default::default()
    };

    // 3. Serve.
    let (ws_tx, _) = tokio::sync::broadcast::channel::<WsMessage>(web_config.broadcast_capacity);
    let addr = spawn_web(web_config, ws_tx, logs)
        .await
        .map_err(|e| format!("Failed to start web server: {e}"))?;
    println!("Calorie tracker: http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for Ctrl-C: {e}"))?;
    tracing::info!("Shutting down");
    Ok(())
}
