//! EstudAI · Exercise-List Backend
//!
//! - Axum HTTP API with a single generation endpoint
//! - Google Gemini integration (via environment variables)
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   GOOGLE_API_KEY     : enables Gemini integration if present
//!   GEMINI_BASE_URL    : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL       : default "gemini-2.0-flash"
//!   PROMPT_CONFIG_PATH : path to TOML config (prompt templates)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use estudai_backend::routes::build_router;
use estudai_backend::state::AppState;
use estudai_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Load .env before telemetry so LOG_LEVEL/LOG_FORMAT from the file apply.
  dotenvy::dotenv().ok();
  telemetry::init_tracing();

  // Build shared application state (prompt templates, Gemini client).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "estudai_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
