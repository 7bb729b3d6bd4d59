//! Tracing setup.
//!
//! LOG_LEVEL takes a tracing filter — a bare level ("debug") or full
//! directives ("info,estudar=trace,tower_http=warn"). LOG_FORMAT set to
//! "json" emits structured lines for log collectors; anything else stays
//! human-readable.

use tracing_subscriber::EnvFilter;

/// Default directives: the generation pipeline (`estudar`) and process
/// lifecycle (`estudai_backend`) log debug, everything else info. Request
/// spans come from the router's TraceLayer and follow the same filter.
const DEFAULT_DIRECTIVES: &str = "info,estudar=debug,estudai_backend=debug";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
