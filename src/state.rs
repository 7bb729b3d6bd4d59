//! Application state: prompt templates plus the long-lived model client.
//!
//! Built once at process start and passed explicitly into the handlers, so
//! tests can substitute a stub model through the `GenerativeModel` seam.
//! All of it is read-only after construction and safe to share.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::{load_prompt_config_from_env, Prompts};
use crate::gemini::{Gemini, GenerativeModel};

#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<dyn GenerativeModel>>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load prompt config, init the Gemini client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_prompt_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        let gemini = Gemini::from_env();
        match &gemini {
            Some(g) => {
                info!(target: "estudai_backend", base_url = %g.base_url, model = %g.model, "Gemini enabled.")
            }
            None => {
                info!(target: "estudai_backend", "Gemini disabled (no GOOGLE_API_KEY). Generation requests will fail.")
            }
        }

        Self {
            model: gemini.map(|g| Arc::new(g) as Arc<dyn GenerativeModel>),
            prompts,
        }
    }

    /// State with an injected model client and explicit prompts. Used by
    /// tests.
    pub fn with_model(model: Arc<dyn GenerativeModel>, prompts: Prompts) -> Self {
        Self {
            model: Some(model),
            prompts,
        }
    }
}
