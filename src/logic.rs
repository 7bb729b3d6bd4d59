//! Core behavior behind the HTTP handler: prompt synthesis, one model call
//! in JSON mode, and parsing of the model's reply.
//!
//! There is deliberately no retry and no caching here. The operation either
//! fully succeeds with a parsed document or fails as an upstream error.

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::errors::ApiError;
use crate::protocol::ExerciseRequest;
use crate::state::AppState;
use crate::util::{fill_template, trunc_for_log};

/// Render the generation prompt from the configured templates, call the
/// model, and parse the returned text as JSON. Every failure on this path
/// surfaces as `ApiError::Upstream`.
#[instrument(level = "info", skip(state, req), fields(materia = %req.materia, tema = %req.tema, quantidade = %req.quantidade, dificuldade = %req.dificuldade))]
pub async fn build_exercise_list(state: &AppState, req: &ExerciseRequest) -> Result<Value, ApiError> {
  let model = state.model.as_ref().ok_or_else(|| {
    error!(target: "estudar", "GOOGLE_API_KEY not set; cannot generate exercise lists");
    ApiError::Upstream("Gemini client not configured (GOOGLE_API_KEY missing)".into())
  })?;

  let user = fill_template(
    &state.prompts.lista_user_template,
    &[
      ("materia", req.materia.as_str()),
      ("tema", req.tema.as_str()),
      ("quantidade", req.quantidade.as_str()),
      ("dificuldade", req.dificuldade.as_str()),
    ],
  );

  let start = std::time::Instant::now();
  let result = model.generate(&state.prompts.lista_system, &user).await;
  let elapsed = start.elapsed();

  let text = match result {
    Ok(t) => {
      info!(target: "estudar", ?elapsed, reply_len = t.len(), "Model response received");
      t
    }
    Err(e) => {
      error!(target: "estudar", ?elapsed, error = %e, "Model call failed during list generation");
      return Err(ApiError::Upstream(e));
    }
  };

  // The document is relayed verbatim; its shape is the model's contract
  // with the front-end, not ours to re-validate.
  serde_json::from_str::<Value>(&text).map_err(|e| {
    error!(target: "estudar", error = %e, reply = %trunc_for_log(&text, 200), "Model reply was not valid JSON");
    ApiError::Upstream(format!("Model reply was not valid JSON: {e}"))
  })
}
