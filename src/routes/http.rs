//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ApiError;
use crate::logic::build_exercise_list;
use crate::protocol::{parse_exercise_request, HealthOut};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

/// The body is taken raw so malformed JSON and non-object payloads surface
/// as this API's own 400 body instead of the framework rejection.
#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_post_estudar(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req = parse_exercise_request(&body)?;
    let lista = build_exercise_list(&state, &req).await?;
    info!(target: "estudar", materia = %req.materia, tema = %req.tema, quantidade = %req.quantidade, "Exercise list served");
    Ok(Json(lista))
}
