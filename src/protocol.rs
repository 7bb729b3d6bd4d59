//! Public protocol structs and request validation for the HTTP endpoint.
//! Keep this small and stable to evolve backend and frontend independently.

use serde::Serialize;
use serde_json::Value;

use crate::errors::ApiError;

/// A validated generation request. Each field holds the text that will be
/// interpolated into the prompt (strings as-is, other values in JSON
/// notation).
#[derive(Debug, Clone)]
pub struct ExerciseRequest {
    pub materia: String,
    pub tema: String,
    pub quantidade: String,
    pub dificuldade: String,
}

/// Parse and validate a raw request body:
/// - the body must parse as a JSON object;
/// - `materia`, `tema`, `quantidade` and `dificuldade` must be present and
///   truthy.
///
/// No further validation happens here: `quantidade` has no range check and
/// `dificuldade` is free text, matching the front-end contract.
pub fn parse_exercise_request(body: &[u8]) -> Result<ExerciseRequest, ApiError> {
    let data: Value = serde_json::from_slice(body).map_err(|_| ApiError::InvalidBody)?;
    let map = data.as_object().ok_or(ApiError::InvalidBody)?;

    let field = |name: &str| -> Result<String, ApiError> {
        match map.get(name) {
            Some(v) if !is_falsy(v) => Ok(prompt_text(v)),
            _ => Err(ApiError::MissingFields),
        }
    };

    Ok(ExerciseRequest {
        materia: field("materia")?,
        tema: field("tema")?,
        quantidade: field("quantidade")?,
        dificuldade: field("dificuldade")?,
    })
}

/// Truthiness of a field value: null, false, 0, "", [] and {} all count as
/// missing. Anything else passes through to the prompt.
fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Render a field value the way it should appear inside the prompt.
fn prompt_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
