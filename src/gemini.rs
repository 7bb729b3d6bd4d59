//! Minimal Gemini client for our use-case.
//!
//! We only call generateContent and request a strict JSON payload via the
//! response MIME type. Calls are instrumented and log model names,
//! latencies, and token usage (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Seam between handlers and the real Gemini transport. The model is asked
/// for JSON-formatted output; the raw text payload comes back unparsed so
/// the caller owns the parse step.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
  async fn generate(&self, system: &str, user: &str) -> Result<String, String>;
}

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Gemini {
  /// Construct the client if we find GOOGLE_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("GOOGLE_API_KEY").ok()?;
    let base_url = std::env::var("GEMINI_BASE_URL")
      .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(60))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }
}

#[async_trait]
impl GenerativeModel for Gemini {
  /// JSON-mode generateContent call. Returns the first candidate's text.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model, prompt_len = user.len()))]
  async fn generate(&self, system: &str, user: &str) -> Result<String, String> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GenerateContentRequest {
      system_instruction: Some(RequestContent { parts: vec![Part { text: system.into() }] }),
      contents: vec![RequestContent { parts: vec![Part { text: user.into() }] }],
      generation_config: GenerationConfig { response_mime_type: "application/json".into() },
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "estudai-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", &self.api_key)
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_gemini_error(&body).unwrap_or_else(|| body);
      return Err(format!("Gemini HTTP {}: {}", status, msg));
    }

    let body: GenerateContentResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage_metadata {
      info!(prompt_tokens = ?usage.prompt_token_count, candidate_tokens = ?usage.candidates_token_count, total_tokens = ?usage.total_token_count, "Gemini usage");
    }
    let text = body.candidates.into_iter().next()
      .map(|c| c.content.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
      .unwrap_or_default();

    if text.is_empty() {
      return Err("Gemini returned no candidates".into());
    }
    Ok(text)
  }
}

// --- generateContent DTOs ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  system_instruction: Option<RequestContent>,
  contents: Vec<RequestContent>,
  generation_config: GenerationConfig,
}
#[derive(Serialize)]
struct RequestContent { parts: Vec<Part> }
#[derive(Serialize, Deserialize)]
struct Part { text: String }
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig { response_mime_type: String }

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
  #[serde(default)] candidates: Vec<Candidate>,
  #[serde(default)] usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate { #[serde(default)] content: CandidateContent }
#[derive(Deserialize, Default)]
struct CandidateContent { #[serde(default)] parts: Vec<Part> }
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)] prompt_token_count: Option<u32>,
  #[serde(default)] candidates_token_count: Option<u32>,
  #[serde(default)] total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Google error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn request_serializes_with_camel_case_and_json_mime() {
    let req = GenerateContentRequest {
      system_instruction: Some(RequestContent { parts: vec![Part { text: "sys".into() }] }),
      contents: vec![RequestContent { parts: vec![Part { text: "oi".into() }] }],
      generation_config: GenerationConfig { response_mime_type: "application/json".into() },
    };
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(v["systemInstruction"]["parts"][0]["text"], "sys");
    assert_eq!(v["contents"][0]["parts"][0]["text"], "oi");
  }

  #[test]
  fn response_text_is_joined_from_parts() {
    let raw = r#"{
      "candidates": [{ "content": { "parts": [{ "text": "{\"a\"" }, { "text": ":1}" }], "role": "model" } }],
      "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15 }
    }"#;
    let body: GenerateContentResponse = serde_json::from_str(raw).unwrap();
    let text = body.candidates.into_iter().next()
      .map(|c| c.content.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
      .unwrap_or_default();
    assert_eq!(text, "{\"a\":1}");
  }

  #[test]
  fn google_error_bodies_are_unwrapped() {
    let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
    assert_eq!(extract_gemini_error(body).as_deref(), Some("API key not valid"));
    assert_eq!(extract_gemini_error("not json"), None);
  }
}
