use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SimulationError;
use crate::llm::media::{normalize_image_mime_type, InlineImage};
use crate::llm::{AdviceResponse, BackendError, ContentSegment, EditResponse, GenerativeBackend};
use crate::utils::http::build_http_client;
use crate::utils::timing::log_llm_timing;

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

impl GeminiResponse {
    fn into_first_parts(self) -> Vec<GeminiPart> {
        self.candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: Config,
}

impl GeminiClient {
    pub fn new(config: Config) -> Result<Self, SimulationError> {
        if config.gemini_api_key.trim().is_empty() {
            return Err(SimulationError::Configuration(
                "GEMINI_API_KEY is required".to_string(),
            ));
        }
        let http = build_http_client(config.request_timeout)
            .map_err(|err| SimulationError::Configuration(format!("HTTP client: {err}")))?;
        Ok(Self { http, config })
    }

    fn redact_api_key(&self, text: &str) -> String {
        let key = self.config.gemini_api_key.trim();
        if key.is_empty() {
            return text.to_string();
        }
        text.replace(key, "[redacted]")
    }

    async fn call_gemini_api(
        &self,
        model: &str,
        payload: Value,
    ) -> Result<GeminiResponse, BackendError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.gemini_api_base_url, model
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            let payload_summary = summarize_gemini_payload(&payload);
            debug!(target: "llm.gemini", model = model, payload = %payload_summary);
        }

        let response = match self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.gemini_api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let err_text = self.redact_api_key(&err.to_string());
                warn!(
                    "Gemini request failed to send: {} (timeout={}, connect={}, model={})",
                    err_text,
                    err.is_timeout(),
                    err.is_connect(),
                    model
                );
                if err.is_timeout() {
                    return Err(BackendError::new(format!(
                        "Gemini request timed out after {}s",
                        self.config.request_timeout.as_secs()
                    )));
                }
                return Err(BackendError::new(format!("Gemini request failed: {err_text}")));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let (message, body_summary) = summarize_error_body(&body);
            warn!(
                "Gemini API error: status={}, model={}, body={}",
                status,
                model,
                self.redact_api_key(&body_summary)
            );
            let detail = self.redact_api_key(&message.unwrap_or(body_summary));
            return Err(BackendError::new(format!(
                "Gemini request failed with status {status}: {detail}"
            )));
        }

        let value = response.json::<GeminiResponse>().await.map_err(|err| {
            BackendError::new(format!(
                "Gemini returned an unreadable response: {}",
                self.redact_api_key(&err.to_string())
            ))
        })?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(target: "llm.gemini", model = model, response = %summarize_gemini_response(&value));
        }
        Ok(value)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn edit_image(
        &self,
        image: &InlineImage,
        instruction: &str,
    ) -> Result<EditResponse, BackendError> {
        let model = self.config.gemini_image_model.as_str();
        let payload = build_edit_payload(image, instruction, &self.config.gemini_safety_settings);
        let metadata = request_metadata(image, instruction);
        log_llm_timing("gemini", model, "edit_image", Some(metadata), || async {
            let response = self.call_gemini_api(model, payload).await?;
            Ok::<_, BackendError>(edit_response_from(response))
        })
        .await
    }

    async fn advise(
        &self,
        image: &InlineImage,
        instruction: &str,
    ) -> Result<AdviceResponse, BackendError> {
        let model = self.config.gemini_text_model.as_str();
        let payload = build_advice_payload(
            image,
            instruction,
            self.config.gemini_temperature,
            &self.config.gemini_safety_settings,
        );
        let metadata = request_metadata(image, instruction);
        log_llm_timing("gemini", model, "advise", Some(metadata), || async {
            let response = self.call_gemini_api(model, payload).await?;
            Ok::<_, BackendError>(advice_response_from(response))
        })
        .await
    }
}

fn request_metadata(image: &InlineImage, instruction: &str) -> Value {
    json!({
        "image_bytes": image.bytes.len(),
        "mime_type": image.mime_type,
        "instruction_chars": instruction.chars().count(),
    })
}

fn build_safety_settings(profile: &str) -> Vec<Value> {
    let threshold = match profile {
        "standard" => "BLOCK_MEDIUM_AND_ABOVE",
        _ => "OFF",
    };

    vec![
        json!({ "category": "HARM_CATEGORY_HARASSMENT", "threshold": threshold }),
        json!({ "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": threshold }),
        json!({ "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": threshold }),
        json!({ "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": threshold }),
    ]
}

fn build_image_parts(image: &InlineImage, text: &str) -> Vec<Value> {
    vec![
        json!({
            "inlineData": {
                "mimeType": image.mime_type,
                "data": image.to_base64()
            }
        }),
        json!({ "text": text }),
    ]
}

fn build_edit_payload(image: &InlineImage, prompt: &str, safety_profile: &str) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": build_image_parts(image, prompt) }],
        "generationConfig": {
            "responseModalities": ["TEXT", "IMAGE"]
        },
        "safetySettings": build_safety_settings(safety_profile),
    })
}

fn build_advice_payload(
    image: &InlineImage,
    prompt: &str,
    temperature: f32,
    safety_profile: &str,
) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": build_image_parts(image, prompt) }],
        "generationConfig": {
            "temperature": temperature
        },
        "safetySettings": build_safety_settings(safety_profile),
    })
}

/// Keeps segment order from the first candidate; undecodable image data is dropped.
fn edit_response_from(response: GeminiResponse) -> EditResponse {
    let mut segments = Vec::new();
    for part in response.into_first_parts() {
        match part {
            GeminiPart::Text { text } => segments.push(ContentSegment::Text(text)),
            GeminiPart::InlineData { inline_data } => {
                if !inline_data.mime_type.starts_with("image/") {
                    continue;
                }
                match general_purpose::STANDARD.decode(inline_data.data.as_bytes()) {
                    Ok(bytes) if !bytes.is_empty() => {
                        segments.push(ContentSegment::InlineImage(InlineImage {
                            bytes,
                            mime_type: normalize_image_mime_type(&inline_data.mime_type),
                        }));
                    }
                    Ok(_) => {}
                    Err(err) => warn!("Discarding undecodable Gemini image part: {}", err),
                }
            }
            GeminiPart::Other(_) => {}
        }
    }
    EditResponse { segments }
}

fn advice_response_from(response: GeminiResponse) -> AdviceResponse {
    let texts: Vec<String> = response
        .into_first_parts()
        .into_iter()
        .filter_map(|part| match part {
            GeminiPart::Text { text } if !text.trim().is_empty() => Some(text),
            _ => None,
        })
        .collect();

    AdviceResponse {
        text: if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        },
    }
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn summarize_gemini_payload(payload: &Value) -> Value {
    let mut summary = Map::new();

    if let Some(parts) = payload
        .pointer("/contents/0/parts")
        .and_then(|value| value.as_array())
    {
        let parts: Vec<Value> = parts
            .iter()
            .map(|part| {
                if let Some(text) = part.get("text").and_then(|value| value.as_str()) {
                    json!({ "text": truncate_for_log(text, 200) })
                } else if let Some(inline_data) = part.get("inlineData") {
                    let mime_type = inline_data
                        .get("mimeType")
                        .and_then(|value| value.as_str())
                        .unwrap_or("unknown");
                    let data_len = inline_data
                        .get("data")
                        .and_then(|value| value.as_str())
                        .map(|value| value.len())
                        .unwrap_or(0);
                    json!({ "inlineData": { "mimeType": mime_type, "dataLen": data_len } })
                } else {
                    json!({ "unknownPart": true })
                }
            })
            .collect();
        summary.insert("parts".to_string(), Value::Array(parts));
    }

    if let Some(config) = payload.get("generationConfig") {
        summary.insert("generationConfig".to_string(), config.clone());
    }

    Value::Object(summary)
}

fn summarize_gemini_response(response: &GeminiResponse) -> Value {
    let mut text_parts = 0usize;
    let mut image_parts = 0usize;

    let candidates = response.candidates.as_deref().unwrap_or(&[]);
    for candidate in candidates {
        let parts = candidate
            .content
            .as_ref()
            .and_then(|content| content.parts.as_deref())
            .unwrap_or(&[]);
        for part in parts {
            match part {
                GeminiPart::Text { .. } => text_parts += 1,
                GeminiPart::InlineData { inline_data } => {
                    if inline_data.mime_type.starts_with("image/") {
                        image_parts += 1;
                    }
                }
                GeminiPart::Other(_) => {}
            }
        }
    }

    json!({
        "candidates": candidates.len(),
        "textParts": text_parts,
        "imageParts": image_parts,
    })
}

fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            });
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}
