use crate::{
    config::Config,
    errors::{GatewayError, TuraResult},
    logging::log_api_call,
    models::{ApiCallLog, Role},
};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, time::Instant};

/// One turn of a Gemini conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

impl Content {
    pub fn from_text(role: Role, text: impl Into<String>) -> Self {
        Content {
            role: Some(role.as_str().to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// A role-less content block, as used for `systemInstruction`.
    pub fn instruction(text: impl Into<String>) -> Self {
        Content {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if there is any text.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Client for the Gemini REST API (`generateContent` and Imagen `predict`).
pub struct GeminiClient {
    http: Client,
    api_base: String,
    api_key: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_base: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> TuraResult<Self> {
        let api_key = config.credential()?;
        Ok(Self::new(&config.api_base, api_key))
    }

    pub async fn generate_content(
        &self,
        model: &str,
        payload: &Value,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let body = self.post(model, "generateContent", payload).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn predict(
        &self,
        model: &str,
        payload: &Value,
    ) -> Result<PredictResponse, GatewayError> {
        let body = self.post(model, "predict", payload).await?;
        Ok(serde_json::from_value(body)?)
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        let model = model.trim().trim_start_matches("models/");
        format!("{}/models/{}:{}", self.api_base, model, method)
    }

    async fn post(&self, model: &str, method: &str, payload: &Value) -> Result<Value, GatewayError> {
        let endpoint = self.endpoint(model, method);
        let started = Instant::now();

        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                log::warn!("{} transport failure: {}", endpoint, e);
                GatewayError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: endpoint.clone(),
            request_summary: format!("{} -> {} response bytes", method, body.len()),
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: truncate_text(&body, 512),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
