//! OpenAI "responses" completion backend

use crate::domain::mood::CompletionBackend;
use crate::error::{MoodjourError, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const TEMPERATURE: f64 = 0.2;
const MAX_OUTPUT_TOKENS: u32 = 50;

/// Blocking client for one model at one endpoint
pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiBackend {
    pub fn new(api_key: String, model: String, endpoint: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| MoodjourError::RemoteUnavailable(e.to_string()))?;

        Ok(OpenAiBackend {
            client,
            api_key,
            model,
            endpoint,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn payload(&self, prompt: &str) -> Value {
        serde_json::json!({
            "model": self.model,
            "input": [
                {
                    "role": "user",
                    "content": [
                        {"type": "input_text", "text": prompt}
                    ]
                }
            ],
            "temperature": TEMPERATURE,
            "max_output_tokens": MAX_OUTPUT_TOKENS
        })
    }
}

impl CompletionBackend for OpenAiBackend {
    fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.payload(prompt))
            .send()
            .map_err(|e| MoodjourError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MoodjourError::RemoteUnavailable(format!(
                "request failed with status {}",
                status
            )));
        }

        let json: Value = response
            .json()
            .map_err(|e| MoodjourError::RemoteUnavailable(e.to_string()))?;
        extract_output_text(&json).ok_or_else(|| {
            MoodjourError::RemoteUnavailable("response missing text content".to_string())
        })
    }
}

/// Concatenate the `output_text` parts of every `message` output item
pub fn extract_output_text(json: &Value) -> Option<String> {
    let output = json.get("output").and_then(Value::as_array)?;

    let mut text = String::new();
    let mut found = false;
    for item in output {
        if item.get("type").and_then(Value::as_str) != Some("message") {
            continue;
        }
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in content {
            if part.get("type").and_then(Value::as_str) != Some("output_text") {
                continue;
            }
            if let Some(chunk) = part.get("text").and_then(Value::as_str) {
                text.push_str(chunk);
                found = true;
            }
        }
    }

    found.then_some(text)
}
