//! Google Gemini adapter.
//!
//! Speaks the `generateContent` REST API through browser `fetch()` via
//! gloo-net. The API is stateless, so each conversation keeps its own turn
//! history and replays it with every request.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use pharmacy_core::ports::{ConversationPort, GenerativePort};
use pharmacy_types::{PharmacyError, Result, config::ChatConfig};

pub struct GeminiProvider {
    config: ChatConfig,
}

impl GeminiProvider {
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url(),
            self.config.model
        )
    }
}

impl GenerativePort for GeminiProvider {
    fn create_session(&self, system_instruction: &str) -> Result<Rc<dyn ConversationPort>> {
        if !self.config.has_api_key() {
            return Err(PharmacyError::Config("Gemini API key is not set".to_string()));
        }
        Ok(Rc::new(GeminiConversation {
            endpoint: self.endpoint(),
            api_key: self.config.api_key.clone(),
            system_instruction: system_instruction.to_string(),
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
            history: RefCell::new(Vec::new()),
        }))
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

/// One chat with the model; turns accumulate in `history`.
pub struct GeminiConversation {
    endpoint: String,
    api_key: String,
    system_instruction: String,
    temperature: f32,
    max_output_tokens: u32,
    history: RefCell<Vec<Content>>,
}

impl GeminiConversation {
    fn build_request_body(&self, text: &str) -> Value {
        request_body(
            &self.system_instruction,
            &self.history.borrow(),
            text,
            self.temperature,
            self.max_output_tokens,
        )
    }

    pub fn turn_count(&self) -> usize {
        self.history.borrow().len()
    }
}

#[async_trait(?Send)]
impl ConversationPort for GeminiConversation {
    async fn send_message(&self, text: &str) -> Result<Option<String>> {
        let body = self.build_request_body(text);

        let response = Request::post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .map_err(|e| PharmacyError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| PharmacyError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(PharmacyError::Llm(format!("HTTP {}: {}", status, text)));
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| PharmacyError::Llm(e.to_string()))?;

        let reply = response_text(&data);
        if let Some(reply) = &reply {
            let mut history = self.history.borrow_mut();
            history.push(Content::text("user", text));
            history.push(Content::text("model", reply));
        }
        Ok(reply)
    }
}

// ─── API types ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub(crate) fn text(role: &str, text: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part { text: Some(text.to_string()) }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

// ─── Serialization helpers ───────────────────────────────────

pub(crate) fn request_body(
    system_instruction: &str,
    history: &[Content],
    text: &str,
    temperature: f32,
    max_output_tokens: u32,
) -> Value {
    let mut contents: Vec<Content> = history.to_vec();
    contents.push(Content::text("user", text));

    json!({
        "systemInstruction": {
            "parts": [{ "text": system_instruction }],
        },
        "contents": contents,
        "generationConfig": {
            "temperature": temperature,
            "maxOutputTokens": max_output_tokens,
        },
    })
}

/// Text of the first candidate, or `None` when it carries no text.
pub(crate) fn response_text(data: &GenerateResponse) -> Option<String> {
    let content = data.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
