// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use log::{debug, error};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as TeError;

use crate::bundle::TranslationBundle;
use super::normalizer::{self, NormalizeError};
use super::prompt::build_translation_prompt;

pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";
pub const DEFAULT_MAX_TOKENS: u32 = 58183;
pub const DEFAULT_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_TOP_P: f64 = 0.9;

#[derive(TeError, Debug)]
pub enum ClientError {
    #[error("Error making request: {0}")]
    Ureq(#[from] ureq::Error),
    #[error("Error serializing request: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Shape of the endpoint the request is sent to.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApiStyle {
    /// OpenAI-compatible chat completion, the prompt is sent as a user message
    #[default]
    Chat,
    /// Ollama-style generate endpoint, the prompt is sent as-is
    Generate,
}

impl std::str::FromStr for ApiStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(Self::Chat),
            "generate" => Ok(Self::Generate),
            other => Err(format!("unknown api style {other:?}, expected \"chat\" or \"generate\"")),
        }
    }
}

/// Model and sampling parameters sent along with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSettings {
    pub style: ApiStyle,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            style: ApiStyle::default(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    stream: bool,
}

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

impl ModelSettings {
    /// JSON body carrying `prompt` in the shape expected by [`ModelSettings::style`].
    pub fn request_body(&self, prompt: &str) -> Result<Value, serde_json::Error> {
        match self.style {
            ApiStyle::Chat => serde_json::to_value(ChatCompletionRequest {
                model: &self.model,
                messages: vec![ChatMessage { role: "user", content: prompt }],
                max_tokens: self.max_tokens,
                temperature: self.temperature,
                top_p: self.top_p,
                stream: false,
            }),
            ApiStyle::Generate => serde_json::to_value(GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            }),
        }
    }
}

/// Sends one JSON request and hands back the decoded response body.
pub trait Transport {
    fn post_json(&self, url: &str, bearer: &str, body: &Value) -> Result<Value, ClientError>;
}

/// Blocking HTTP transport. A non-2xx status is reported as an error.
#[derive(Debug, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn post_json(&self, url: &str, bearer: &str, body: &Value) -> Result<Value, ClientError> {
        let mut resp = ureq::post(url)
            .header("Authorization", &format!("Bearer {bearer}"))
            .header("Content-Type", "application/json")
            .send(serde_json::to_string(body)?)?;
        let resp_text = resp.body_mut().read_to_string()?;
        Ok(decode_body(resp_text))
    }
}

/// Parses a response body as JSON. Some servers answer with plain text, that
/// text is kept as a JSON string so a fenced block can still be found in it.
fn decode_body(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}

pub struct TranslationClient<T: Transport = UreqTransport> {
    endpoint: String,
    api_key: String,
    settings: ModelSettings,
    transport: T,
}

impl TranslationClient<UreqTransport> {
    pub fn new(endpoint: &str, api_key: &str, settings: ModelSettings) -> Self {
        Self::with_transport(endpoint, api_key, settings, UreqTransport)
    }
}

impl<T: Transport> TranslationClient<T> {
    pub fn with_transport(endpoint: &str, api_key: &str, settings: ModelSettings, transport: T) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            settings,
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a single translation request and returns the raw payload.
    pub fn request_translations(&self, languages: &str, sentences: &str) -> Result<Value, ClientError> {
        let prompt = build_translation_prompt(languages, sentences);
        let body = self.settings.request_body(&prompt)?;
        debug!("POST {} ({:?} style, model {})", self.endpoint, self.settings.style, self.settings.model);
        let payload = self.transport.post_json(&self.endpoint, &self.api_key, &body)?;
        debug!("API response: {payload}");
        Ok(payload)
    }

    /// Requests translations and normalizes the answer.
    ///
    /// Returns `None` when the request itself failed (the error is logged),
    /// `Some(Err(_))` when the model answered with output that cannot be used.
    pub fn translate(&self, languages: &str, sentences: &str) -> Option<Result<TranslationBundle, NormalizeError>> {
        match self.request_translations(languages, sentences) {
            Ok(payload) => Some(normalizer::normalize_response(&payload)),
            Err(err) => {
                error!("API error: {err}");
                None
            },
        }
    }
}
