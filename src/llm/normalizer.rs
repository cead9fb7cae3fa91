// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::Value;
use thiserror::Error as TeError;

use crate::bundle::TranslationBundle;

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```json(.*?)```").unwrap());
static ANY_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

#[derive(TeError, Debug)]
pub enum NormalizeError {
    #[error("No response data found")]
    EmptyPayload,
    #[error("Unknown response format")]
    UnknownEnvelope,
    #[error("No fenced code block found in model output")]
    MissingCodeFence,
    #[error("Error parsing JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// One known response envelope: pulls the generated text out of a payload
/// shaped the way some provider answers.
struct EnvelopeExtractor {
    name: &'static str,
    extract: for<'a> fn(&'a Value) -> Option<&'a str>,
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}

fn first_choice_content(value: &Value) -> Option<&str> {
    non_empty_str(value.pointer("/choices/0/message/content"))
}

/// Tried in order, first hit wins.
const ENVELOPES: &[EnvelopeExtractor] = &[
    // OpenAI-compatible chat completion
    EnvelopeExtractor { name: "choices", extract: first_choice_content },
    // Ollama generate
    EnvelopeExtractor { name: "response", extract: |value| non_empty_str(value.get("response")) },
    EnvelopeExtractor { name: "text", extract: |value| non_empty_str(value.get("text")) },
    // payload still wrapped in an HTTP client response object
    EnvelopeExtractor { name: "data.choices", extract: |value| value.get("data").and_then(first_choice_content) },
    EnvelopeExtractor { name: "data.text", extract: |value| non_empty_str(value.pointer("/data/text")) },
];

fn is_falsy(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Gets the generated text out of whatever the endpoint returned.
pub fn unwrap_envelope(payload: &Value) -> Result<&str, NormalizeError> {
    if is_falsy(payload) {
        return Err(NormalizeError::EmptyPayload);
    }
    match payload {
        Value::String(text) => Ok(text.as_str()),
        Value::Object(_) | Value::Array(_) => {
            ENVELOPES.iter().find_map(|envelope| {
                let text = (envelope.extract)(payload)?;
                debug!("Response matched the {:?} envelope", envelope.name);
                Some(text)
            }).ok_or(NormalizeError::UnknownEnvelope)
        },
        _ => Err(NormalizeError::UnknownEnvelope),
    }
}

/// Content of the first ```` ```json ```` block, or else of the first fenced block of any kind.
pub fn find_fenced_block(text: &str) -> Option<&str> {
    JSON_FENCE.captures(text)
        .or_else(|| ANY_FENCE.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|found| found.as_str())
}

/// Turns a raw endpoint payload into a translation bundle.
///
/// Every way the model output can be unusable is reported as a distinct
/// [`NormalizeError`], so callers can tell a failed answer apart from a model
/// that legitimately returned an empty object.
pub fn normalize_response(payload: &Value) -> Result<TranslationBundle, NormalizeError> {
    let text = unwrap_envelope(payload)?;
    debug!("Raw response: {text}");
    let block = find_fenced_block(text).ok_or(NormalizeError::MissingCodeFence)?;
    Ok(serde_json::from_str::<TranslationBundle>(block.trim())?)
}
