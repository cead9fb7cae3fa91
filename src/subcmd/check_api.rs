// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use thiserror::Error as TeError;

use crate::bundle::TranslationBundle;
use crate::llm::{normalizer, TranslationClient, Transport};
use crate::llm::client::ClientError;
use crate::llm::normalizer::NormalizeError;

pub const DEFAULT_SAMPLE_SENTENCES: &str = "Hello world\nSave changes";

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("API failed: {0}")]
    Request(#[from] ClientError),
    #[error("API answered but the output is unusable: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("Fail to print result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Sends one translation request and prints what came back, without writing anything.
pub fn subcmd_check_api<T: Transport>(languages: &str, sentences: &str, client: &TranslationClient<T>) -> Result<TranslationBundle, CmdError> {
    println!("Sending test request to {} ...", client.endpoint());
    let payload = client.request_translations(languages, sentences)?;
    let bundle = normalizer::normalize_response(&payload)?;
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    println!("API is working!");
    Ok(bundle)
}
