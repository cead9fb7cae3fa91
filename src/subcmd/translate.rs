// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::{Path, PathBuf};
use log::{info, warn};
use thiserror::Error as TeError;

use crate::bundle::{self, SaveError, TranslationBundle};
use crate::llm::{TranslationClient, Transport};

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("Provided file {0:?} does not exist")]
    FileNotFound(PathBuf),
    #[error("Fail to read file {0:?} because: {1}")]
    ReadInput(PathBuf, #[source] std::io::Error),
    #[error("No translations generated")]
    NoTranslations,
    #[error("Fail to save translations because: {0}")]
    Save(#[from] SaveError),
}

pub fn subcmd_translate<T: Transport>(input_file: &Path, languages: &str, client: &TranslationClient<T>) -> Result<PathBuf, CmdError> {
    if !input_file.is_file() {
        return Err(CmdError::FileNotFound(input_file.to_path_buf()));
    }
    let sentences = fs::read_to_string(input_file)
        .map_err(|e| CmdError::ReadInput(input_file.to_path_buf(), e))?;

    info!("Generating translations for {} lines into: {languages}", sentences.lines().count());
    let translations = match client.translate(languages, &sentences).ok_or(CmdError::NoTranslations)? {
        Ok(translations) => {
            if translations.is_empty() {
                info!("Model returned an empty translation set.");
            }
            translations
        },
        Err(err) => {
            warn!("Model output contained no usable translations ({err}), writing an empty object.");
            TranslationBundle::new()
        },
    };

    let output_path = bundle::save_to_file(Some(&translations), input_file)?;
    println!("Wrote translations to: {}", output_path.display());
    Ok(output_path)
}
