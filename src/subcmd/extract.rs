// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use log::warn;
use thiserror::Error as TeError;

use crate::scraper::{self, ScrapeError, ScrapePolicy};

pub const DEFAULT_OUTPUT_FILE_NAME: &str = "extracted-texts.txt";

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("Provided folder {0:?} does not exist or is not a directory")]
    FolderNotFound(PathBuf),
    #[error("Fail to extract texts because: {0}")]
    Scrape(#[from] ScrapeError),
    #[error("Fail to write file {0:?} because: {1}")]
    WriteOutput(PathBuf, #[source] std::io::Error),
}

pub fn subcmd_extract(folder: &Path, output: Option<&Path>, policy: &ScrapePolicy) -> Result<PathBuf, CmdError> {
    if !folder.is_dir() {
        return Err(CmdError::FolderNotFound(folder.to_path_buf()));
    }
    let output = output.map(Path::to_path_buf).unwrap_or_else(|| folder.join(DEFAULT_OUTPUT_FILE_NAME));

    let texts = scraper::extract_texts_from_folder(folder, policy)?;
    if texts.is_empty() {
        warn!("No translatable text found under {folder:?}.");
    }
    scraper::write_extracted_texts(&texts, &output)
        .map_err(|e| CmdError::WriteOutput(output.clone(), e))?;

    println!("Extracted {} texts to: {}", texts.len(), output.display());
    Ok(output)
}
