// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::info;
use thiserror::Error as TeError;

/// Generated i18n key to translated sentence, for one language.
pub type LanguageTable = IndexMap<String, String>;

/// Language code (e.g. `eng`, `vie`) to its key/translation table.
///
/// The model decides both the language codes and the keys, so nothing
/// guarantees that every language carries the same key set.
pub type TranslationBundle = IndexMap<String, LanguageTable>;

pub const OUTPUT_FILE_NAME: &str = "i18n.json";

#[derive(TeError, Debug)]
pub enum SaveError {
    #[error("No translation data to save")]
    MissingData,
    #[error("No file path provided")]
    MissingFilePath,
    #[error("Failed to get directory name of {0:?}")]
    NoDirName(PathBuf),
    #[error("Failed to serialize translations: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write file {0:?} because: {1}")]
    WriteFile(PathBuf, #[source] std::io::Error),
}

/// `i18n.json` next to the given input file.
pub fn output_path_for(input_file: &Path) -> Result<PathBuf, SaveError> {
    if input_file.as_os_str().is_empty() {
        return Err(SaveError::MissingFilePath);
    }
    let dir = input_file.parent().ok_or_else(|| SaveError::NoDirName(input_file.to_path_buf()))?;
    Ok(dir.join(OUTPUT_FILE_NAME))
}

/// Writes `bundle` as 2-space indented JSON into the directory of `input_file`
/// and returns the path of the written file.
pub fn save_to_file(bundle: Option<&TranslationBundle>, input_file: &Path) -> Result<PathBuf, SaveError> {
    let bundle = bundle.ok_or(SaveError::MissingData)?;
    let output_path = output_path_for(input_file)?;
    let content = serde_json::to_string_pretty(bundle)?;
    fs::write(&output_path, content).map_err(|e| SaveError::WriteFile(output_path.clone(), e))?;
    info!("File saved to {}", output_path.display());
    Ok(output_path)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    pub fn sample_bundle() -> TranslationBundle {
        let mut eng = LanguageTable::new();
        eng.insert("greeting".to_string(), "Hello".to_string());
        eng.insert("farewell".to_string(), "Goodbye".to_string());
        let mut vie = LanguageTable::new();
        vie.insert("greeting".to_string(), "Xin chào".to_string());
        vie.insert("farewell".to_string(), "Tạm biệt".to_string());
        let mut bundle = TranslationBundle::new();
        bundle.insert("eng".to_string(), eng);
        bundle.insert("vie".to_string(), vie);
        bundle
    }

    #[test]
    fn tst_output_path_for() {
        assert_eq!(output_path_for(Path::new("/a/b/input.txt")).unwrap(), PathBuf::from("/a/b/i18n.json"));
        assert_eq!(output_path_for(Path::new("input.txt")).unwrap(), PathBuf::from("i18n.json"));
        assert!(matches!(output_path_for(Path::new("")), Err(SaveError::MissingFilePath)));
        assert!(matches!(output_path_for(Path::new("/")), Err(SaveError::NoDirName(_))));
    }

    #[test]
    fn tst_save_to_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        fs::write(&input, "Hello\nGoodbye").unwrap();

        let written = save_to_file(Some(&sample_bundle()), &input).unwrap();
        assert_eq!(written, dir.path().join("i18n.json"));
        let expected = r#"{
  "eng": {
    "greeting": "Hello",
    "farewell": "Goodbye"
  },
  "vie": {
    "greeting": "Xin chào",
    "farewell": "Tạm biệt"
  }
}"#;
        assert_eq!(fs::read_to_string(&written).unwrap(), expected);
    }

    #[test]
    fn tst_save_empty_bundle_writes_empty_object() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        let written = save_to_file(Some(&TranslationBundle::new()), &input).unwrap();
        assert_eq!(fs::read_to_string(&written).unwrap(), "{}");
    }

    #[test]
    fn tst_save_preconditions() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        assert!(matches!(save_to_file(None, &input), Err(SaveError::MissingData)));
        assert!(matches!(save_to_file(Some(&sample_bundle()), Path::new("")), Err(SaveError::MissingFilePath)));
        assert!(!dir.path().join("i18n.json").exists());
    }
}
