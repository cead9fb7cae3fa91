// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod rules;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexSet;
use log::debug;
use regex::Regex;
use thiserror::Error as TeError;
use walkdir::WalkDir;

use self::rules::{ExclusionRule, DEFAULT_RULES};

pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts", ".tsx"];
pub const DEFAULT_IGNORED_DIRS: &[&str] = &["node_modules"];

/// Double- or single-quoted literal. A backslash escapes the next character
/// unless that character is a line terminator (`\n`, `\r`, U+2028, U+2029).
static QUOTED_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#""([^"\\]*(\\[^\n\r\x{2028}\x{2029}][^"\\]*)*)""#,
        "|",
        r#"'([^'\\]*(\\[^\n\r\x{2028}\x{2029}][^'\\]*)*)'"#,
    )).unwrap()
});

#[derive(TeError, Debug)]
pub enum ScrapeError {
    #[error("Failed to walk directory {0:?} because: {1}")]
    Walk(PathBuf, #[source] walkdir::Error),
    #[error("Failed to read file {0:?} because: {1}")]
    ReadFile(PathBuf, #[source] std::io::Error),
}

/// What the scraper reads and what it throws away.
#[derive(Debug, Clone)]
pub struct ScrapePolicy {
    /// File name suffixes (with the leading dot) of files whose content is scanned.
    pub extensions: Vec<String>,
    /// Directory names that are never descended into, in addition to dot-directories.
    pub ignored_dirs: Vec<String>,
    pub rules: Vec<ExclusionRule>,
}

impl Default for ScrapePolicy {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|dir| dir.to_string()).collect(),
            rules: DEFAULT_RULES.to_vec(),
        }
    }
}

impl ScrapePolicy {
    fn is_ignored_dir_name(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignored_dirs.iter().any(|dir| dir == name)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.extensions.iter().any(|ext| path_str.ends_with(ext.as_str()))
    }
}

/// Lists every non-directory entry under `root`, depth-first and sorted by file name.
///
/// Directories whose name starts with `.` or is one of the ignored dependency
/// directories are not descended into. The root itself is always walked.
/// Symbolic links are followed, a link loop is reported as a walk error.
pub fn collect_files(root: &Path, policy: &ScrapePolicy) -> Result<Vec<PathBuf>, ScrapeError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && policy.is_ignored_dir_name(&entry.file_name().to_string_lossy()))
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            ScrapeError::Walk(path, e)
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

/// Pulls every quoted literal out of `content`, without quotes and trimmed.
pub fn quoted_literals(content: &str) -> impl Iterator<Item = &str> {
    QUOTED_LITERAL.find_iter(content).map(|found| {
        let literal = found.as_str();
        // both quote characters are single byte
        literal[1..literal.len() - 1].trim()
    })
}

/// Scans all source files under `root` and returns their translatable strings,
/// unique and in order of discovery.
pub fn extract_texts_from_folder(root: &Path, policy: &ScrapePolicy) -> Result<Vec<String>, ScrapeError> {
    let files = collect_files(root, policy)?;
    debug!("Collected {} files under {:?}", files.len(), root);

    let mut texts = IndexSet::<String>::new();
    let mut scanned = 0usize;
    for file in files.iter().filter(|file| policy.is_source_file(file)) {
        let raw = fs::read(file).map_err(|e| ScrapeError::ReadFile(file.clone(), e))?;
        let content = String::from_utf8_lossy(&raw);
        scanned += 1;
        for text in quoted_literals(&content) {
            if rules::is_translatable(text, &policy.rules) && !texts.contains(text) {
                texts.insert(text.to_string());
            }
        }
    }
    debug!("Scanned {scanned} source files, kept {} unique strings", texts.len());

    Ok(texts.into_iter().collect())
}

/// Writes the extraction result as one string per line.
pub fn write_extracted_texts(texts: &[String], output: &Path) -> Result<(), std::io::Error> {
    fs::write(output, texts.join("\n"))
}
