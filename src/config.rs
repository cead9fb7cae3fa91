// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

// Optional INI file, e.g. ~/.config/llm-i18n-utils/config.ini on Linux:
//
// [provider]
// api_url = https://api.example.com/v1/chat/completions
// api_key = sk-...
// api_style = chat
// model = meta-llama/Llama-3.3-70B-Instruct
// max_tokens = 58183
// temperature = 0.1
// top_p = 0.9
//
// [extract]
// extensions = .js,.jsx,.ts,.tsx
// ignore_dirs = node_modules

use std::fs;
use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use directories::ProjectDirs;
use log::debug;
use thiserror::Error as TeError;

use crate::llm::{ApiStyle, ModelSettings};
use crate::scraper::ScrapePolicy;

pub const CONFIG_FILE_NAME: &str = "config.ini";

#[derive(TeError, Debug)]
pub enum ConfigError {
    #[error("Config file {0:?} does not exist")]
    FileNotFound(PathBuf),
    #[error("Can not read config file {0:?} because: {1}")]
    ReadFile(PathBuf, #[source] std::io::Error),
    #[error("Fail to parse config file: {0}")]
    ParseError(String),
    #[error("Invalid value for {section}.{key}: {reason}")]
    InvalidValue { section: &'static str, key: &'static str, reason: String },
    #[error("No API endpoint configured, pass --api-url or set api_url in the [provider] section")]
    MissingEndpoint,
}

/// `[provider]` section, every field optional so command-line flags can fill the gaps.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProviderSection {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub api_style: Option<ApiStyle>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
}

/// `[extract]` section.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtractSection {
    pub extensions: Option<Vec<String>>,
    pub ignore_dirs: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    pub provider: ProviderSection,
    pub extract: ExtractSection,
}

/// Provider values given on the command line, they win over the config file.
#[derive(Debug, Default, Clone)]
pub struct ProviderOverrides {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub api_style: Option<ApiStyle>,
    pub model: Option<String>,
}

/// Everything needed to build a client once flags and file are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub api_key: String,
    pub settings: ModelSettings,
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn invalid(section: &'static str, key: &'static str) -> impl Fn(String) -> ConfigError {
    move |reason| ConfigError::InvalidValue { section, key, reason }
}

impl AppConfig {
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        // values such as tokens and URLs may legitimately contain '#' or ';'
        let mut defaults = Ini::new().defaults();
        defaults.enable_inline_comments = false;
        let mut ini = Ini::new_from_defaults(defaults);
        ini.read(content.to_string()).map_err(ConfigError::ParseError)?;

        let api_style = ini.get("provider", "api_style")
            .map(|style| style.parse::<ApiStyle>())
            .transpose()
            .map_err(invalid("provider", "api_style"))?;
        let max_tokens = ini.getuint("provider", "max_tokens")
            .map_err(invalid("provider", "max_tokens"))?
            .map(|tokens| u32::try_from(tokens).map_err(|e| e.to_string()))
            .transpose()
            .map_err(invalid("provider", "max_tokens"))?;
        let provider = ProviderSection {
            api_url: ini.get("provider", "api_url"),
            api_key: ini.get("provider", "api_key"),
            api_style,
            model: ini.get("provider", "model"),
            max_tokens,
            temperature: ini.getfloat("provider", "temperature").map_err(invalid("provider", "temperature"))?,
            top_p: ini.getfloat("provider", "top_p").map_err(invalid("provider", "top_p"))?,
        };

        let extract = ExtractSection {
            extensions: ini.get("extract", "extensions").map(|value| split_list(&value)),
            ignore_dirs: ini.get("extract", "ignore_dirs").map(|value| split_list(&value)),
        };

        Ok(Self { provider, extract })
    }

    /// Loads `explicit_path` if given (it must exist), otherwise the per-user
    /// config file if there is one, otherwise an empty config.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit_path {
            Some(path) if !path.is_file() => return Err(ConfigError::FileNotFound(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.is_file() => path,
                _ => {
                    debug!("No config file found, using defaults");
                    return Ok(Self::default());
                },
            },
        };
        debug!("Loading config file {path:?}");
        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile(path.clone(), e))?;
        Self::from_str(&content)
    }

    pub fn provider_config(&self, overrides: ProviderOverrides) -> Result<ProviderConfig, ConfigError> {
        let file = &self.provider;
        let defaults = ModelSettings::default();
        let endpoint = overrides.api_url.or_else(|| file.api_url.clone())
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;
        Ok(ProviderConfig {
            endpoint,
            api_key: overrides.api_key.or_else(|| file.api_key.clone()).unwrap_or_default(),
            settings: ModelSettings {
                style: overrides.api_style.or(file.api_style).unwrap_or(defaults.style),
                model: overrides.model.or_else(|| file.model.clone()).unwrap_or(defaults.model),
                max_tokens: file.max_tokens.unwrap_or(defaults.max_tokens),
                temperature: file.temperature.unwrap_or(defaults.temperature),
                top_p: file.top_p.unwrap_or(defaults.top_p),
            },
        })
    }

    /// Scrape policy with list overrides applied: flag, then file, then the built-in default.
    pub fn scrape_policy(&self, extensions: Option<Vec<String>>, ignore_dirs: Option<Vec<String>>) -> ScrapePolicy {
        let defaults = ScrapePolicy::default();
        ScrapePolicy {
            extensions: extensions.or_else(|| self.extract.extensions.clone()).unwrap_or(defaults.extensions),
            ignored_dirs: ignore_dirs.or_else(|| self.extract.ignore_dirs.clone()).unwrap_or(defaults.ignored_dirs),
            rules: defaults.rules,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))?;
    Some(proj_dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    pub const TEST_CONFIG_CONTENT: &str = r#"[provider]
api_url = https://llm.example.com/v1/chat/completions
api_key = secret-token
api_style = generate
model = qwen2.5
max_tokens = 4096
temperature = 0.2
top_p = 0.8

[extract]
extensions = .vue, .svelte
ignore_dirs = vendor,dist
"#;

    #[test]
    fn tst_parse_config_content() {
        let config = AppConfig::from_str(TEST_CONFIG_CONTENT).unwrap();
        assert_eq!(config.provider, ProviderSection {
            api_url: Some("https://llm.example.com/v1/chat/completions".to_string()),
            api_key: Some("secret-token".to_string()),
            api_style: Some(ApiStyle::Generate),
            model: Some("qwen2.5".to_string()),
            max_tokens: Some(4096),
            temperature: Some(0.2),
            top_p: Some(0.8),
        });
        assert_eq!(config.extract.extensions, Some(vec![".vue".to_string(), ".svelte".to_string()]));
        assert_eq!(config.extract.ignore_dirs, Some(vec!["vendor".to_string(), "dist".to_string()]));
    }

    #[test]
    fn tst_comment_characters_inside_values() {
        let content = "; provider settings\n[provider]\n# token from the dashboard\napi_key = ab#cd;ef\napi_url = http://h/x?a=1#frag\n";
        let config = AppConfig::from_str(content).unwrap();
        assert_eq!(config.provider.api_key, Some("ab#cd;ef".to_string()));
        assert_eq!(config.provider.api_url, Some("http://h/x?a=1#frag".to_string()));
    }

    #[test]
    fn tst_invalid_values() {
        let err = AppConfig::from_str("[provider]\nmax_tokens = lots\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "max_tokens", .. }));
        let err = AppConfig::from_str("[provider]\ntemperature = warm\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "temperature", .. }));
        let err = AppConfig::from_str("[provider]\napi_style = stream\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "api_style", .. }));
    }

    #[test]
    fn tst_provider_config_precedence() {
        let config = AppConfig::from_str(TEST_CONFIG_CONTENT).unwrap();
        let provider = config.provider_config(ProviderOverrides {
            api_key: Some("from-flag".to_string()),
            api_style: Some(ApiStyle::Chat),
            ..ProviderOverrides::default()
        }).unwrap();
        assert_eq!(provider, ProviderConfig {
            endpoint: "https://llm.example.com/v1/chat/completions".to_string(),
            api_key: "from-flag".to_string(),
            settings: ModelSettings {
                style: ApiStyle::Chat,
                model: "qwen2.5".to_string(),
                max_tokens: 4096,
                temperature: 0.2,
                top_p: 0.8,
            },
        });
    }

    #[test]
    fn tst_provider_config_defaults() {
        let provider = AppConfig::default().provider_config(ProviderOverrides {
            api_url: Some("http://localhost:11434/api/generate".to_string()),
            ..ProviderOverrides::default()
        }).unwrap();
        assert_eq!(provider.endpoint, "http://localhost:11434/api/generate");
        assert_eq!(provider.api_key, "");
        assert_eq!(provider.settings, ModelSettings::default());

        let missing = AppConfig::default().provider_config(ProviderOverrides::default());
        assert!(matches!(missing, Err(ConfigError::MissingEndpoint)));
    }

    #[test]
    fn tst_scrape_policy_precedence() {
        let config = AppConfig::from_str(TEST_CONFIG_CONTENT).unwrap();
        let policy = config.scrape_policy(Some(vec![".js".to_string()]), None);
        assert_eq!(policy.extensions, vec![".js".to_string()]);
        assert_eq!(policy.ignored_dirs, vec!["vendor".to_string(), "dist".to_string()]);

        let policy = AppConfig::default().scrape_policy(None, None);
        assert_eq!(policy.extensions, vec![".js", ".jsx", ".ts", ".tsx"]);
        assert_eq!(policy.ignored_dirs, vec!["node_modules"]);
    }

    #[test]
    fn tst_load_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, TEST_CONFIG_CONTENT).unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.provider.model, Some("qwen2.5".to_string()));

        let missing = AppConfig::load(Some(&dir.path().join("missing.ini")));
        assert!(matches!(missing, Err(ConfigError::FileNotFound(_))));
    }
}
