// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use thiserror::Error as TeError;

use crate::config::{AppConfig, ConfigError, ProviderOverrides};
use crate::llm::{ApiStyle, TranslationClient};
use crate::logger::{self, LogLevel};

#[derive(Debug, Parser)]
#[command(
    version = env!("GIT_DESCRIBE_OR_CARGO_PKG_VERSION"),
    about = "A commandline tool to extract translatable texts from source code and generate i18n JSON files with an LLM endpoint."
)]
pub struct Cli {
    /// Read settings from this INI file instead of the per-user config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, default_value_t, value_enum)]
    pub log_level: LogLevel,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct ProviderArgs {
    /// Endpoint the translation request is POSTed to.
    #[arg(long, env = "LLM_I18N_API_URL")]
    pub api_url: Option<String>,
    /// Sent as a bearer token in the Authorization header.
    #[arg(long, env = "LLM_I18N_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    #[arg(long, value_enum)]
    pub api_style: Option<ApiStyle>,
    #[arg(long)]
    pub model: Option<String>,
}

impl From<ProviderArgs> for ProviderOverrides {
    fn from(args: ProviderArgs) -> Self {
        Self {
            api_url: args.api_url,
            api_key: args.api_key,
            api_style: args.api_style,
            model: args.model,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "extract")]
    #[command(
        about = "Extracts human-readable strings from source files under a folder",
        long_about = "Scans .js/.jsx/.ts/.tsx files under the given folder for quoted strings and writes the unique, translatable ones to a text file, one per line.\n\n\
            Directories starting with a dot and node_modules are skipped. The output defaults to extracted-texts.txt inside the scanned folder.",
    )]
    Extract {
        folder: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// File name suffixes to scan, e.g. .js,.vue
        #[arg(short, long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,
        /// Directory names to skip besides dot-directories
        #[arg(short, long, value_delimiter = ',')]
        ignore_dirs: Option<Vec<String>>,
    },

    #[command(name = "translate")]
    #[command(
        about = "Translates sentences from a text file and writes i18n.json next to it",
        long_about = "Sends the sentences of the given file (one per line) to the configured LLM endpoint, asking for translations into the given languages with generated i18n keys.\n\n\
            The result is written to i18n.json in the same directory as the input file.",
    )]
    Translate {
        input_file: PathBuf,
        #[arg(short, long, default_value = "en,vi")]
        languages: String,
        #[command(flatten)]
        provider: ProviderArgs,
    },

    #[command(name = "check-api")]
    #[command(
        about = "Sends a sample translation request and prints the result",
    )]
    CheckApi {
        #[arg(short, long, default_value = "en,vi")]
        languages: String,
        #[arg(short, long, default_value = crate::subcmd::check_api::DEFAULT_SAMPLE_SENTENCES)]
        sentences: String,
        #[command(flatten)]
        provider: ProviderArgs,
    },
}

#[derive(TeError, Debug)]
#[error("{0}")]
pub enum CliError {
    Config(#[from] ConfigError),
    Extract(#[from] crate::subcmd::extract::CmdError),
    Translate(#[from] crate::subcmd::translate::CmdError),
    CheckApi(#[from] crate::subcmd::check_api::CmdError),
}

fn build_client(config: &AppConfig, provider: ProviderArgs) -> Result<TranslationClient, ConfigError> {
    let provider = config.provider_config(provider.into())?;
    Ok(TranslationClient::new(&provider.endpoint, &provider.api_key, provider.settings))
}

pub fn execute() -> Result<(), CliError> {
    let args = Cli::parse();
    logger::init_logger(args.log_level);
    let config = AppConfig::load(args.config.as_deref())?;

    use crate::subcmd;
    match args.command {
        Commands::Extract { folder, output, extensions, ignore_dirs } => {
            let policy = config.scrape_policy(extensions, ignore_dirs);
            subcmd::subcmd_extract(&folder, output.as_deref(), &policy)?;
        },
        Commands::Translate { input_file, languages, provider } => {
            let client = build_client(&config, provider)?;
            subcmd::subcmd_translate(&input_file, &languages, &client)?;
        },
        Commands::CheckApi { languages, sentences, provider } => {
            let client = build_client(&config, provider)?;
            subcmd::subcmd_check_api(&languages, &sentences, &client)?;
        },
    }

    Ok(())
}
