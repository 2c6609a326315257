// src/config.rs
use crate::constants::{
    DEFAULT_FETCH_DEPTH, DEFAULT_MODEL, DEFAULT_MODEL_TIMEOUT_SECS, DEFAULT_ROW_LIMIT,
};
use crate::content::LoadOptions;
use crate::error::AppError;
use crate::types::{ApiKey, ModelApiKey, NotionId};
use clap::Parser;
use std::time::Duration;

const NOTION_KEY_VARS: [&str; 2] = ["NOTION_API_KEY", "NOTION_TOKEN"];
const MODEL_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Chat with this page (URL or ID) instead of choosing from a menu
    #[arg(long, conflicts_with_all = ["database", "all"])]
    pub page: Option<String>,

    /// Chat with this database (URL or ID) instead of choosing from a menu
    #[arg(long, conflicts_with = "all")]
    pub database: Option<String>,

    /// Use every accessible page and database as context
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Ask this question and exit; may be repeated
    #[arg(short = 'q', long = "query")]
    pub queries: Vec<String>,

    /// Gemini model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Levels of nested blocks followed below a page
    #[arg(long, default_value_t = DEFAULT_FETCH_DEPTH)]
    pub depth: u8,

    /// Maximum rows read from a database
    #[arg(long, default_value_t = DEFAULT_ROW_LIMIT)]
    pub row_limit: u32,

    /// Seconds to wait for a model response
    #[arg(long, default_value_t = DEFAULT_MODEL_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where the chat context comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    Page(NotionId),
    Database(NotionId),
    All,
    /// Ask the user to pick from the accessible objects.
    Menu,
}

/// Resolved configuration, validated and ready to drive a session.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub notion_api_key: ApiKey,
    pub model_api_key: ModelApiKey,
    pub source: ContentSource,
    pub queries: Vec<String>,
    pub model: String,
    pub load: LoadOptions,
    pub model_timeout: Duration,
    pub verbose: bool,
}

impl ChatConfig {
    /// Resolves configuration from CLI input and the process environment.
    ///
    /// Credentials missing from the environment are requested through
    /// `prompt`, which receives the question to show and returns the answer.
    pub fn resolve<P>(cli: CommandLineInput, prompt: P) -> Result<Self, AppError>
    where
        P: FnMut(&str) -> Option<String>,
    {
        Self::resolve_with(cli, |name| std::env::var(name).ok(), prompt)
    }

    /// [`ChatConfig::resolve`] with an explicit variable lookup.
    pub fn resolve_with<E, P>(cli: CommandLineInput, env: E, mut prompt: P) -> Result<Self, AppError>
    where
        E: Fn(&str) -> Option<String>,
        P: FnMut(&str) -> Option<String>,
    {
        let source = resolve_source(&cli)?;

        let notion_key = NOTION_KEY_VARS
            .iter()
            .find_map(|&name| non_blank(env(name)))
            .or_else(|| non_blank(prompt("Please enter your Notion token: ")))
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "{} environment variable not set",
                    NOTION_KEY_VARS.join(" or ")
                ))
            })?;

        let model_key = non_blank(env(MODEL_KEY_VAR))
            .or_else(|| non_blank(prompt("Please enter your Google API key: ")))
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "{} environment variable not set",
                    MODEL_KEY_VAR
                ))
            })?;

        Ok(ChatConfig {
            notion_api_key: ApiKey::new(notion_key)?,
            model_api_key: ModelApiKey::new(model_key)?,
            source,
            queries: cli.queries,
            model: cli.model,
            load: LoadOptions {
                depth: cli.depth,
                row_limit: cli.row_limit,
            },
            model_timeout: Duration::from_secs(cli.timeout),
            verbose: cli.verbose,
        })
    }
}

fn resolve_source(cli: &CommandLineInput) -> Result<ContentSource, AppError> {
    let source = match (&cli.page, &cli.database) {
        (Some(page), _) => ContentSource::Page(NotionId::parse(page)?),
        (None, Some(database)) => ContentSource::Database(NotionId::parse(database)?),
        (None, None) if cli.all => ContentSource::All,
        (None, None) => ContentSource::Menu,
    };
    Ok(source)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
