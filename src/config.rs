// src/config.rs
use crate::constants::API_BASE_URL;
use crate::error::AppError;
use crate::types::{ApiKey, DatabaseId, FilterObject, ValidationError};
use clap::Parser;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Environment variable the command-line front end reads the token from.
pub const API_KEY_ENV_VAR: &str = "NOTION_API_KEY";

/// Unvalidated reader configuration, as a caller assembles it.
///
/// Deserializes from `{"integrationToken", "databaseId", "filterObject"}`;
/// `baseUrl` is optional and defaults to the public Notion API.
///
/// `databaseId` must be a Notion ID: 32 hex characters, a dashed UUID, or a
/// Notion URL containing one. It is normalised and sent in dashed form.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    pub integration_token: Option<String>,
    pub database_id: Option<String>,
    #[serde(default)]
    pub filter_object: FilterObject,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl fmt::Debug for ResourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceConfig")
            .field(
                "integration_token",
                &self.integration_token.as_ref().map(|_| "<redacted>"),
            )
            .field("database_id", &self.database_id)
            .field("filter_object", &self.filter_object)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Validated configuration, ready to drive a fetch.
#[derive(Debug, Clone)]
pub struct ReaderSettings {
    pub api_key: ApiKey,
    pub database_id: DatabaseId,
    pub filter: FilterObject,
    pub base_url: Url,
}

impl ResourceConfig {
    /// Checks required fields and formats. Never touches the network.
    pub fn validate(self) -> Result<ReaderSettings, AppError> {
        let token = self.integration_token.ok_or_else(|| {
            AppError::MissingConfiguration("integration token must not be null".to_string())
        })?;
        let database = self.database_id.ok_or_else(|| {
            AppError::MissingConfiguration("database ID must not be null".to_string())
        })?;

        let api_key = ApiKey::new(token)?;
        let database_id = DatabaseId::parse(&database)?;

        let raw_url = self.base_url.as_deref().unwrap_or(API_BASE_URL);
        let base_url = Url::parse(raw_url).map_err(|e| ValidationError::InvalidUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ValidationError::InvalidUrl {
                url: raw_url.to_string(),
                reason: "Only HTTP and HTTPS URLs are supported".to_string(),
            }
            .into());
        }

        Ok(ReaderSettings {
            api_key,
            database_id,
            filter: self.filter_object,
            base_url,
        })
    }
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion database URL or ID
    pub database: String,

    /// Query filter as a JSON object, passed to Notion verbatim
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Write the flattened text to this file instead of stdout
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Override the Notion API root (e.g. a proxy)
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Resolved command-line run: what to fetch and where to put it.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub resource: ResourceConfig,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
}

impl RunConfig {
    /// Resolves a run from CLI input and the `NOTION_API_KEY` environment variable.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let token = std::env::var(API_KEY_ENV_VAR).map_err(|_| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                API_KEY_ENV_VAR
            ))
        })?;
        Self::resolve_with_token(cli, token)
    }

    pub fn resolve_with_token(cli: CommandLineInput, token: String) -> Result<Self, AppError> {
        let filter_object = match cli.filter.as_deref() {
            Some(raw) => raw.parse::<FilterObject>()?,
            None => FilterObject::empty(),
        };

        Ok(Self {
            resource: ResourceConfig {
                integration_token: Some(token),
                database_id: Some(cli.database),
                filter_object,
                base_url: cli.base_url,
            },
            output_file: cli.output_file,
            verbose: cli.verbose,
        })
    }
}
