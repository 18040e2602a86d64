//! Versewell: a scripture translation harvester
//!
//! This crate walks a hierarchically organized translation site
//! (translation -> book -> chapter -> verse), extracts verse body text from
//! each chapter page, and materializes every harvested translation as a
//! single concatenated plain-text file.

pub mod config;
pub mod extract;
pub mod harvest;
pub mod markup;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Versewell operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("No translation links found at {url}")]
    NoTranslations { url: String },

    #[error("No book links found at {url}")]
    NoBooks { url: String },

    #[error("No verse text extracted from book {url}")]
    EmptyBook { url: String },

    #[error("Chapter fetch failed within book {url}")]
    BookFailed { url: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Worker task panicked or was cancelled: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("URL {url} does not end with expected suffix '{suffix}'")]
    MissingSuffix { url: String, suffix: String },
}

/// Result type alias for Versewell operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract_verses, LinkExtractor};
pub use harvest::{harvest, Harvester};
pub use markup::{decode_lossy, MarkupEvent, Tokenizer};
pub use output::{HarvestReport, OutputStore};
pub use crate::url::{resolve_by_concat, swap_suffix, translation_code};
