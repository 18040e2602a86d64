use crate::config::types::{Config, FetcherConfig, HarvestConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_harvest_config(&config.harvest)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates harvest policy configuration
fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "root-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    // Translation links resolve by concatenation against the root
    if !config.root_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "root-url must end with '/', got '{}'",
            config.root_url
        )));
    }

    if config.translations.is_empty() {
        return Err(ConfigError::Validation(
            "translations allow-list cannot be empty".to_string(),
        ));
    }

    for code in &config.translations {
        validate_translation_code(code)?;
    }

    Ok(())
}

/// Validates one translation code: one or more lowercase letters or
/// underscores, the same alphabet the listing URL pattern accepts
fn validate_translation_code(code: &str) -> Result<(), ConfigError> {
    if code.is_empty() {
        return Err(ConfigError::Validation(
            "Translation code cannot be empty".to_string(),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "Translation code '{}' must contain only lowercase letters and underscores",
            code
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "data-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
