use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// The file is read, parsed as TOML, and validated before being returned,
/// so a `Config` in hand is always a usable one.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[harvest]
root-url = "https://www.example.org/"
translations = ["kj", "no"]

[fetcher]
request-timeout-secs = 15
connect-timeout-secs = 5
user-agent = "test-harvester/0.1"

[output]
data-dir = "./data"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.harvest.root_url, "https://www.example.org/");
        assert_eq!(config.harvest.translations, vec!["kj", "no"]);
        assert!(config.harvest.stop_after_first);
        assert_eq!(config.fetcher.request_timeout_secs, 15);
        assert_eq!(config.output.data_dir, "./data");
    }

    #[test]
    fn test_fetcher_section_is_optional() {
        let config_content = r#"
[harvest]
root-url = "https://www.example.org/"
translations = ["kj"]

[output]
data-dir = "./data"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetcher.request_timeout_secs, 30);
        assert_eq!(config.fetcher.connect_timeout_secs, 10);
        assert!(config.fetcher.user_agent.starts_with("versewell/"));
    }

    #[test]
    fn test_stop_after_first_override() {
        let config_content = r#"
[harvest]
root-url = "https://www.example.org/"
translations = ["kj"]
stop-after-first = false

[output]
data-dir = "./data"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();
        assert!(!config.harvest.stop_after_first);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[harvest]
root-url = "https://www.example.org/"
translations = []

[output]
data-dir = "./data"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
