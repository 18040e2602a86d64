use serde::Deserialize;

/// Main configuration structure for Versewell
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub harvest: HarvestConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
}

/// Harvest policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestConfig {
    /// Site entry point; discovered translation links are resolved against
    /// it by concatenation, so it must end with '/'
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Translation codes that may be harvested; anything else discovered on
    /// the root page is skipped before any book-level fetching
    pub translations: Vec<String>,

    /// Stop after the first successfully materialized translation (the
    /// default policy); set to false to sweep every allow-listed one
    #[serde(rename = "stop-after-first", default = "default_stop_after_first")]
    pub stop_after_first: bool,
}

fn default_stop_after_first() -> bool {
    true
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Total request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// User agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("versewell/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives one `<code>.txt` artifact per translation
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}
