//! Configuration loading and validation
//!
//! Configuration is a TOML file with three sections: `[harvest]` (root URL,
//! translation allow-list, sweep policy), `[fetcher]` (HTTP client tuning),
//! and `[output]` (data directory).

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, FetcherConfig, HarvestConfig, OutputConfig};
pub use validation::validate;
