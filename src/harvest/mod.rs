//! Harvest pipeline: fetching, fan-out/join, and orchestration
//!
//! This module contains the four-level walk over the corpus hierarchy:
//! - fetching pages over HTTP
//! - fanning out concurrent fetches per level and joining them in
//!   submission order
//! - orchestrating root -> translations -> books -> chapters -> verses,
//!   with the allow-list gate and the idempotent artifact skip

mod fetcher;
mod harvester;
mod join;

pub use fetcher::{build_http_client, fetch_page};
pub use harvester::Harvester;
pub use join::run_all;

use crate::config::Config;
use crate::output::HarvestReport;
use crate::Result;

/// Runs a complete harvest against the configured site
///
/// This is the main entry point: it builds the HTTP client and output
/// store, walks the hierarchy per the configured policy, and returns a
/// per-translation outcome report.
pub async fn harvest(config: Config) -> Result<HarvestReport> {
    let harvester = Harvester::new(config)?;
    harvester.run().await
}
