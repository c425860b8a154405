//! m3ugen: parallel folder scanner and m3u playlist generator

pub mod engine;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::{M3uError, ScanError};
pub use types::*;
pub use utils::logger::RunLog;

use log::debug;

/// Result alias used by public m3ugen API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: validate `opts`, scan every folder, optionally detect duplicates,
/// write the playlist, and return what was found.
///
/// Configuration problems fail before any thread starts and downcast to [`M3uError::Config`];
/// output problems downcast to [`M3uError::Output`]. Folders that cannot be listed end up in
/// [`ScanResult::scan_errors`] and do not fail the run.
pub fn generate(opts: &Opts) -> Result<ScanResult> {
    let config = Config::try_from(opts.clone())?;
    debug!(
        "{} CONFIG:{:#?}",
        utils::PackagePaths::get().pkg_name().to_uppercase(),
        config
    );
    generate::generate_with_config(&config)
}

/// Run only the scan pipeline (no playlist). Progress notices go through `log` at verbose level.
pub fn scan(config: &Config, log: RunLog) -> Result<ScanOutcome> {
    Ok(pipeline::run_scan(
        config,
        log,
        pipeline::log_progress(log),
    )?)
}
