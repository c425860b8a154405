//! Playlist generation: scan, optional duplicate pass, write, report.

use anyhow::Result;

use crate::engine::duplicates::{detect_duplicates, log_duplicates};
use crate::engine::playlist::{prepare_entries, write_playlist};
use crate::engine::progress::{counter_callback, create_counter, finish_counter};
use crate::engine::tools::format_extension_list;
use crate::pipeline::{log_progress, report_skipped_folders, run_scan};
use crate::utils::logger::RunLog;
use crate::{Config, ScanOutcome, ScanResult};

/// Run the scan pipeline with the progress display chosen by `config`.
fn scan_with_progress(config: &Config, log: RunLog) -> Result<ScanOutcome> {
    if !config.progress() {
        return Ok(run_scan(config, log, log_progress(log))?);
    }
    let bar = create_counter("Scanning");
    let outcome = run_scan(config, log, counter_callback(&bar));
    if let Ok(ref o) = outcome {
        finish_counter(&bar, o.found_files.len());
    }
    Ok(outcome?)
}

/// Scan every configured folder, then write the playlist. Folder listing failures are
/// reported in the result, never returned as an error.
pub fn generate_with_config(config: &Config) -> Result<ScanResult> {
    let log = config.run_log();

    let ScanOutcome {
        found_files,
        excluded_extensions,
        scan_errors,
    } = scan_with_progress(config, log)?;
    report_skipped_folders(&scan_errors, log);

    let duplicates = config.detect_duplicates().then(|| {
        log.verbose(format_args!("Detecting duplicates"));
        let report = detect_duplicates(&found_files);
        log_duplicates(&report, log);
        report
    });

    let entries = prepare_entries(
        &found_files,
        config.randomize(),
        config.maximum_entries(),
        log,
    );
    let written = write_playlist(config.output(), &entries, log)?;

    if log.is_verbose() {
        log.verbose(format_args!(
            "Extensions not considered: {}",
            format_extension_list(&excluded_extensions)
        ));
    }

    Ok(ScanResult {
        found_files,
        excluded_extensions,
        scan_errors,
        duplicates,
        written,
    })
}
