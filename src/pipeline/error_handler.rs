//! Error collector: gathers non-fatal traversal errors and summarizes them after the scan.

use crossbeam_channel::Receiver;
use std::io;
use std::thread::{self, JoinHandle};

use crate::error::ScanError;
use crate::utils::logger::RunLog;

/// Spawn the error collector: drain `error_rx`, log each error at verbose level, and hand the
/// collected errors back on join. Never ends the pipeline on its own.
pub fn spawn_error_collector(
    error_rx: Receiver<ScanError>,
    log: RunLog,
) -> io::Result<JoinHandle<Vec<ScanError>>> {
    thread::Builder::new()
        .name("m3ugen-errors".to_string())
        .spawn(move || {
            let mut errors = Vec::new();
            for err in error_rx.iter() {
                log.verbose(format_args!("ERROR: {}", err));
                errors.push(err);
            }
            errors
        })
}

/// Summarize skipped folders after the scan. Call after joining the collector.
pub fn report_skipped_folders(errors: &[ScanError], log: RunLog) {
    if errors.is_empty() {
        return;
    }
    log::warn!(
        "Skipped {} paths due to permission errors or access issues",
        errors.len()
    );
    for err in errors {
        log.debug(format_args!("  skipped: {}", err.path.display()));
    }
}
