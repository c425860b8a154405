//! Scan pipeline orchestration: start every stage and shut them down in order.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::M3uError;
use crate::types::{Config, ScanOutcome};
use crate::utils::config::ProgressConsts;
use crate::utils::logger::RunLog;

use super::aggregate::{
    ProgressFn, spawn_excluded_extensions_aggregator, spawn_found_files_aggregator,
};
use super::context::{PipelineTuning, create_pipeline_channels};
use super::error_handler::spawn_error_collector;
use super::filter::{ExtensionMatcher, spawn_filter_workers};
use super::scan::FolderScanPool;

fn spawn_err(stage: &str) -> impl FnOnce(std::io::Error) -> M3uError + '_ {
    move |e| M3uError::Setup(format!("spawn {stage}: {e}"))
}

fn join_stage<T>(handle: JoinHandle<T>, stage: &str) -> Result<T, M3uError> {
    handle
        .join()
        .map_err(|_| M3uError::Setup(format!("{stage} panicked")))
}

/// Run the whole scan pipeline for `config` with the default report interval.
pub fn run_scan(config: &Config, log: RunLog, progress: ProgressFn) -> Result<ScanOutcome, M3uError> {
    run_scan_with_interval(config, log, progress, ProgressConsts::REPORT_INTERVAL)
}

/// Roots → folder scan pool (self-feeding) → filter pool → aggregators / error collector.
///
/// Shutdown is staged: pending count hits zero, scan workers exit and the file stream closes,
/// filter workers drain and exit, the result streams close, consumers drain and are joined.
pub fn run_scan_with_interval(
    config: &Config,
    log: RunLog,
    progress: ProgressFn,
    report_interval: Duration,
) -> Result<ScanOutcome, M3uError> {
    let tuning = PipelineTuning::from_config(config);
    log.debug(format_args!(
        "scan workers: {}, filter workers: {}, queue capacity: {}",
        tuning.scan_workers, tuning.filter_workers, tuning.queue_capacity
    ));
    let channels = create_pipeline_channels(&tuning);

    // Consumers first so nothing upstream ever waits on a missing reader.
    let found_handle =
        spawn_found_files_aggregator(channels.accepted_rx, report_interval, progress, log)
            .map_err(spawn_err("found files aggregator"))?;
    let excluded_handle = spawn_excluded_extensions_aggregator(channels.excluded_rx, log)
        .map_err(spawn_err("excluded extensions aggregator"))?;
    let error_handle =
        spawn_error_collector(channels.error_rx, log).map_err(spawn_err("error collector"))?;

    let matcher = Arc::new(ExtensionMatcher::new(config.extensions()));
    let filter_handles = spawn_filter_workers(
        channels.file_rx,
        &channels.accepted_tx,
        &channels.excluded_tx,
        matcher,
        tuning.filter_workers,
        log,
    )
    .map_err(spawn_err("filter worker"))?;
    // Dropping the last senders lets the aggregators see the close once filters exit.
    drop(channels.accepted_tx);
    drop(channels.excluded_tx);

    // (1) Walk until the pending count returns to zero. (2) Scan workers own the only file and
    // error senders, so joining them closes both streams.
    let pool = FolderScanPool::start(
        config.scan_folders(),
        channels.file_tx,
        channels.error_tx,
        tuning.scan_workers,
        tuning.queue_capacity,
        log,
    )?;
    pool.wait()?;
    log.verbose(format_args!("scan completed"));

    // (3) Filters drain the file stream and exit. (4) Their exit closes accepted/excluded.
    for (i, h) in filter_handles.into_iter().enumerate() {
        join_stage(h, &format!("filter worker {i}"))?;
    }

    // (5) Consumers drain and hand back what they own.
    let found_files = join_stage(found_handle, "found files aggregator")?;
    let excluded_extensions = join_stage(excluded_handle, "excluded extensions aggregator")?;
    let scan_errors = join_stage(error_handle, "error collector")?;

    Ok(ScanOutcome {
        found_files,
        excluded_extensions,
        scan_errors,
    })
}
