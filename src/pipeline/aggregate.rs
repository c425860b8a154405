//! Result aggregators: the single owners of the found-files collection and the excluded-extension set.

use crossbeam_channel::{Receiver, select, tick};
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::utils::config::ProgressConsts;
use crate::utils::logger::RunLog;

/// Called with the running accepted count at every report tick.
pub type ProgressFn = Box<dyn Fn(usize) + Send>;

/// Progress callback that logs `... N files found` at verbose level.
pub fn log_progress(log: RunLog) -> ProgressFn {
    Box::new(move |n: usize| log.verbose(format_args!("... {} files found", n)))
}

fn found_files_loop(
    accepted_rx: Receiver<PathBuf>,
    report_interval: Duration,
    progress: ProgressFn,
) -> Vec<PathBuf> {
    let ticker = tick(report_interval);
    let mut found = Vec::with_capacity(ProgressConsts::INITIAL_FOUND_CAPACITY);
    loop {
        select! {
            recv(accepted_rx) -> msg => match msg {
                Ok(path) => found.push(path),
                Err(_) => break,
            },
            recv(ticker) -> _ => progress(found.len()),
        }
    }
    found
}

/// Spawn the accepted-files aggregator. Its handle yields the final collection once every
/// sender of `accepted_rx` is dropped.
pub fn spawn_found_files_aggregator(
    accepted_rx: Receiver<PathBuf>,
    report_interval: Duration,
    progress: ProgressFn,
    log: RunLog,
) -> io::Result<JoinHandle<Vec<PathBuf>>> {
    thread::Builder::new()
        .name("m3ugen-found-files".to_string())
        .spawn(move || {
            log.debug(format_args!("[found files aggregator] starting"));
            let found = found_files_loop(accepted_rx, report_interval, progress);
            log.debug(format_args!(
                "[found files aggregator] done, {} files",
                found.len()
            ));
            found
        })
}

/// Spawn the excluded-extension aggregator. Each distinct extension is kept once.
pub fn spawn_excluded_extensions_aggregator(
    excluded_rx: Receiver<String>,
    log: RunLog,
) -> io::Result<JoinHandle<BTreeSet<String>>> {
    thread::Builder::new()
        .name("m3ugen-excluded-ext".to_string())
        .spawn(move || {
            log.debug(format_args!("[excluded extensions aggregator] starting"));
            let excluded: BTreeSet<String> = excluded_rx.iter().collect();
            log.debug(format_args!(
                "[excluded extensions aggregator] done, {} extensions",
                excluded.len()
            ));
            excluded
        })
}
