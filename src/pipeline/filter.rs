//! File filter pool: classify each discovered file against the extension allow-list.

use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::tools::extension_of;
use crate::utils::logger::RunLog;

/// Outcome of classifying one file.
#[derive(Debug, PartialEq, Eq)]
pub enum Classification {
    Accepted,
    /// Rejected; carries the observed lower-cased extension (`""` when the name has none).
    Excluded(String),
}

/// Extension allow-list, lower-cased once at startup and shared read-only by every filter worker.
#[derive(Clone, Debug, Default)]
pub struct ExtensionMatcher {
    allowed: Vec<String>,
}

impl ExtensionMatcher {
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            allowed: extensions
                .iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// No allow-list configured: every file is accepted.
    pub fn is_pass_through(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn classify(&self, path: &Path) -> Classification {
        if self.is_pass_through() {
            return Classification::Accepted;
        }
        let ext = extension_of(path);
        if self.allowed.iter().any(|a| *a == ext) {
            Classification::Accepted
        } else {
            Classification::Excluded(ext)
        }
    }
}

fn pass_through_loop(file_rx: Receiver<PathBuf>, accepted_tx: Sender<PathBuf>) {
    while let Ok(path) = file_rx.recv() {
        if accepted_tx.send(path).is_err() {
            break;
        }
    }
}

fn filter_loop(
    file_rx: Receiver<PathBuf>,
    accepted_tx: Sender<PathBuf>,
    excluded_tx: Sender<String>,
    matcher: &ExtensionMatcher,
    log: RunLog,
) {
    while let Ok(path) = file_rx.recv() {
        let sent = match matcher.classify(&path) {
            Classification::Accepted => accepted_tx.send(path).is_ok(),
            Classification::Excluded(ext) => {
                log.debug(format_args!(
                    "Ignoring {} (extension {:?})",
                    path.display(),
                    ext
                ));
                excluded_tx.send(ext).is_ok()
            }
        };
        if !sent {
            break;
        }
    }
}

/// Spawn `num_workers` filter workers reading `file_rx` until it closes. Callers must drop
/// their own `accepted_tx` / `excluded_tx` after this so the aggregators see the close once
/// every worker has exited.
pub fn spawn_filter_workers(
    file_rx: Receiver<PathBuf>,
    accepted_tx: &Sender<PathBuf>,
    excluded_tx: &Sender<String>,
    matcher: Arc<ExtensionMatcher>,
    num_workers: usize,
    log: RunLog,
) -> io::Result<Vec<JoinHandle<()>>> {
    (0..num_workers)
        .map(|i| {
            let file_rx = file_rx.clone();
            let accepted_tx = accepted_tx.clone();
            let excluded_tx = excluded_tx.clone();
            let matcher = Arc::clone(&matcher);
            thread::Builder::new()
                .name(format!("m3ugen-filter-{i}"))
                .spawn(move || {
                    log.debug(format_args!("[filter worker {i}] starting"));
                    if matcher.is_pass_through() {
                        pass_through_loop(file_rx, accepted_tx);
                    } else {
                        filter_loop(file_rx, accepted_tx, excluded_tx, &matcher, log);
                    }
                    log.debug(format_args!("[filter worker {i}] done"));
                })
        })
        .collect()
}
