//! Public and internal types for the m3ugen API and pipeline.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{M3uError, ScanError};
use crate::utils::config::{ChannelCaps, UNLIMITED_ENTRIES, WorkerDefaults};
use crate::utils::logger::RunLog;

/// Raw options as layered from defaults, config file and command line. Validate with
/// [`Config::try_from`] before running anything.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Playlist file to create or truncate.
    pub output: PathBuf,
    /// Root folders to scan, in order.
    pub scan_folders: Vec<PathBuf>,
    /// Extension allow-list, matched case-insensitively. Empty means no filtering.
    pub extensions: Vec<String>,
    /// Shuffle the list before writing.
    pub randomize: bool,
    /// Maximum lines to write; <= 0 means unlimited.
    pub maximum_entries: i64,
    /// Report paths found more than once (overlapping roots).
    pub detect_duplicates: bool,
    /// Folder scan pool size.
    pub scan_folder_workers: usize,
    /// File filter pool size.
    pub receive_files_workers: usize,
    /// Buffer hint for the folder queue relay.
    pub queue_capacity: usize,
    /// Progress notices and run report.
    pub verbose: bool,
    /// Per-worker and per-folder diagnostics.
    pub debug: bool,
    /// Show a counter bar instead of periodic progress lines (CLI).
    pub progress: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            output: PathBuf::new(),
            scan_folders: Vec::new(),
            extensions: Vec::new(),
            randomize: false,
            maximum_entries: UNLIMITED_ENTRIES,
            detect_duplicates: false,
            scan_folder_workers: WorkerDefaults::SCAN_FOLDER_WORKERS,
            receive_files_workers: WorkerDefaults::RECEIVE_FILES_WORKERS,
            queue_capacity: ChannelCaps::FOLDER_QUEUE,
            verbose: false,
            debug: false,
            progress: false,
        }
    }
}

/// Validated, immutable configuration for one run. Only obtainable through `Config::try_from(Opts)`.
#[derive(Clone, Debug)]
pub struct Config {
    output: PathBuf,
    scan_folders: Vec<PathBuf>,
    extensions: Vec<String>,
    randomize: bool,
    maximum_entries: i64,
    detect_duplicates: bool,
    scan_folder_workers: usize,
    receive_files_workers: usize,
    queue_capacity: usize,
    verbose: bool,
    debug: bool,
    progress: bool,
}

impl TryFrom<Opts> for Config {
    type Error = M3uError;

    fn try_from(o: Opts) -> Result<Self, Self::Error> {
        if o.output.as_os_str().is_empty() {
            return Err(M3uError::config("no output path provided"));
        }
        if o.scan_folders.is_empty() {
            return Err(M3uError::config("no folder to scan"));
        }
        if o.scan_folders.iter().any(|f| f.as_os_str().is_empty()) {
            return Err(M3uError::config("empty scan folder path"));
        }
        if o.scan_folder_workers == 0 {
            return Err(M3uError::config("scan_folder_workers must be at least 1"));
        }
        if o.receive_files_workers == 0 {
            return Err(M3uError::config("receive_files_workers must be at least 1"));
        }
        if o.queue_capacity == 0 {
            return Err(M3uError::config("queue_capacity must be at least 1"));
        }
        Ok(Config {
            output: o.output,
            scan_folders: o.scan_folders,
            extensions: o.extensions,
            randomize: o.randomize,
            maximum_entries: o.maximum_entries,
            detect_duplicates: o.detect_duplicates,
            scan_folder_workers: o.scan_folder_workers,
            receive_files_workers: o.receive_files_workers,
            queue_capacity: o.queue_capacity,
            verbose: o.verbose,
            debug: o.debug,
            progress: o.progress,
        })
    }
}

impl Config {
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn scan_folders(&self) -> &[PathBuf] {
        &self.scan_folders
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn randomize(&self) -> bool {
        self.randomize
    }

    pub fn maximum_entries(&self) -> i64 {
        self.maximum_entries
    }

    pub fn detect_duplicates(&self) -> bool {
        self.detect_duplicates
    }

    pub fn scan_folder_workers(&self) -> usize {
        self.scan_folder_workers
    }

    pub fn receive_files_workers(&self) -> usize {
        self.receive_files_workers
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub fn progress(&self) -> bool {
        self.progress
    }

    /// Diagnostic sink for this run's stages.
    pub fn run_log(&self) -> RunLog {
        RunLog::new(self.verbose, self.debug)
    }
}

/// What the core pipeline produced: every accepted path exactly once (arrival order),
/// the distinct excluded extensions, and the folders that could not be listed.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub found_files: Vec<PathBuf>,
    pub excluded_extensions: BTreeSet<String>,
    pub scan_errors: Vec<ScanError>,
}

/// Paths that appeared more than once in the found-files collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    /// `(path, occurrences)` for every path seen more than once, sorted by path.
    pub duplicates: Vec<(PathBuf, usize)>,
}

impl DuplicateReport {
    /// Number of distinct paths that were duplicated.
    pub fn duplicated_paths(&self) -> usize {
        self.duplicates.len()
    }

    pub fn count_of(&self, path: &Path) -> Option<usize> {
        self.duplicates
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| *c)
    }
}

/// Result of [`generate`](crate::generate).
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Accepted paths in pre-shuffle order.
    pub found_files: Vec<PathBuf>,
    /// Lower-cased extensions of rejected files (may contain `""`).
    pub excluded_extensions: BTreeSet<String>,
    /// Folders skipped because they could not be listed.
    pub scan_errors: Vec<ScanError>,
    /// Present when duplicate detection was enabled.
    pub duplicates: Option<DuplicateReport>,
    /// Lines written to the playlist.
    pub written: usize,
}
