//! Application configuration constants.
//! Defaults, tuning and thresholds in one place.

use std::sync::OnceLock;
use std::time::Duration;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!("{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Config file picked up from the working directory when `--config` is not given.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Worker pools ----

/// Default pool sizes for the two worker stages.
pub struct WorkerDefaults;

impl WorkerDefaults {
    /// Workers listing folders.
    pub const SCAN_FOLDER_WORKERS: usize = 4;
    /// Workers classifying discovered files by extension.
    pub const RECEIVE_FILES_WORKERS: usize = 4;
}

// ---- Channels ----

/// Buffer sizes for the pipeline channels.
pub struct ChannelCaps;

impl ChannelCaps {
    /// Default buffer on each side of the folder queue relay. Only a hint: the relay backlog is unbounded.
    pub const FOLDER_QUEUE: usize = 32;
    /// Discovered files waiting for a filter worker.
    pub const FILES_TO_CONSIDER: usize = 1024;
    /// Accepted files and excluded extensions waiting for their aggregator.
    pub const RESULTS: usize = 1024;
}

// ---- Progress ----

pub struct ProgressConsts;

impl ProgressConsts {
    /// Interval between "files found" notices while the scan runs.
    pub const REPORT_INTERVAL: Duration = Duration::from_secs(5);
    /// Initial capacity of the found-files collection.
    pub const INITIAL_FOUND_CAPACITY: usize = 1024;
}

// ---- Playlist ----

/// `maximum_entries` value meaning "write everything". Any value <= 0 means the same.
pub const UNLIMITED_ENTRIES: i64 = -1;
