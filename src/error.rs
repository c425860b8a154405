//! Error taxonomy.
//!
//! [`M3uError`] covers the failures that end a run: bad configuration (before any worker
//! starts), a pipeline that could not be set up, and playlist output. [`ScanError`] is the
//! non-fatal per-folder failure collected during traversal.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal error surfaced to the caller.
#[derive(Error, Debug)]
pub enum M3uError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unable to write playlist {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("scan pipeline failure: {0}")]
    Setup(String),
}

impl M3uError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        M3uError::Config(msg.into())
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        M3uError::Output {
            path: path.into(),
            source,
        }
    }
}

/// A folder that could not be listed. Recorded and logged; never aborts the scan.
#[derive(Error, Debug)]
#[error("unable to read folder {path}: {source}")]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl ScanError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}
