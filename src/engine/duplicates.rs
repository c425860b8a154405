//! Duplicate detection over the final found-files collection (overlapping roots).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::DuplicateReport;
use crate::utils::logger::RunLog;

/// Count occurrences of every path and keep those seen more than once. Read-only over `found`.
pub fn detect_duplicates(found: &[PathBuf]) -> DuplicateReport {
    let mut counter: HashMap<&Path, usize> = HashMap::with_capacity(found.len());
    for path in found {
        *counter.entry(path.as_path()).or_insert(0) += 1;
    }
    let mut duplicates: Vec<(PathBuf, usize)> = counter
        .into_iter()
        .filter(|(_, c)| *c > 1)
        .map(|(p, c)| (p.to_path_buf(), c))
        .collect();
    duplicates.sort();
    DuplicateReport { duplicates }
}

/// Log each duplicated path and the total at verbose level.
pub fn log_duplicates(report: &DuplicateReport, log: RunLog) {
    for (path, count) in &report.duplicates {
        log.verbose(format_args!(
            "File {:?} is present {} times in the search",
            path, count
        ));
    }
    log.verbose(format_args!(
        "{} files were detected as duplicates",
        report.duplicated_paths()
    ));
}
