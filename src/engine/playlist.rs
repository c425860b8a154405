//! Playlist writer: copy, optionally shuffle, cap, then write one path per line.

use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::engine::tools::path_to_playlist_line;
use crate::error::M3uError;
use crate::utils::logger::RunLog;

/// Number of lines to write: everything when `maximum_entries <= 0`, else `min(max, total)`.
pub fn effective_len(maximum_entries: i64, total: usize) -> usize {
    if maximum_entries <= 0 {
        return total;
    }
    usize::try_from(maximum_entries).map_or(total, |max| max.min(total))
}

/// Copy `found` (the aggregator's collection is never touched), shuffle the copy with a
/// fresh thread-local RNG when `randomize` is set, then cut it to the effective length.
pub fn prepare_entries(
    found: &[PathBuf],
    randomize: bool,
    maximum_entries: i64,
    log: RunLog,
) -> Vec<PathBuf> {
    let mut entries = found.to_vec();
    if randomize {
        log.verbose(format_args!("Shuffling the found files"));
        entries.shuffle(&mut rand::rng());
    }

    let total = entries.len();
    let len = effective_len(maximum_entries, total);
    if maximum_entries <= 0 {
        log.verbose(format_args!(
            "No maximum entries. Writing all {} files to output.",
            total
        ));
    } else if len == total {
        log.verbose(format_args!(
            "Limited to {}. Writing all {} found files to output.",
            maximum_entries, total
        ));
    } else {
        log.verbose(format_args!(
            "Limited to {}. Writing the first {} found files to output.",
            maximum_entries, len
        ));
    }
    entries.truncate(len);
    entries
}

/// Create or truncate `output` and write each entry on its own line. Returns the number of
/// lines written; entries whose path is not valid UTF-8 are skipped with a warning.
///
/// The first failure among write, flush and sync is returned; the file is closed on drop
/// after that, so a later close problem can never replace it.
pub fn write_playlist(output: &Path, entries: &[PathBuf], log: RunLog) -> Result<usize, M3uError> {
    log.verbose(format_args!("Writing playlist to {}", output.display()));
    let to_output_err = |e| M3uError::output(output, e);

    let file = File::create(output).map_err(to_output_err)?;
    let mut writer = BufWriter::new(file);
    let mut written = 0;
    for entry in entries {
        let Some(line) = path_to_playlist_line(entry) else {
            log::warn!("Skipping non UTF-8 path {}", entry.display());
            continue;
        };
        writeln!(writer, "{line}").map_err(to_output_err)?;
        written += 1;
    }
    let file = writer
        .into_inner()
        .map_err(|e| M3uError::output(output, e.into_error()))?;
    file.sync_all().map_err(to_output_err)?;
    Ok(written)
}
