//! Load `m3ugen.toml` (CLI only). The library takes an [`Opts`] built by the caller.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::error::M3uError;

use super::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct M3ugenToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    output: Option<String>,
    scan: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
    randomize: Option<bool>,
    maximum_entries: Option<i64>,
    detect_duplicates: Option<bool>,
    scan_folder_workers: Option<usize>,
    receive_files_workers: Option<usize>,
    queue_capacity: Option<usize>,
    verbose: Option<bool>,
    debug: Option<bool>,
}

/// Parse config text. Errors are configuration errors.
pub fn parse_m3ugen_toml(text: &str) -> Result<M3ugenToml, M3uError> {
    toml::from_str(text).map_err(|e| M3uError::config(e.to_string()))
}

/// Load an explicitly requested config file. Missing or malformed is a configuration error.
pub fn load_m3ugen_toml(path: &Path) -> Result<M3ugenToml, M3uError> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| M3uError::config(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&s).map_err(|e| M3uError::config(format!("{}: {}", path.display(), e)))
}

/// Load `m3ugen.toml` from `dir` if present. `Ok(None)` when there is no such file.
/// Runs before the logger exists, so a malformed file is an error rather than a warning.
pub fn load_default_m3ugen_toml(dir: &Path) -> Result<Option<M3ugenToml>, M3uError> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return Ok(None);
    }
    load_m3ugen_toml(&path).map(Some)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $opts_field:ident) => {
        if let Some(v) = $sec.$sec_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only set fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &M3ugenToml, opts: &mut Opts) {
    let sec = &file.settings;
    if let Some(ref p) = sec.output {
        opts.output = PathBuf::from(p);
    }
    if let Some(ref folders) = sec.scan {
        opts.scan_folders = folders.iter().map(PathBuf::from).collect();
    }
    if let Some(ref v) = sec.extensions {
        opts.extensions = v.clone();
    }
    apply_file_opt!(sec, opts, randomize => randomize);
    apply_file_opt!(sec, opts, maximum_entries => maximum_entries);
    apply_file_opt!(sec, opts, detect_duplicates => detect_duplicates);
    apply_file_opt!(sec, opts, scan_folder_workers => scan_folder_workers);
    apply_file_opt!(sec, opts, receive_files_workers => receive_files_workers);
    apply_file_opt!(sec, opts, queue_capacity => queue_capacity);
    apply_file_opt!(sec, opts, verbose => verbose);
    apply_file_opt!(sec, opts, debug => debug);
}
