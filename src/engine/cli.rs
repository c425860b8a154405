//! CLI command handler: layer defaults, config file and flags, then generate the playlist.

use anyhow::Result;
use log::{debug, info};
use std::path::Path;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::generate;
use crate::utils::{apply_file_to_opts, load_default_m3ugen_toml, load_m3ugen_toml, setup_logging};

/// Overwrite opts field from a command-line flag when given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $cli_field:ident => $opts_field:ident) => {
        if let Some(v) = $cli.$cli_field {
            $opts.$opts_field = v;
        }
    };
}

/// Build options: defaults, then the config file (explicit `--config`, else `m3ugen.toml` in
/// `cwd` when present), then command-line flags.
pub fn resolve_opts(cli: &Cli, cwd: &Path) -> Result<Opts> {
    let mut opts = Opts::default();
    match &cli.config {
        Some(path) => apply_file_to_opts(&load_m3ugen_toml(path)?, &mut opts),
        None => {
            if let Some(file) = load_default_m3ugen_toml(cwd)? {
                apply_file_to_opts(&file, &mut opts);
            }
        }
    }

    if let Some(ref output) = cli.output {
        opts.output = output.clone();
    }
    if !cli.scan.is_empty() {
        opts.scan_folders = cli.scan.clone();
    }
    if !cli.extensions.is_empty() {
        opts.extensions = cli.extensions.clone();
    }
    apply_cli_opt!(cli, opts, randomize => randomize);
    apply_cli_opt!(cli, opts, max => maximum_entries);
    apply_cli_opt!(cli, opts, detect_duplicates => detect_duplicates);
    apply_cli_opt!(cli, opts, scan_workers => scan_folder_workers);
    apply_cli_opt!(cli, opts, filter_workers => receive_files_workers);
    apply_cli_opt!(cli, opts, queue_capacity => queue_capacity);
    apply_cli_opt!(cli, opts, verbose => verbose);
    apply_cli_opt!(cli, opts, debug => debug);
    apply_cli_opt!(cli, opts, progress => progress);
    Ok(opts)
}

/// Resolve options, set up logging and generate the playlist.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let opts = resolve_opts(cli, &cwd)?;
    setup_logging(opts.debug);
    debug!("Generating playlist...");

    let result = generate(&opts)?;
    info!(
        "Wrote {} of {} files to {}",
        result.written,
        result.found_files.len(),
        opts.output.display()
    );
    Ok(())
}
