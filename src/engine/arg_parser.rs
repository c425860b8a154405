use clap::Parser;
use std::path::PathBuf;

/// Generate an m3u playlist from the files found under one or more folders.
#[derive(Clone, Debug, Parser)]
#[command(name = "m3ugen")]
#[command(about = "Scan folders in parallel and write the files found as a playlist, one path per line.")]
pub struct Cli {
    /// Folders to scan. Replaces the `scan` list of the config file, if any.
    #[arg(value_name = "DIR")]
    pub scan: Vec<PathBuf>,

    /// TOML config file. Default: `m3ugen.toml` in the current directory, when present.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Playlist file to write (created or truncated).
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Only keep files with these extensions (case-insensitive). Can specify multiple: -e mp3 flac ogg. Replaces the config file list.
    #[arg(long, short = 'e', num_args = 1..)]
    pub extensions: Vec<String>,

    /// Shuffle the playlist.
    #[arg(long, short = 'r', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub randomize: Option<bool>,

    /// Maximum number of entries to write. 0 or negative means unlimited.
    #[arg(long, short = 'm', allow_negative_numbers = true, value_parser = clap::value_parser!(i64))]
    pub max: Option<i64>,

    /// Report files found more than once (overlapping scan folders).
    #[arg(long, short = 'd', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub detect_duplicates: Option<bool>,

    /// Number of workers scanning folders.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub scan_workers: Option<usize>,

    /// Number of workers filtering files by extension.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub filter_workers: Option<usize>,

    /// Buffer hint for the folder queue.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub queue_capacity: Option<usize>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Debug output (per worker, per folder).
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub debug: Option<bool>,

    /// Show a live counter of files found instead of periodic progress lines.
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,
}
