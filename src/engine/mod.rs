//! Engine module: CLI, playlist writing, duplicate detection, progress display

pub mod arg_parser;
pub mod cli;
pub mod duplicates;
pub mod playlist;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{handle_run, resolve_opts};
pub use duplicates::detect_duplicates;
pub use playlist::{effective_len, prepare_entries, write_playlist};
pub use tools::{extension_of, format_extension_list, path_to_playlist_line};
