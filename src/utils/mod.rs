pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod m3ugen_toml;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, cap_workers_by_fd_limit, max_open_fds, max_workers_by_fd_limit};
pub use logger::{RunLog, setup_logging};
pub use m3ugen_toml::{
    M3ugenToml, apply_file_to_opts, load_default_m3ugen_toml, load_m3ugen_toml, parse_m3ugen_toml,
};
