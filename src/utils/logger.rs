use colored::Colorize;
use env_logger::Builder;
use log::Level;
use std::fmt;
use std::io::Write;

/// Install the process logger. Binary only; the library never calls this.
pub fn setup_logging(debug: bool) {
    use log::LevelFilter;

    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_default_env()
        .filter_level(LevelFilter::Warn) // Default: only warnings from dependencies
        .filter_module(env!("CARGO_PKG_NAME"), level) // Our crate: use requested level
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        _ => "ERROR".red(),
                    };
                    let path = record.target().to_string().white();
                    format!("[{} {} {}] {}", name.cyan(), level_str, path, record.args())
                }
                Level::Debug | Level::Trace => {
                    format!("[{} {}] {}", name.cyan(), "DEBUG".dimmed(), record.args())
                }
                _ => format!("[{}] {}", name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .init();
}

/// Diagnostic sink handed to every pipeline stage at construction, scoped to one run.
///
/// Verbose lines go to `info!`, debug lines to `debug!`; each is dropped unless its flag is set,
/// so library callers get quiet stages regardless of how the global logger is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunLog {
    verbose: bool,
    debug: bool,
}

impl RunLog {
    pub fn new(verbose: bool, debug: bool) -> Self {
        Self { verbose, debug }
    }

    /// A sink that drops everything.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn verbose(&self, args: fmt::Arguments<'_>) {
        if self.verbose {
            log::info!("{}", args);
        }
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.debug {
            log::debug!("{}", args);
        }
    }
}
