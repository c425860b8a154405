//! m3ugen CLI: scan folders and write the files found as a playlist.

use anyhow::Result;
use clap::Parser;
use m3ugen::engine::arg_parser::Cli;
use m3ugen::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
