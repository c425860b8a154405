//! Counter bar for displaying scan progress (CLI `--progress`).

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

use crate::pipeline::ProgressFn;

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a counter for unknown total (shows count without percentage)
pub fn create_counter(desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " files"
    )))
}

/// Move the counter to `n`. Uses try_lock so a report tick never waits on the display.
pub fn set_counter(pb: &ProgressBar, n: usize) {
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.update_to(n);
    }
}

/// Final update and newline once the scan is over.
pub fn finish_counter(pb: &ProgressBar, n: usize) {
    if let Ok(mut bar) = pb.lock() {
        let _ = bar.update_to(n);
        let _ = bar.refresh();
        eprintln!();
    }
}

/// Progress callback that drives `pb` from the aggregator's report ticks.
pub fn counter_callback(pb: &ProgressBar) -> ProgressFn {
    let pb = Arc::clone(pb);
    Box::new(move |n: usize| set_counter(&pb, n))
}
