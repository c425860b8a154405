//! Cap the folder scan pool by the process file descriptor limit (Unix).
//!
//! Every scan worker holds one open directory handle while it lists a folder; the rest of the
//! budget covers the output file, logging and whatever the embedding program has open.

/// Descriptors budgeted per scan worker.
pub const FDS_PER_WORKER: usize = 10;

/// Share of the soft limit the scan pool may use.
const FD_LIMIT_FRACTION: f64 = 0.8;

/// Soft `RLIMIT_NOFILE`, or `None` when unlimited or unavailable.
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let soft = unsafe { rlim.assume_init() }.rlim_cur;
    (soft != libc::RLIM_INFINITY && soft <= i64::MAX as u64).then_some(soft)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Most scan workers the limit allows (at least 1), or `None` without a limit.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let usable = (max_open_fds()? as f64 * FD_LIMIT_FRACTION) as usize;
    Some((usable / FDS_PER_WORKER).max(1))
}

/// Clamp `requested` scan workers to the descriptor budget.
pub fn cap_workers_by_fd_limit(requested: usize) -> usize {
    match max_workers_by_fd_limit() {
        Some(cap) if cap < requested => {
            log::debug!("Capping scan workers {requested} -> {cap} (fd limit)");
            cap
        }
        _ => requested,
    }
}
