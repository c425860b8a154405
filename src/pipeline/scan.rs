//! Folder scan pool: recursive directory walk with a fixed number of workers.
//!
//! Workers pop a folder from the dynamic queue, list it, push subfolders back onto the same
//! queue and forward every other entry downstream. Completion is decided by [`PendingTasks`]
//! alone, never by queue emptiness.

use crossbeam_channel::Sender;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{M3uError, ScanError};
use crate::utils::logger::RunLog;

use super::dyn_queue::{QueueCloser, QueueInput, QueueOutput, dyn_queue};
use super::pending::PendingTasks;

/// A folder awaiting traversal.
#[derive(Debug)]
pub struct ScanTask {
    pub path: PathBuf,
}

impl ScanTask {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Everything one scan worker needs. Cloned per worker.
#[derive(Clone)]
struct WorkerContext {
    queue_in: QueueInput<ScanTask>,
    queue_out: QueueOutput<ScanTask>,
    file_tx: Sender<PathBuf>,
    error_tx: Sender<ScanError>,
    pending: Arc<PendingTasks>,
    log: RunLog,
}

/// Running folder scan pool. Call [`FolderScanPool::wait`] to block until the walk is done.
pub struct FolderScanPool {
    pending: Arc<PendingTasks>,
    closer: QueueCloser,
    workers: Vec<JoinHandle<()>>,
}

impl FolderScanPool {
    /// Seed the queue with `roots` and start `num_workers` workers.
    ///
    /// `file_tx` and `error_tx` are moved in: once every worker has exited, the file and error
    /// streams close on their own.
    pub fn start(
        roots: &[PathBuf],
        file_tx: Sender<PathBuf>,
        error_tx: Sender<ScanError>,
        num_workers: usize,
        queue_capacity: usize,
        log: RunLog,
    ) -> Result<Self, M3uError> {
        let (queue_in, queue_out, closer) = dyn_queue::<ScanTask>(queue_capacity)
            .map_err(|e| M3uError::Setup(format!("spawn folder queue relay: {e}")))?;
        let pending = Arc::new(PendingTasks::new(roots.len()));

        let ctx = WorkerContext {
            queue_in,
            queue_out,
            file_tx,
            error_tx,
            pending: Arc::clone(&pending),
            log,
        };

        let mut workers = Vec::with_capacity(num_workers);
        for i in 0..num_workers {
            let ctx = ctx.clone();
            let handle = thread::Builder::new()
                .name(format!("m3ugen-scan-{i}"))
                .spawn(move || scan_worker_loop(i, ctx))
                .map_err(|e| M3uError::Setup(format!("spawn scan worker {i}: {e}")))?;
            workers.push(handle);
        }

        for root in roots {
            if ctx.queue_in.push(ScanTask::new(root.clone())).is_err() {
                // Relay is gone; keep the count balanced so `wait` cannot hang.
                pending.done();
                return Err(M3uError::Setup("folder queue closed while seeding".into()));
            }
        }
        // Workers hold the only remaining senders.
        drop(ctx);

        Ok(Self {
            pending,
            closer,
            workers,
        })
    }

    /// Wait for the pending count to hit zero, close the queue, then join every worker.
    pub fn wait(self) -> Result<(), M3uError> {
        self.pending.wait_for_zero();
        self.closer
            .close()
            .map_err(|_| M3uError::Setup("folder queue relay panicked".into()))?;
        let mut panicked = 0_usize;
        for h in self.workers {
            if h.join().is_err() {
                panicked += 1;
            }
        }
        if panicked > 0 {
            return Err(M3uError::Setup(format!("{panicked} scan worker(s) panicked")));
        }
        Ok(())
    }
}

fn scan_worker_loop(worker: usize, ctx: WorkerContext) {
    ctx.log
        .debug(format_args!("[scan worker {worker}] starting"));
    while let Some(task) = ctx.queue_out.pop() {
        let _retire = ctx.pending.retire_on_drop();
        ctx.log.debug(format_args!(
            "[scan worker {worker}] scanning {}",
            task.path.display()
        ));
        if let Err(err) = scan_folder(&task.path, &ctx) {
            let _ = ctx.error_tx.send(ScanError::new(task.path, err));
        }
    }
    ctx.log.debug(format_args!("[scan worker {worker}] done"));
}

/// How a directory entry is dispatched.
#[derive(Debug, PartialEq, Eq)]
enum EntryKind {
    Folder,
    File,
    Other,
}

impl EntryKind {
    /// Real folders are walked. Regular files, and symlinks whose target is a regular file,
    /// are forwarded. Symlinked folders are never followed; dangling links, FIFOs, sockets
    /// and devices are skipped.
    fn of(path: &Path, ft: fs::FileType) -> Self {
        if ft.is_dir() {
            EntryKind::Folder
        } else if ft.is_file() {
            EntryKind::File
        } else if ft.is_symlink() && fs::metadata(path).is_ok_and(|m| m.is_file()) {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// List one folder and dispatch its entries. An error here means the folder itself could not
/// be opened; per-entry failures are reported individually and do not stop the listing.
fn scan_folder(folder: &Path, ctx: &WorkerContext) -> io::Result<()> {
    for entry in fs::read_dir(folder)? {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let _ = ctx.error_tx.send(ScanError::new(folder, err));
                continue;
            }
        };
        let path = entry.path();
        let kind = match entry.file_type() {
            Ok(ft) => EntryKind::of(&path, ft),
            Err(err) => {
                let _ = ctx.error_tx.send(ScanError::new(path, err));
                continue;
            }
        };
        match kind {
            EntryKind::Folder => {
                // Count the child before it becomes visible to any worker.
                ctx.pending.add(1);
                if let Err(task) = ctx.queue_in.push(ScanTask::new(path)) {
                    ctx.pending.done();
                    ctx.log.debug(format_args!(
                        "folder queue closed, dropping {}",
                        task.path.display()
                    ));
                }
            }
            EntryKind::File => {
                if ctx.file_tx.send(path).is_err() {
                    // Filter stage is gone; nothing downstream will read the rest.
                    break;
                }
            }
            EntryKind::Other => {
                ctx.log
                    .debug(format_args!("Skipping non-regular entry {}", path.display()));
            }
        }
    }
    Ok(())
}
