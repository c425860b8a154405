//! Pipeline components: dynamic queue, folder scan pool, filter pool, aggregators, error collector.

pub mod aggregate;
pub mod context;
pub mod dyn_queue;
pub mod error_handler;
pub mod filter;
pub mod orchestrator;
pub mod pending;
pub mod scan;

pub use aggregate::{
    ProgressFn, log_progress, spawn_excluded_extensions_aggregator, spawn_found_files_aggregator,
};
pub use context::{PipelineChannels, PipelineTuning, create_pipeline_channels};
pub use dyn_queue::{QueueCloser, QueueInput, QueueOutput, dyn_queue};
pub use error_handler::{report_skipped_folders, spawn_error_collector};
pub use filter::{Classification, ExtensionMatcher, spawn_filter_workers};
pub use orchestrator::{run_scan, run_scan_with_interval};
pub use pending::PendingTasks;
pub use scan::FolderScanPool;
