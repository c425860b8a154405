//! Pipeline channels and tuning: the streams connecting the scan pool, filter pool and consumers.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::path::PathBuf;

use crate::error::ScanError;
use crate::types::Config;
use crate::utils::config::ChannelCaps;
use crate::utils::fd_limit::cap_workers_by_fd_limit;

/// Pool sizes and buffer sizes derived from the validated config.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub scan_workers: usize,
    pub filter_workers: usize,
    pub queue_capacity: usize,
    /// Capacity of the file, accepted and excluded channels.
    pub channel_cap: usize,
}

impl PipelineTuning {
    pub fn from_config(config: &Config) -> Self {
        Self {
            scan_workers: cap_workers_by_fd_limit(config.scan_folder_workers()),
            filter_workers: config.receive_files_workers(),
            queue_capacity: config.queue_capacity(),
            channel_cap: ChannelCaps::FILES_TO_CONSIDER,
        }
    }
}

/// Channels for one scan. Scan workers get `file_tx` and `error_tx`; filter workers get
/// `file_rx`, `accepted_tx` and `excluded_tx`; the aggregators and error collector own the rest.
///
/// The error stream is unbounded so a scan worker never waits on the collector.
pub struct PipelineChannels {
    pub file_tx: Sender<PathBuf>,
    pub file_rx: Receiver<PathBuf>,
    pub accepted_tx: Sender<PathBuf>,
    pub accepted_rx: Receiver<PathBuf>,
    pub excluded_tx: Sender<String>,
    pub excluded_rx: Receiver<String>,
    pub error_tx: Sender<ScanError>,
    pub error_rx: Receiver<ScanError>,
}

pub fn create_pipeline_channels(tuning: &PipelineTuning) -> PipelineChannels {
    let (file_tx, file_rx) = bounded::<PathBuf>(tuning.channel_cap);
    let (accepted_tx, accepted_rx) = bounded::<PathBuf>(ChannelCaps::RESULTS);
    let (excluded_tx, excluded_rx) = bounded::<String>(ChannelCaps::RESULTS);
    let (error_tx, error_rx) = unbounded::<ScanError>();

    PipelineChannels {
        file_tx,
        file_rx,
        accepted_tx,
        accepted_rx,
        excluded_tx,
        excluded_rx,
        error_tx,
        error_rx,
    }
}
