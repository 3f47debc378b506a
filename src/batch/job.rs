use crate::error::CapStatsError;
use crate::scanner::CaptureFile;
use std::path::Path;
use std::sync::Arc;

/// One extraction: a capture file plus everything needed to run the tool on it.
#[derive(Debug, Clone)]
pub struct Job {
    pub capture: CaptureFile,
    pub args: Arc<[String]>,
    /// Zero-based position in the candidate list.
    pub index: usize,
    pub total: usize,
}

impl Job {
    /// Builds one job per capture, all sharing the same argument vector.
    pub fn batch(captures: Vec<CaptureFile>, args: Arc<[String]>) -> Vec<Job> {
        let total = captures.len();
        captures
            .into_iter()
            .enumerate()
            .map(|(index, capture)| Job {
                capture,
                args: Arc::clone(&args),
                index,
                total,
            })
            .collect()
    }

    pub fn source_path(&self) -> &Path {
        &self.capture.source_path
    }

    pub fn output_path(&self) -> &Path {
        &self.capture.output_path
    }

    /// `3/10` style position, one-based.
    pub fn position(&self) -> String {
        format!("{}/{}", self.index + 1, self.total)
    }
}

#[derive(Debug)]
pub struct JobOutcome {
    pub index: usize,
    pub capture: CaptureFile,
    /// Bytes written on success.
    pub result: Result<u64, CapStatsError>,
}
