use crate::batch::job::JobOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedJob {
    pub path: String,
    pub message: String,
}

/// Aggregate result of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_jobs: usize,
    pub succeeded: usize,
    pub skipped_existing: usize,
    pub bytes_written: u64,
    pub duration_ms: u64,
    pub workers: usize,
    pub finished_at: DateTime<Utc>,
    pub failures: Vec<FailedJob>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[JobOutcome], workers: usize, elapsed: Duration) -> Self {
        let mut succeeded = 0;
        let mut bytes_written = 0u64;
        let mut failures = Vec::new();

        for outcome in outcomes {
            match &outcome.result {
                Ok(bytes) => {
                    succeeded += 1;
                    bytes_written += *bytes;
                }
                Err(error) => failures.push(FailedJob {
                    path: outcome.capture.display_path(),
                    message: error.job_detail(),
                }),
            }
        }

        Self {
            total_jobs: outcomes.len(),
            succeeded,
            skipped_existing: 0,
            bytes_written,
            duration_ms: elapsed.as_millis() as u64,
            workers,
            finished_at: Utc::now(),
            failures,
        }
    }

    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped_existing = skipped;
        self
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapStatsError;
    use crate::scanner::CaptureFile;
    use std::path::PathBuf;

    fn outcome(index: usize, result: Result<u64, CapStatsError>) -> JobOutcome {
        JobOutcome {
            index,
            capture: CaptureFile::new(
                PathBuf::from(format!("c{index}.pcap")),
                PathBuf::from(format!("c{index}.total-stats.txt")),
            ),
            result,
        }
    }

    #[test]
    fn test_summary_counts() {
        let outcomes = vec![
            outcome(0, Ok(100)),
            outcome(
                1,
                Err(CapStatsError::Subprocess {
                    tool: "tshark".to_string(),
                    input: PathBuf::from("c1.pcap"),
                    detail: "exit status: 2".to_string(),
                }),
            ),
            outcome(2, Ok(50)),
        ];

        let summary =
            BatchSummary::from_outcomes(&outcomes, 2, Duration::from_millis(1500)).with_skipped(4);

        assert_eq!(summary.total_jobs, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.skipped_existing, 4);
        assert_eq!(summary.bytes_written, 150);
        assert_eq!(summary.duration(), Duration::from_millis(1500));
        assert!(!summary.is_clean());
        assert_eq!(
            summary.failures[0],
            FailedJob {
                path: "c1.pcap".to_string(),
                message: "tshark: exit status: 2".to_string(),
            }
        );
    }

    #[test]
    fn test_summary_serializes() {
        let summary = BatchSummary::from_outcomes(&[outcome(0, Ok(1))], 1, Duration::ZERO);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["succeeded"], 1);
        assert_eq!(json["failures"].as_array().unwrap().len(), 0);
        assert!(json["finished_at"].is_string());
    }
}
