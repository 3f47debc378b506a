use crate::batch::job::{Job, JobOutcome};
use crate::error::{CapStatsError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

/// Receives job lifecycle events. Called from worker tasks.
pub trait JobObserver: Send + Sync {
    fn job_started(&self, _job: &Job) {}

    fn job_finished(&self, _job: &Job, _result: &Result<u64>) {}
}

/// Runs jobs with at most `workers` of them in flight.
pub struct Dispatcher {
    workers: usize,
}

impl Dispatcher {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.clamp(1, Semaphore::MAX_PERMITS),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Dispatches every job and waits for all of them.
    ///
    /// Jobs start in list order; each holds a semaphore permit until its task
    /// ends, whether it succeeds, fails, or panics. A failing job never stops
    /// the others. Outcomes come back in job order.
    pub async fn run<F, Fut>(
        &self,
        jobs: Vec<Job>,
        observer: Arc<dyn JobObserver>,
        run_job: F,
    ) -> Vec<JobOutcome>
    where
        F: Fn(Job) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<u64>> + Send + 'static,
    {
        info!(jobs = jobs.len(), workers = self.workers, "dispatching jobs");

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let run_job = Arc::new(run_job);
        let mut handles = Vec::with_capacity(jobs.len());

        for job in jobs {
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                unreachable!("dispatch semaphore is never closed");
            };

            let observer = Arc::clone(&observer);
            let run_job = Arc::clone(&run_job);
            let task_job = job.clone();

            observer.job_started(&job);
            debug!(position = %job.position(), path = %job.source_path().display(), "job started");

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = run_job(task_job.clone()).await;
                observer.job_finished(&task_job, &result);
                result
            });

            handles.push((job, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (job, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_error) => {
                    let error = aborted(&job, join_error);
                    let result = Err(error);
                    observer.job_finished(&job, &result);
                    result
                }
            };

            if let Err(ref error) = result {
                warn!(path = %job.source_path().display(), error = %error, "job failed");
            }

            outcomes.push(JobOutcome {
                index: job.index,
                capture: job.capture,
                result,
            });
        }

        outcomes
    }
}

fn aborted(job: &Job, join_error: JoinError) -> CapStatsError {
    let message = if join_error.is_panic() {
        let payload = join_error.into_panic();
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        format!("worker panicked: {}", reason)
    } else {
        join_error.to_string()
    };

    CapStatsError::JobAborted {
        input: job.source_path().to_path_buf(),
        message,
    }
}
