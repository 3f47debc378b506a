use crate::batch::{Job, JobObserver};
use crate::error::Result;
use crate::ui::output::{OutputFormatter, OutputMode};
use indicatif::ProgressBar;

/// Reports job progress to the operator while workers run.
///
/// With a visible progress bar the per-file lines become the bar message;
/// otherwise every start is printed as its own line. Failures are always
/// printed, above the bar when there is one.
pub struct ProgressReporter {
    formatter: OutputFormatter,
    progress_bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(formatter: OutputFormatter, progress_bar: ProgressBar) -> Self {
        Self {
            formatter,
            progress_bar,
        }
    }

    fn print<F>(&self, f: F)
    where
        F: FnOnce(&OutputFormatter),
    {
        if self.progress_bar.is_hidden() {
            f(&self.formatter);
        } else {
            self.progress_bar.suspend(|| f(&self.formatter));
        }
    }
}

pub fn processing_line(job: &Job) -> String {
    format!("Processing {}: {}...", job.position(), job.source_path().display())
}

pub fn failure_line(job: &Job, detail: &str) -> String {
    format!("Error processing {}: {}", job.source_path().display(), detail)
}

impl JobObserver for ProgressReporter {
    fn job_started(&self, job: &Job) {
        match self.formatter.mode() {
            OutputMode::Json => {
                if !self.formatter.is_quiet() {
                    self.formatter.print_json_object(&serde_json::json!({
                        "type": "job_started",
                        "index": job.index + 1,
                        "total": job.total,
                        "path": job.capture.display_path()
                    }));
                }
            }
            _ if self.progress_bar.is_hidden() => self.formatter.info(&processing_line(job)),
            _ => {
                self.progress_bar
                    .set_message(format!("{}", job.source_path().display()));
                if self.formatter.verbose_level() > 0 {
                    self.print(|f| f.debug(&processing_line(job)));
                }
            }
        }
    }

    fn job_finished(&self, job: &Job, result: &Result<u64>) {
        match (self.formatter.mode(), result) {
            (OutputMode::Json, _) => {
                let value = match result {
                    Ok(bytes) => serde_json::json!({
                        "type": "job_finished",
                        "index": job.index + 1,
                        "path": job.capture.display_path(),
                        "output": job.output_path().display().to_string(),
                        "bytes": bytes,
                        "success": true
                    }),
                    Err(error) => serde_json::json!({
                        "type": "job_finished",
                        "index": job.index + 1,
                        "path": job.capture.display_path(),
                        "error": error.job_detail(),
                        "success": false
                    }),
                };
                if result.is_err() || !self.formatter.is_quiet() {
                    self.formatter.print_json_object(&value);
                }
            }
            (_, Ok(_)) => {
                if self.formatter.verbose_level() > 1 {
                    let message = format!("Wrote {}", job.output_path().display());
                    self.print(|f| f.debug(&message));
                }
            }
            (_, Err(error)) => {
                let message = failure_line(job, &error.job_detail());
                self.print(|f| f.error(&message));
            }
        }

        self.progress_bar.inc(1);
    }
}
