use crate::batch::Job;
use crate::error::{CapStatsError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tokio::task;
use tracing::{debug, trace};

pub const INPUT_FLAG: &str = "-r";

// Longest stderr excerpt carried into a failure message.
const MAX_STDERR_CHARS: usize = 400;

/// Runs the analysis tool on one capture and stores its stdout.
#[derive(Debug, Clone)]
pub struct StatsExtractor {
    tool: String,
}

impl StatsExtractor {
    pub fn new<S: Into<String>>(tool: S) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Full command line for `input`, as it would be executed.
    pub fn command_line(&self, input: &Path, args: &[String]) -> Vec<String> {
        let mut line = vec![
            self.tool.clone(),
            INPUT_FLAG.to_string(),
            input.display().to_string(),
        ];
        line.extend(args.iter().cloned());
        line
    }

    /// Returns the number of bytes written to the job's output path.
    pub async fn extract(&self, job: &Job) -> Result<u64> {
        let output = self.run_tool(job.source_path(), &job.args).await?;
        let bytes = output.stdout.len() as u64;

        let output_path = job.output_path().to_path_buf();
        let write_path = output_path.clone();
        task::spawn_blocking(move || write_atomically(&write_path, &output.stdout))
            .await
            .map_err(|e| CapStatsError::Write {
                path: output_path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            })??;

        debug!(
            input = %job.source_path().display(),
            output = %output_path.display(),
            bytes,
            "statistics written"
        );

        Ok(bytes)
    }

    async fn run_tool(&self, input: &Path, args: &[String]) -> Result<Output> {
        trace!(command = ?self.command_line(input, args), "spawning analysis tool");

        let output = Command::new(&self.tool)
            .arg(INPUT_FLAG)
            .arg(input)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.subprocess_error(input, format!("failed to launch: {}", e)))?;

        if !output.status.success() {
            return Err(self.subprocess_error(input, describe_failure(&output)));
        }

        Ok(output)
    }

    fn subprocess_error(&self, input: &Path, detail: String) -> CapStatsError {
        CapStatsError::Subprocess {
            tool: self.tool.clone(),
            input: input.to_path_buf(),
            detail,
        }
    }
}

fn describe_failure(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();

    if stderr.is_empty() {
        return output.status.to_string();
    }

    let mut detail: String = stderr.chars().take(MAX_STDERR_CHARS).collect();
    if stderr.chars().count() > MAX_STDERR_CHARS {
        detail.push_str("...");
    }
    format!("{}: {}", output.status, detail)
}

/// Writes `contents` next to `path` and renames it into place.
///
/// A failed write leaves neither a partial report nor a stray temp file.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let to_error = |source: std::io::Error| CapStatsError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".capstats-")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(to_error)?;

    temp.write_all(contents).map_err(to_error)?;
    temp.flush().map_err(to_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o644))
            .map_err(to_error)?;
    }

    temp.persist(path).map_err(|e| to_error(e.error))?;
    Ok(())
}
