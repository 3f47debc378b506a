use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapStatsError {
    #[error("Failed to search {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid search root {path}: {message}")]
    InvalidRoot { path: PathBuf, message: String },

    #[error("Failed to read statistics file {path}: {source}")]
    ArgumentBuild {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed on {input}: {detail}")]
    Subprocess {
        tool: String,
        input: PathBuf,
        detail: String,
    },

    #[error("Failed to write statistics file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Job for {input} was aborted: {message}")]
    JobAborted { input: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CapStatsError {
    /// Cause of a per-file failure, without the capture path.
    pub fn job_detail(&self) -> String {
        match self {
            CapStatsError::Subprocess { tool, detail, .. } => format!("{}: {}", tool, detail),
            CapStatsError::JobAborted { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CapStatsError::Discovery { .. } | CapStatsError::InvalidRoot { .. } => 2,
            CapStatsError::ArgumentBuild { .. } => 3,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CapStatsError {
    fn user_message(&self) -> String {
        match self {
            CapStatsError::Discovery { path, source } => {
                let detail = source
                    .io_error()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| source.to_string());
                format!("Error finding files under {}: {}", path.display(), detail)
            }
            CapStatsError::InvalidRoot { path, message } => {
                format!("Cannot search {}: {}", path.display(), message)
            }
            CapStatsError::ArgumentBuild { path, source } => {
                format!(
                    "Error building arguments from {}: {}",
                    path.display(),
                    source
                )
            }
            CapStatsError::Subprocess { input, detail, .. } => {
                format!("Error processing {}: {}", input.display(), detail)
            }
            CapStatsError::Write { path, source } => {
                format!("Error writing {}: {}", path.display(), source)
            }
            CapStatsError::JobAborted { input, message } => {
                format!("Error processing {}: {}", input.display(), message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CapStatsError::Discovery { source, .. } => {
                if source
                    .io_error()
                    .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied)
                {
                    Some("Ensure you have read permission for every directory under the search root.".to_string())
                } else {
                    None
                }
            }
            CapStatsError::InvalidRoot { .. } => Some(
                "Pass an existing directory with --dir.".to_string()
            ),
            CapStatsError::ArgumentBuild { .. } => Some(
                "Check that the statistics file is readable, or pass the statistics inline with --stats \"io,phs conv,tcp\".".to_string()
            ),
            CapStatsError::Subprocess { tool, .. } => Some(format!(
                "Verify that {} is installed and can read the capture file. Use --tool to point at a different binary.",
                tool
            )),
            CapStatsError::Write { .. } => Some(
                "Ensure the directory containing the capture file is writable.".to_string()
            ),
            CapStatsError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all values are valid.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CapStatsError {
    fn from(error: toml::de::Error) -> Self {
        CapStatsError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CapStatsError>;
