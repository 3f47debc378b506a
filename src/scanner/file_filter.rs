use crate::config::DiscoveryConfig;
use crate::error::{CapStatsError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Decides which paths are capture files and where their reports go.
pub struct CaptureFilter {
    extensions: Vec<String>,
    suffix: String,
    exclude_patterns: Vec<Regex>,
}

impl CaptureFilter {
    pub fn new(config: &DiscoveryConfig) -> Result<Self> {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| CapStatsError::Config {
                    message: format!("Invalid exclude pattern '{}': {}", pattern, e),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extensions: config
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect(),
            suffix: config.suffix.clone(),
            exclude_patterns,
        })
    }

    /// Returns the matched extension (without the dot) for a capture file.
    ///
    /// Matching is case-sensitive: `trace.PCAP` is not picked up.
    pub fn capture_extension(&self, path: &Path) -> Option<&str> {
        let filename = path.file_name()?.to_str()?;

        self.extensions
            .iter()
            .filter(|ext| {
                filename.len() > ext.len()
                    && filename.ends_with(ext.as_str())
                    && filename.as_bytes()[filename.len() - ext.len() - 1] == b'.'
            })
            // Longest match wins when configured extensions overlap.
            .max_by_key(|ext| ext.len())
            .map(|ext| ext.as_str())
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude_patterns.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(&path_str))
    }

    /// Replaces the capture extension of `path` with the configured suffix.
    pub fn output_path_for(&self, path: &Path) -> Option<PathBuf> {
        let ext = self.capture_extension(path)?;
        let filename = path.file_name()?.to_str()?;
        let stem = &filename[..filename.len() - ext.len() - 1];

        Some(path.with_file_name(format!("{}{}", stem, self.suffix)))
    }
}
