use crate::config::DiscoveryConfig;
use crate::error::{CapStatsError, Result};
use crate::scanner::file_filter::CaptureFilter;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A capture file together with the report path derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureFile {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
}

impl CaptureFile {
    pub fn new(source_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            source_path,
            output_path,
        }
    }

    pub fn display_path(&self) -> String {
        self.source_path.display().to_string()
    }
}

#[derive(Debug, Default)]
pub struct ScanResult {
    /// Files that still need a report, in traversal order.
    pub candidates: Vec<CaptureFile>,
    /// Capture files skipped because their report already exists.
    pub already_processed: Vec<CaptureFile>,
}

impl ScanResult {
    pub fn total_captures(&self) -> usize {
        self.candidates.len() + self.already_processed.len()
    }
}

pub struct CaptureScanner {
    filter: CaptureFilter,
    overwrite: bool,
}

impl CaptureScanner {
    pub fn new(config: &DiscoveryConfig) -> Result<Self> {
        Ok(Self {
            filter: CaptureFilter::new(config)?,
            overwrite: config.overwrite,
        })
    }

    /// Walks `root` in file-name order and collects capture files.
    ///
    /// The first traversal error aborts the scan; nothing found up to that
    /// point is returned.
    pub fn scan<P: AsRef<Path>>(&self, root: P) -> Result<ScanResult> {
        let root_path = root.as_ref();

        if root_path.exists() && !root_path.is_dir() {
            return Err(CapStatsError::InvalidRoot {
                path: root_path.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut result = ScanResult::default();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.filter.is_excluded(e.path()));

        for entry in walker {
            let entry = entry.map_err(|source| CapStatsError::Discovery {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root_path.to_path_buf()),
                source,
            })?;

            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let Some(output_path) = self.filter.output_path_for(path) else {
                trace!(path = %path.display(), "not a capture file");
                continue;
            };

            let capture = CaptureFile::new(path.to_path_buf(), output_path);

            if self.overwrite || !output_exists(&capture.output_path) {
                debug!(path = %capture.source_path.display(), "queued for processing");
                result.candidates.push(capture);
            } else {
                debug!(
                    path = %capture.source_path.display(),
                    output = %capture.output_path.display(),
                    "report already exists, skipping"
                );
                result.already_processed.push(capture);
            }
        }

        Ok(result)
    }
}

/// Anything other than a clean "not found" counts as existing.
fn output_exists(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != std::io::ErrorKind::NotFound,
    }
}
