use crate::error::{CapStatsError, Result};
use crate::stats::catalog::DEFAULT_STATS;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const QUIET_FLAG: &str = "-q";
pub const STAT_FLAG: &str = "-z";

/// Where the report identifiers come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsSelection {
    Default,
    File(PathBuf),
    Inline(Vec<String>),
}

impl StatsSelection {
    /// Empty input wins, then an existing path, then whitespace-separated names.
    pub fn resolve(selection: &str) -> Self {
        if selection.trim().is_empty() {
            return StatsSelection::Default;
        }

        let path = Path::new(selection);
        if path_exists(path) {
            return StatsSelection::File(path.to_path_buf());
        }

        StatsSelection::Inline(selection.split_whitespace().map(str::to_string).collect())
    }

    pub fn stat_names(&self) -> Result<Vec<String>> {
        match self {
            StatsSelection::Default => Ok(DEFAULT_STATS.iter().map(|s| s.to_string()).collect()),
            StatsSelection::File(path) => read_stats_file(path),
            StatsSelection::Inline(names) => Ok(names.clone()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            StatsSelection::Default => {
                format!("built-in catalog ({} reports)", DEFAULT_STATS.len())
            }
            StatsSelection::File(path) => format!("file {}", path.display()),
            StatsSelection::Inline(names) => format!("inline ({} reports)", names.len()),
        }
    }
}

/// Argument vector handed to the analysis tool after `-r <input>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsArgs {
    args: Vec<String>,
}

impl StatsArgs {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = vec![QUIET_FLAG.to_string()];
        for name in names {
            args.push(STAT_FLAG.to_string());
            args.push(name.into());
        }
        Self { args }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    pub fn report_count(&self) -> usize {
        (self.args.len() - 1) / 2
    }

    pub fn into_shared(self) -> Arc<[String]> {
        self.args.into()
    }
}

pub fn build_args(selection: &str) -> Result<StatsArgs> {
    let selection = StatsSelection::resolve(selection);
    debug!(source = %selection.describe(), "resolved statistics selection");

    let names = selection.stat_names()?;
    Ok(StatsArgs::from_names(names))
}

/// One identifier per line; blank lines are dropped.
fn read_stats_file(path: &Path) -> Result<Vec<String>> {
    let to_error = |source: std::io::Error| CapStatsError::ArgumentBuild {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(to_error)?;
    let mut names = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line.map_err(to_error)?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

fn path_exists(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != std::io::ErrorKind::NotFound,
    }
}
