use crate::error::{CapStatsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SUFFIX: &str = ".total-stats.txt";
pub const DEFAULT_TOOL: &str = "tshark";
/// Upper bound on concurrent tool runs.
pub const MAX_WORKERS: usize = 1024;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub discovery: DiscoveryConfig,
    pub stats: StatsConfig,
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub suffix: String,
    pub overwrite: bool,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Empty for the built-in catalog, a path to a file, or inline names.
    pub selection: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub tool: String,
    pub workers: usize,
    pub assume_yes: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: vec!["pcap".to_string(), "pcapng".to_string()],
            suffix: DEFAULT_SUFFIX.to_string(),
            overwrite: false,
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            workers: num_cpus::get().clamp(1, MAX_WORKERS),
            assume_yes: false,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CapStatsError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CapStatsError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| CapStatsError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["capstats.toml", ".capstats.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref root) = cli_args.root {
            self.discovery.root = root.clone();
        }

        if let Some(ref suffix) = cli_args.suffix {
            self.discovery.suffix = suffix.clone();
        }

        // Flags can only switch these on.
        if cli_args.overwrite {
            self.discovery.overwrite = true;
        }

        if cli_args.assume_yes {
            self.runner.assume_yes = true;
        }

        if let Some(ref selection) = cli_args.selection {
            self.stats.selection = selection.clone();
        }

        if let Some(workers) = cli_args.workers {
            self.runner.workers = workers;
        }

        if let Some(ref tool) = cli_args.tool {
            self.runner.tool = tool.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.discovery.extensions.is_empty() {
            return Err(CapStatsError::Config {
                message: "At least one capture file extension must be specified".to_string(),
            });
        }

        if self.discovery.suffix.is_empty() {
            return Err(CapStatsError::Config {
                message: "Output suffix must not be empty".to_string(),
            });
        }

        if self.runner.workers == 0 {
            return Err(CapStatsError::Config {
                message: "Worker count must be greater than 0".to_string(),
            });
        }

        if self.runner.workers > MAX_WORKERS {
            return Err(CapStatsError::Config {
                message: format!(
                    "Worker count {} exceeds the maximum of {}",
                    self.runner.workers, MAX_WORKERS
                ),
            });
        }

        if self.runner.tool.trim().is_empty() {
            return Err(CapStatsError::Config {
                message: "Analysis tool must not be empty".to_string(),
            });
        }

        for pattern in &self.discovery.exclude_patterns {
            Regex::new(pattern).map_err(|e| CapStatsError::Config {
                message: format!("Invalid exclude pattern '{}': {}", pattern, e),
            })?;
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub selection: Option<String>,
    pub suffix: Option<String>,
    pub overwrite: bool,
    pub assume_yes: bool,
    pub workers: Option<usize>,
    pub tool: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    pub fn with_selection(mut self, selection: Option<String>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_suffix(mut self, suffix: Option<String>) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_tool(mut self, tool: Option<String>) -> Self {
        self.tool = tool;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.discovery.extensions, vec!["pcap", "pcapng"]);
        assert_eq!(config.discovery.suffix, ".total-stats.txt");
        assert_eq!(config.discovery.root, PathBuf::from("."));
        assert!(!config.discovery.overwrite);
        assert!(config.stats.selection.is_empty());
        assert_eq!(config.runner.tool, "tshark");
        assert_eq!(config.runner.workers, num_cpus::get().min(MAX_WORKERS));
        assert!(!config.runner.assume_yes);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.runner.workers = 0;
        assert!(config.validate().is_err());

        config.runner.workers = MAX_WORKERS;
        assert!(config.validate().is_ok());

        config.runner.workers = usize::MAX;
        assert!(matches!(config.validate(), Err(CapStatsError::Config { .. })));

        let mut config = Config::default();
        config.discovery.suffix.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.discovery.exclude_patterns.push("(".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.runner.workers = 3;
        let temp_file = NamedTempFile::new().unwrap();

        fs::write(temp_file.path(), toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.runner.workers, 3);
        assert_eq!(loaded_config.discovery.suffix, config.discovery.suffix);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[runner]\ntool = \"/opt/wireshark/tshark\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.runner.tool, "/opt/wireshark/tshark");
        assert_eq!(config.discovery.suffix, DEFAULT_SUFFIX);
        assert_eq!(config.runner.workers, num_cpus::get().min(MAX_WORKERS));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here/capstats.toml");
        assert!(matches!(result, Err(CapStatsError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();
        config.discovery.overwrite = true;

        let overrides = CliOverrides::new()
            .with_workers(Some(2))
            .with_suffix(Some(".stats.txt".to_string()))
            .with_selection(Some("io,phs".to_string()))
            .with_overwrite(false);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.runner.workers, 2);
        assert_eq!(config.discovery.suffix, ".stats.txt");
        assert_eq!(config.stats.selection, "io,phs");
        // An absent flag does not reset a value from the file.
        assert!(config.discovery.overwrite);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[discovery]"));
        assert!(sample.contains("[stats]"));
        assert!(sample.contains("[runner]"));
    }
}
