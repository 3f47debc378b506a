use crate::config::{CliOverrides, Config, MAX_WORKERS};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "capstats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract tshark statistics from every capture file in a directory tree")]
#[command(
    long_about = "capstats finds .pcap and .pcapng files under a directory, runs tshark \
                  statistics over each of them in parallel, and writes every report next \
                  to its capture file. Captures that already have a report are skipped."
)]
#[command(after_help = "EXAMPLES:\n  \
    capstats --dir ./captures\n  \
    capstats -d ./captures --stats \"io,phs conv,tcp\" --yes\n  \
    capstats -d ./captures --stats my-stats.txt --workers 4\n  \
    capstats -d ./captures --overwrite --suffix .stats.txt --dry-run\n  \
    capstats --list-default-stats")]
pub struct Cli {
    /// Directory to search for capture files
    #[arg(short, long, value_name = "DIR", help = "Directory to search (default: .)")]
    pub dir: Option<PathBuf>,

    /// Statistics selection: empty for the built-in list, a file with one
    /// statistic per line, or space-separated statistic names
    #[arg(short, long, value_name = "STATS")]
    pub stats: Option<String>,

    /// Suffix that replaces the capture extension in report file names
    #[arg(long, help = "Report file suffix (default: .total-stats.txt)")]
    pub suffix: Option<String>,

    /// Reprocess captures whose report already exists
    #[arg(long)]
    pub overwrite: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Number of concurrent tool runs
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=MAX_WORKERS as u64))]
    pub workers: Option<u64>,

    /// Analysis tool to run on each capture
    #[arg(long, value_name = "PATH", help = "Analysis tool binary (default: tshark)")]
    pub tool: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "List the captures and the tool command without running anything")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,

    /// Print the built-in statistics list
    #[arg(long, help = "Print the built-in statistics, one per line")]
    pub list_default_stats: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_root(self.dir.clone())
            .with_selection(self.stats.clone())
            .with_suffix(self.suffix.clone())
            .with_overwrite(self.overwrite)
            .with_assume_yes(self.yes)
            .with_workers(self.workers.map(|w| w as usize))
            .with_tool(self.tool.clone())
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    /// Progress bars only make sense for human output on a terminal.
    pub fn show_progress(&self) -> bool {
        matches!(self.output_format, OutputFormat::Human)
            && !self.quiet
            && console::Term::stderr().is_term()
    }
}
