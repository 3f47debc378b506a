pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod stats;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, DiscoveryConfig, RunnerConfig, StatsConfig};
pub use error::{CapStatsError, Result, UserFriendlyError};

// Core functionality re-exports
pub use batch::{BatchSummary, Dispatcher, FailedJob, Job, JobObserver, JobOutcome};
pub use extractor::StatsExtractor;
pub use scanner::{CaptureFile, CaptureFilter, CaptureScanner, ScanResult};
pub use stats::{build_args, StatsArgs, StatsSelection, DEFAULT_STATS};
pub use ui::{OutputFormatter, OutputMode, ProgressManager, ProgressReporter};

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub const NOTHING_TO_PROCESS: &str = "No pcap or pcapng files need processing.";
pub const ABORTED: &str = "Aborted.";

/// How a run ended, when it did not fail outright.
#[derive(Debug)]
pub enum RunOutcome {
    NothingToProcess,
    Aborted,
    Completed(BatchSummary),
}

/// Result of the interactive part of a run.
enum Gate {
    Proceed {
        candidates: Vec<CaptureFile>,
        skipped: usize,
        args: StatsArgs,
    },
    Stop(RunOutcome),
}

/// What a run would do, without running the tool.
#[derive(Debug)]
pub struct DryRunPlan {
    pub scan: ScanResult,
    pub selection: StatsSelection,
    pub args: StatsArgs,
    pub extractor: StatsExtractor,
}

impl DryRunPlan {
    pub fn command_for(&self, capture: &CaptureFile) -> String {
        self.extractor
            .command_line(&capture.source_path, self.args.as_slice())
            .join(" ")
    }
}

/// Main library interface for capstats
pub struct CapStats {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl CapStats {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager =
            ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress_manager = ProgressManager::new(enabled);
        self
    }

    /// Create a CapStats instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;

        Ok(Self::new(config, cli_args.output_mode(), cli_args.verbose, cli_args.quiet)
            .with_progress(cli_args.show_progress()))
    }

    /// Finds capture files under the configured root.
    pub fn scan(&self) -> Result<ScanResult> {
        let root = &self.config.discovery.root;
        self.output_formatter
            .start_operation(&format!("Searching {} for capture files", root.display()));

        let spinner = self
            .progress_manager
            .create_spinner("Searching for capture files...");
        let scanner = CaptureScanner::new(&self.config.discovery)?;
        let result = scanner.scan(root);
        spinner.finish_and_clear();
        let result = result?;
        debug!(
            captures = result.total_captures(),
            candidates = result.candidates.len(),
            "scan finished"
        );

        if !result.already_processed.is_empty() {
            self.output_formatter.debug(&format!(
                "Skipping {} files that already have statistics",
                result.already_processed.len()
            ));
        }

        Ok(result)
    }

    /// Runs the whole batch, reading the confirmation answer from stdin.
    pub async fn run(&self) -> Result<RunOutcome> {
        // The stdin lock is released before the batch starts.
        let gate = {
            let mut input = io::stdin().lock();
            self.prepare(&mut input)?
        };
        self.execute(gate).await
    }

    pub async fn run_with_input<R: BufRead>(&self, input: &mut R) -> Result<RunOutcome> {
        let gate = self.prepare(input)?;
        self.execute(gate).await
    }

    /// Scans, confirms, and builds the tool arguments. Nothing runs yet.
    fn prepare<R: BufRead>(&self, input: &mut R) -> Result<Gate> {
        let scan = self.scan()?;
        let skipped = scan.already_processed.len();

        if scan.candidates.is_empty() {
            self.output_formatter.info(NOTHING_TO_PROCESS);
            return Ok(Gate::Stop(RunOutcome::NothingToProcess));
        }

        if !self.confirm_candidates(&scan.candidates, input)? {
            self.output_formatter.info(ABORTED);
            return Ok(Gate::Stop(RunOutcome::Aborted));
        }

        let args = build_args(&self.config.stats.selection)?;

        Ok(Gate::Proceed {
            candidates: scan.candidates,
            skipped,
            args,
        })
    }

    async fn execute(&self, gate: Gate) -> Result<RunOutcome> {
        match gate {
            Gate::Stop(outcome) => Ok(outcome),
            Gate::Proceed {
                candidates,
                skipped,
                args,
            } => {
                let summary = self.process(candidates, args).await;
                Ok(RunOutcome::Completed(summary.with_skipped(skipped)))
            }
        }
    }

    /// Lists the candidates and, unless confirmation is pre-approved, asks.
    fn confirm_candidates<R: BufRead>(&self, candidates: &[CaptureFile], input: &mut R) -> Result<bool> {
        let assume_yes = self.config.runner.assume_yes;

        if !(assume_yes && self.output_formatter.is_quiet()) {
            self.output_formatter.print_candidates(candidates);
        }

        if assume_yes {
            return Ok(true);
        }

        // JSON stdout carries only JSON lines.
        let confirmed = if self.output_formatter.mode() == OutputMode::Json {
            ui::confirm(input, &mut io::stderr(), ui::PROCEED_PROMPT)?
        } else {
            ui::confirm(input, &mut io::stdout(), ui::PROCEED_PROMPT)?
        };
        Ok(confirmed)
    }

    async fn process(&self, candidates: Vec<CaptureFile>, args: StatsArgs) -> BatchSummary {
        let dispatcher = Dispatcher::new(self.config.runner.workers);
        let extractor = Arc::new(StatsExtractor::new(self.config.runner.tool.clone()));
        let report_count = args.report_count();
        let jobs = Job::batch(candidates, args.into_shared());
        let total = jobs.len();

        self.output_formatter.start_operation(&format!(
            "Extracting {} statistics from {} captures with {} workers",
            report_count,
            total,
            dispatcher.workers()
        ));
        info!(captures = total, reports = report_count, tool = %extractor.tool(), "starting batch");

        let file_progress = self.progress_manager.create_file_progress(total as u64);
        let reporter = Arc::new(ProgressReporter::new(
            self.output_formatter.clone(),
            file_progress.clone(),
        ));

        let start_time = Instant::now();
        let outcomes = dispatcher
            .run(jobs, reporter, move |job| {
                let extractor = Arc::clone(&extractor);
                async move { extractor.extract(&job).await }
            })
            .await;
        let elapsed = start_time.elapsed();

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Processed {} captures", total),
            elapsed,
        );
        debug!(elapsed_ms = elapsed.as_millis() as u64, "batch finished");

        BatchSummary::from_outcomes(&outcomes, dispatcher.workers(), elapsed)
    }

    /// Resolves everything a run needs without launching the tool or writing.
    pub fn plan(&self) -> Result<DryRunPlan> {
        let scan = self.scan()?;
        let selection = StatsSelection::resolve(&self.config.stats.selection);
        let args = StatsArgs::from_names(selection.stat_names()?);

        Ok(DryRunPlan {
            scan,
            selection,
            args,
            extractor: StatsExtractor::new(self.config.runner.tool.clone()),
        })
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &CapStatsError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
