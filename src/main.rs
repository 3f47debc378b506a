use capstats::{
    CapStats, CapStatsError, Cli, OutputFormatter, OutputMode, RunOutcome, UserFriendlyError,
    DEFAULT_STATS, NOTHING_TO_PROCESS,
};
use clap::Parser;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(&cli);

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    if cli.list_default_stats {
        return handle_list_default_stats();
    }

    let capstats = match CapStats::from_cli(&cli) {
        Ok(capstats) => capstats,
        Err(e) => {
            print_startup_error(&cli, &e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&capstats);
    }

    match capstats.run().await {
        Ok(RunOutcome::Completed(summary)) => {
            capstats.output_formatter().print_batch_summary(&summary);
            // Per-file failures are reported, not fatal.
            0
        }
        Ok(RunOutcome::NothingToProcess) | Ok(RunOutcome::Aborted) => 0,
        Err(e) => {
            capstats.handle_error(&e);
            e.exit_code()
        }
    }
}

fn init_logging(cli: &Cli) {
    let log_level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .with_filter(tracing_subscriber::filter::LevelFilter::from_level(log_level)),
        )
        .try_init();
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "capstats.toml".to_string());

    match CapStats::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  capstats --dir <captures> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_list_default_stats() -> i32 {
    for stat in DEFAULT_STATS {
        println!("{}", stat);
    }
    0
}

fn handle_dry_run(capstats: &CapStats) -> i32 {
    let formatter = capstats.output_formatter();

    formatter.info("DRY RUN MODE - No tool runs, no files written");
    formatter.print_separator();

    let plan = match capstats.plan() {
        Ok(plan) => plan,
        Err(e) => {
            capstats.handle_error(&e);
            return e.exit_code();
        }
    };

    let config = capstats.config();
    if formatter.mode() == OutputMode::Json {
        let commands: Vec<_> = plan
            .scan
            .candidates
            .iter()
            .map(|capture| {
                serde_json::json!({
                    "path": capture.display_path(),
                    "output": capture.output_path.display().to_string(),
                    "command": plan.command_for(capture)
                })
            })
            .collect();

        formatter.print_json_object(&serde_json::json!({
            "type": "dry_run",
            "root": config.discovery.root.display().to_string(),
            "statistics": plan.selection.describe(),
            "workers": config.runner.workers,
            "skipped_existing": plan.scan.already_processed.len(),
            "jobs": commands
        }));
        return 0;
    }

    formatter.info("Configuration that would be used:");
    println!("  Search root: {}", config.discovery.root.display());
    println!("  Extensions: {}", config.discovery.extensions.join(", "));
    println!("  Output suffix: {}", config.discovery.suffix);
    println!("  Overwrite existing: {}", config.discovery.overwrite);
    println!("  Statistics: {}", plan.selection.describe());
    println!("  Tool: {}", plan.extractor.tool());
    println!("  Workers: {}", config.runner.workers);

    formatter.print_separator();

    if plan.scan.candidates.is_empty() {
        formatter.info(NOTHING_TO_PROCESS);
    } else {
        formatter.info("Extraction plan:");
        for (i, capture) in plan.scan.candidates.iter().enumerate() {
            println!("  {}: {}", i + 1, capture.display_path());
            println!("     -> {}", capture.output_path.display());
            formatter.debug(&format!("   $ {}", plan.command_for(capture)));
        }
    }

    if !plan.scan.already_processed.is_empty() {
        formatter.info(&format!(
            "{} files already have statistics and would be skipped",
            plan.scan.already_processed.len()
        ));
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to extract the statistics");

    0
}

fn print_startup_error(cli: &Cli, error: &CapStatsError) {
    let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
    formatter.print_user_friendly_error(error);
}
