use crate::batch::BatchSummary;
use crate::error::{CapStatsError, UserFriendlyError};
use crate::scanner::CaptureFile;
use crate::ui::confirm::display_candidates;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

#[derive(Clone)]
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn verbose_level(&self) -> u8 {
        self.verbose_level
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("{}", message),
            }
        }
    }

    /// Errors are shown even in quiet mode.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("{}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("{}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("{}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("{}...", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &CapStatsError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("Suggestion: {}", suggestion),
            }
        }
    }

    /// Candidate list shown before confirmation. Printed even in quiet mode.
    pub fn print_candidates(&self, files: &[CaptureFile]) {
        match self.mode {
            OutputMode::Json => {
                let paths: Vec<String> = files.iter().map(CaptureFile::display_path).collect();
                self.print_json_object(&serde_json::json!({
                    "type": "candidates",
                    "total": files.len(),
                    "files": paths
                }));
            }
            _ => {
                let mut stdout = std::io::stdout().lock();
                // Nothing sensible to do if stdout is gone.
                let _ = display_candidates(&mut stdout, files);
            }
        }
    }

    pub fn print_batch_summary(&self, summary: &BatchSummary) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_summary(summary);
                }
            }
            OutputMode::Json => {
                let mut value = serde_json::to_value(summary).unwrap_or_default();
                if let Some(object) = value.as_object_mut() {
                    object.insert("type".to_string(), serde_json::json!("summary"));
                }
                self.print_json_object(&value);
            }
            OutputMode::Plain => {
                if !self.quiet {
                    self.print_plain_summary(summary);
                }
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    pub fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (&CHECKMARK, style(message).green().bold()),
                MessageType::Error => (&CROSS, style(message).red().bold()),
                MessageType::Info => (&INFO, style(message).cyan()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            match msg_type {
                MessageType::Error => eprintln!("{}", message),
                _ => println!("{}", message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_human_summary(&self, summary: &BatchSummary) {
        println!();
        self.print_separator();

        let headline = if summary.is_clean() {
            "Statistics extraction completed!"
        } else {
            "Statistics extraction completed with errors"
        };

        if self.use_colors {
            if summary.is_clean() {
                println!("{}{}", CHECKMARK, style(headline).green().bold());
            } else {
                println!("{}{}", WARNING, style(headline).yellow().bold());
            }
        } else {
            println!("{}", headline);
        }

        println!();
        println!("  Files processed: {}", self.highlight(summary.succeeded.to_string()));
        if summary.skipped_existing > 0 {
            println!("  Already done:    {}", summary.skipped_existing);
        }
        println!("  Bytes written:   {}", self.highlight(format_bytes(summary.bytes_written)));
        println!("  Workers:         {}", summary.workers);
        println!("  Time taken:      {}", self.highlight(format_duration(summary.duration())));

        if !summary.failures.is_empty() {
            println!("  Failed:          {}", summary.failed());
            for failure in &summary.failures {
                println!("    - {}: {}", failure.path, failure.message);
            }
        }

        self.print_separator();
    }

    fn print_plain_summary(&self, summary: &BatchSummary) {
        println!(
            "Processed {}/{} files in {}.",
            summary.succeeded,
            summary.total_jobs,
            format_duration(summary.duration())
        );
        if !summary.failures.is_empty() {
            println!("Failed: {}", summary.failed());
            for failure in &summary.failures {
                println!("  {}: {}", failure.path, failure.message);
            }
        }
    }

    fn highlight(&self, value: String) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Info,
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
