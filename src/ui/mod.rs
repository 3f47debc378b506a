pub mod confirm;
pub mod output;
pub mod progress;
pub mod reporter;

pub use confirm::{confirm, PROCEED_PROMPT};
pub use output::{OutputFormatter, OutputMode};
pub use progress::ProgressManager;
pub use reporter::ProgressReporter;
