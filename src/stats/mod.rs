pub mod catalog;
pub mod selection;

pub use catalog::DEFAULT_STATS;
pub use selection::{build_args, StatsArgs, StatsSelection};
