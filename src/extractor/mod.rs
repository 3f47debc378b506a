pub mod stats_extractor;

pub use stats_extractor::StatsExtractor;
