pub mod dispatcher;
pub mod job;
pub mod report;

pub use dispatcher::{Dispatcher, JobObserver};
pub use job::{Job, JobOutcome};
pub use report::{BatchSummary, FailedJob};
