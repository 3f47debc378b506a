pub mod capture_scanner;
pub mod file_filter;

pub use capture_scanner::{CaptureFile, CaptureScanner, ScanResult};
pub use file_filter::CaptureFilter;
