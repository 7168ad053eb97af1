pub mod dir_filter;
pub mod target_scanner;

pub use dir_filter::{should_skip_directory, SKIP_DIRECTORIES};
pub use target_scanner::{Scan, ScanEvent, ScanStatistics, TargetFile, TargetScanner, TargetSet};
