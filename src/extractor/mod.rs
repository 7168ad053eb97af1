pub mod file_extractor;
pub mod record_writer;
pub mod report;

pub use file_extractor::{extract_targets, ExtractionEvent, ExtractionProgress, Extractor};
pub use record_writer::{RecordBody, RecordWriter, BANNER_WIDTH};
pub use report::{ConfigSnapshot, ExtractionReport, ExtractionSummary};
