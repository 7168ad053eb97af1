use crate::config::Config;
use crate::error::{RawDumpError, Result};
use crate::extractor::record_writer::{RecordBody, RecordWriter};
use crate::scanner::{Scan, ScanEvent, ScanStatistics, TargetFile, TargetScanner, TargetSet};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Notifications emitted while an extraction runs.
#[derive(Debug, Clone)]
pub enum ExtractionEvent {
    EnteringDirectory(PathBuf),
    DirectoryPruned(PathBuf),
    DirectorySkipped { path: PathBuf, message: String },
    FileProcessed { path: PathBuf, bytes: u64 },
    FileFailed { path: PathBuf, message: String },
}

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub files_failed: usize,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub current_file: Option<PathBuf>,
    pub start_time: Instant,
    pub processed: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub statistics: ScanStatistics,
}

impl ExtractionProgress {
    pub fn new() -> Self {
        Self {
            files_processed: 0,
            files_failed: 0,
            bytes_read: 0,
            bytes_written: 0,
            current_file: None,
            start_time: Instant::now(),
            processed: Vec::new(),
            errors: Vec::new(),
            statistics: ScanStatistics::default(),
        }
    }

    pub fn record_success(&mut self, path: &Path, bytes: u64) {
        self.files_processed += 1;
        self.bytes_read += bytes;
        self.current_file = Some(path.to_path_buf());
        self.processed.push(path.to_path_buf());
    }

    pub fn record_failure(&mut self, path: &Path, message: &str) {
        self.files_failed += 1;
        self.current_file = Some(path.to_path_buf());
        self.add_error(format!("Error processing {}: {}", path.display(), message));
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    /// Records written to the dump, including error records.
    pub fn records_written(&self) -> usize {
        self.files_processed + self.files_failed
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ExtractionProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks a root directory and dumps every target file into one text file.
pub struct Extractor {
    scanner: TargetScanner,
}

impl Extractor {
    pub fn new(targets: TargetSet) -> Self {
        Self {
            scanner: TargetScanner::new(targets),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(TargetSet::new(config.extraction.targets.iter().cloned()))
            .with_skip_unreadable_dirs(config.traversal.skip_unreadable_dirs)
            .with_sorted_entries(config.traversal.sort_entries)
    }

    pub fn with_skip_unreadable_dirs(mut self, skip: bool) -> Self {
        self.scanner = self.scanner.with_skip_unreadable_dirs(skip);
        self
    }

    pub fn with_sorted_entries(mut self, sort: bool) -> Self {
        self.scanner = self.scanner.with_sorted_entries(sort);
        self
    }

    pub fn targets(&self) -> &TargetSet {
        self.scanner.targets()
    }

    /// Truncates `output_file` and fills it with one record per target file
    /// found under `root_dir`. Unreadable target files become error records;
    /// output failures and (by default) unlistable directories abort the run.
    pub fn extract<P, Q>(
        &self,
        root_dir: P,
        output_file: Q,
        event_callback: Option<&dyn Fn(&ExtractionEvent)>,
    ) -> Result<ExtractionProgress>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let output_file = output_file.as_ref();

        // Root is validated before the output file is truncated
        let scan = self.scanner.scan(root_dir)?;

        let file = fs::File::create(output_file)
            .map_err(|e| RawDumpError::output_write(output_file, e))?;
        let mut writer = RecordWriter::new(BufWriter::new(file));

        let progress = self.write_records(scan, &mut writer, output_file, event_callback)?;

        writer
            .flush()
            .map_err(|e| RawDumpError::output_write(output_file, e))?;

        Ok(progress)
    }

    /// Same as [`Extractor::extract`] but writes into an arbitrary stream.
    pub fn extract_to<P, W>(
        &self,
        root_dir: P,
        writer: &mut RecordWriter<W>,
        event_callback: Option<&dyn Fn(&ExtractionEvent)>,
    ) -> Result<ExtractionProgress>
    where
        P: AsRef<Path>,
        W: Write,
    {
        let scan = self.scanner.scan(root_dir)?;
        let progress = self.write_records(scan, writer, Path::new("<stream>"), event_callback)?;
        writer
            .flush()
            .map_err(|e| RawDumpError::output_write("<stream>", e))?;
        Ok(progress)
    }

    fn write_records<W: Write>(
        &self,
        mut scan: Scan<'_>,
        writer: &mut RecordWriter<W>,
        output_label: &Path,
        event_callback: Option<&dyn Fn(&ExtractionEvent)>,
    ) -> Result<ExtractionProgress> {
        let mut progress = ExtractionProgress::new();

        for event in scan.by_ref() {
            match event? {
                ScanEvent::Directory(path) => {
                    notify(event_callback, ExtractionEvent::EnteringDirectory(path));
                }
                ScanEvent::Pruned(path) => {
                    notify(event_callback, ExtractionEvent::DirectoryPruned(path));
                }
                ScanEvent::Unreadable { path, error } => {
                    let message = error
                        .io_error()
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| error.to_string());
                    progress.add_error(format!(
                        "Skipped unreadable directory {}: {}",
                        path.display(),
                        message
                    ));
                    notify(event_callback, ExtractionEvent::DirectorySkipped { path, message });
                }
                ScanEvent::Match(file) => {
                    self.write_target(file, writer, output_label, &mut progress, event_callback)?;
                }
            }
        }

        progress.bytes_written = writer.bytes_written();
        progress.statistics = scan.statistics().clone();
        Ok(progress)
    }

    fn write_target<W: Write>(
        &self,
        file: TargetFile,
        writer: &mut RecordWriter<W>,
        output_label: &Path,
        progress: &mut ExtractionProgress,
        event_callback: Option<&dyn Fn(&ExtractionEvent)>,
    ) -> Result<()> {
        // Read the whole file first so a failed read never leaves partial content
        match fs::read_to_string(&file.path) {
            Ok(content) => {
                let bytes = content.len() as u64;
                writer
                    .write_record(&file.path, RecordBody::Content(&content))
                    .map_err(|e| RawDumpError::output_write(output_label, e))?;
                progress.record_success(&file.path, bytes);
                notify(event_callback, ExtractionEvent::FileProcessed { path: file.path, bytes });
            }
            Err(e) => {
                let message = e.to_string();
                writer
                    .write_record(&file.path, RecordBody::Error(&message))
                    .map_err(|e| RawDumpError::output_write(output_label, e))?;
                progress.record_failure(&file.path, &message);
                notify(event_callback, ExtractionEvent::FileFailed { path: file.path, message });
            }
        }

        Ok(())
    }
}

fn notify(callback: Option<&dyn Fn(&ExtractionEvent)>, event: ExtractionEvent) {
    if let Some(callback) = callback {
        callback(&event);
    }
}

/// Runs a single extraction with the given targets, reporting nothing.
pub fn extract_targets<S, P, Q>(target_files: &[S], root_dir: P, output_file: Q) -> Result<ExtractionProgress>
where
    S: AsRef<str>,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let targets = TargetSet::new(target_files.iter().map(|t| t.as_ref().to_string()));
    Extractor::new(targets).extract(root_dir, output_file, None)
}
