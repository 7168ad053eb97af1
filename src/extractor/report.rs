use crate::config::Config;
use crate::error::{RawDumpError, Result};
use crate::extractor::ExtractionProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub root_dir: String,
    pub output_file: String,
    pub extraction_summary: ExtractionSummary,
    pub files: Vec<String>,
    pub extraction_time: DateTime<Utc>,
    pub errors: Vec<String>,
    pub config_used: ConfigSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub directories_visited: usize,
    pub directories_pruned: usize,
    pub directories_skipped: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub targets: Vec<String>,
    pub skip_unreadable_dirs: bool,
    pub sort_entries: bool,
}

impl From<&Config> for ConfigSnapshot {
    fn from(config: &Config) -> Self {
        Self {
            targets: config.extraction.targets.clone(),
            skip_unreadable_dirs: config.traversal.skip_unreadable_dirs,
            sort_entries: config.traversal.sort_entries,
        }
    }
}

impl From<&ExtractionProgress> for ExtractionSummary {
    fn from(progress: &ExtractionProgress) -> Self {
        Self {
            files_processed: progress.files_processed,
            files_failed: progress.files_failed,
            bytes_read: progress.bytes_read,
            bytes_written: progress.bytes_written,
            directories_visited: progress.statistics.directories_visited,
            directories_pruned: progress.statistics.directories_pruned,
            directories_skipped: progress.statistics.directories_unreadable,
            duration_ms: progress.elapsed().as_millis() as u64,
        }
    }
}

impl ExtractionReport {
    pub fn new(config: &Config, progress: &ExtractionProgress) -> Self {
        Self {
            root_dir: config.extraction.root_dir.display().to_string(),
            output_file: config.extraction.output_file.display().to_string(),
            extraction_summary: ExtractionSummary::from(progress),
            files: progress
                .processed
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            extraction_time: Utc::now(),
            errors: progress.errors.clone(),
            config_used: ConfigSnapshot::from(config),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json_content =
            serde_json::to_string_pretty(self).map_err(|e| RawDumpError::Config {
                message: format!("Failed to serialize report to JSON: {}", e),
            })?;

        fs::write(path, json_content).map_err(|e| RawDumpError::output_write(path, e))?;

        Ok(())
    }
}
