use crate::extractor::{ExtractionEvent, ExtractionProgress};
use crate::ui::output::format_duration;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }

    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.enabled {
            self.multi_progress.suspend(f)
        } else {
            f()
        }
    }

    pub fn clear(&self) {
        if self.enabled {
            self.multi_progress.clear().ok();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn update_scan_spinner(pb: &ProgressBar, event: &ExtractionEvent) {
    match event {
        ExtractionEvent::EnteringDirectory(path) => {
            pb.set_message(format!("Scanning {}", path.display()));
        }
        ExtractionEvent::FileProcessed { .. } | ExtractionEvent::FileFailed { .. } => pb.inc(1),
        ExtractionEvent::DirectoryPruned(_) | ExtractionEvent::DirectorySkipped { .. } => {}
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, progress: &ExtractionProgress) {
    let final_message = format!(
        "Extracted {} files (completed in {})",
        progress.records_written(),
        format_duration(progress.elapsed())
    );
    pb.finish_with_message(final_message);
}
