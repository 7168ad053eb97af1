use crate::config::Config;
use crate::error::{RawDumpError, UserFriendlyError};
use crate::extractor::{ExtractionEvent, ExtractionReport};
use crate::scanner::SKIP_DIRECTORIES;
use console::{style, Emoji, Term};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

/// Operator-facing log. Per-file progress lines always go to stdout.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let term = Term::stdout();
        let use_colors = match mode {
            OutputMode::Human => term.features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("{}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            self.print_warning(message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    // Per-file progress lines. Failures are shown even in quiet mode.
    pub fn file_processed(&self, path: &Path) {
        if !self.should_show_message(0) {
            return;
        }

        match self.mode {
            OutputMode::Human if self.use_colors => {
                println!("{} {}", style("Processed:").green(), path.display());
            }
            OutputMode::Human | OutputMode::Plain => println!("Processed: {}", path.display()),
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "file",
                "status": "processed",
                "path": path.display().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        }
    }

    pub fn file_failed(&self, path: &Path, message: &str) {
        match self.mode {
            OutputMode::Human if self.use_colors => {
                println!(
                    "{} {}: {}",
                    style("Error processing").red().bold(),
                    path.display(),
                    message
                );
            }
            OutputMode::Human | OutputMode::Plain => {
                println!("Error processing {}: {}", path.display(), message)
            }
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "file",
                "status": "error",
                "path": path.display().to_string(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        }
    }

    pub fn report_event(&self, event: &ExtractionEvent) {
        match event {
            ExtractionEvent::EnteringDirectory(path) => {
                self.debug(&format!("Scanning {}", path.display()));
            }
            ExtractionEvent::DirectoryPruned(path) => {
                self.debug(&format!("Skipping directory {}", path.display()));
            }
            ExtractionEvent::DirectorySkipped { path, message } => {
                self.print_warning(&format!(
                    "Skipped unreadable directory {}: {}",
                    path.display(),
                    message
                ));
            }
            ExtractionEvent::FileProcessed { path, .. } => self.file_processed(path),
            ExtractionEvent::FileFailed { path, message } => self.file_failed(path, message),
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &RawDumpError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    // Summary and reporting
    pub fn print_completion(&self, output_file: &Path) {
        self.success(&format!(
            "File extraction completed. Check {} for results.",
            output_file.display()
        ));
    }

    pub fn print_extraction_summary(&self, report: &ExtractionReport) {
        if !self.should_show_message(1) {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_summary(report),
            OutputMode::Json => {} // The full report is printed instead
            OutputMode::Plain => self.print_plain_summary(report),
        }
    }

    pub fn print_extraction_report(&self, report: &ExtractionReport) {
        if self.mode == OutputMode::Json {
            let json_output =
                serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json_output);
        }
    }

    /// Dry-run description of a resolved configuration. Printed even in quiet mode.
    pub fn print_plan(&self, config: &Config) {
        let extraction = &config.extraction;
        let traversal = &config.traversal;
        let unreadable_policy = if traversal.skip_unreadable_dirs { "skip" } else { "abort" };

        if self.mode == OutputMode::Json {
            self.print_json_object(&serde_json::json!({
                "type": "plan",
                "root_dir": extraction.root_dir.display().to_string(),
                "output_file": extraction.output_file.display().to_string(),
                "targets": extraction.targets,
                "skip_directories": SKIP_DIRECTORIES,
                "unreadable_dirs": unreadable_policy,
                "sort_entries": traversal.sort_entries
            }));
            return;
        }

        let title = "Dry run";
        if self.use_colors {
            println!("{} {}", SPARKLES, style(title).bold().cyan());
        } else {
            println!("=== {} ===", title);
        }
        println!("  Root directory:   {}", extraction.root_dir.display());
        println!("  Output file:      {}", extraction.output_file.display());
        if extraction.targets.is_empty() {
            println!("  Targets:          (none, output will be empty)");
        } else {
            println!("  Targets:          {}", extraction.targets.join(", "));
        }
        println!(
            "  Skipped dirs:     {} and any name starting with '.'",
            SKIP_DIRECTORIES.join(", ")
        );
        println!("  Unreadable dirs:  {}", unreadable_policy);
        println!("  Sorted entries:   {}", traversal.sort_entries);
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_warning(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Warning, message),
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, report: &ExtractionReport) {
        let summary = &report.extraction_summary;
        self.print_separator();

        let highlight = |value: String| {
            if self.use_colors {
                style(value).cyan().bold().to_string()
            } else {
                value
            }
        };

        println!("  Files processed:     {}", highlight(summary.files_processed.to_string()));
        println!("  Bytes written:       {}", highlight(format_bytes(summary.bytes_written)));
        println!("  Directories pruned:  {}", highlight(summary.directories_pruned.to_string()));
        println!(
            "  Time taken:          {}",
            highlight(format_duration(Duration::from_millis(summary.duration_ms)))
        );

        if summary.files_failed > 0 {
            println!("  Files with errors:   {}", summary.files_failed);
        }

        if report.has_errors() {
            println!();
            println!("Issues encountered:");
            for error in &report.errors {
                println!("  - {}", error);
            }
        }

        self.print_separator();
    }

    fn print_plain_summary(&self, report: &ExtractionReport) {
        let summary = &report.extraction_summary;
        println!("Files processed: {}", summary.files_processed);
        println!("Files with errors: {}", summary.files_failed);
        println!("Bytes written: {}", summary.bytes_written);
        println!("Directories pruned: {}", summary.directories_pruned);
        println!("Duration: {}ms", summary.duration_ms);
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Prints through the formatter while keeping any live spinner intact.
pub struct ProgressAwareOutput<'a> {
    formatter: &'a OutputFormatter,
    progress_manager: Option<&'a crate::ui::ProgressManager>,
}

impl<'a> ProgressAwareOutput<'a> {
    pub fn new(
        formatter: &'a OutputFormatter,
        progress_manager: Option<&'a crate::ui::ProgressManager>,
    ) -> Self {
        Self {
            formatter,
            progress_manager,
        }
    }

    pub fn suspend_and_print<F>(&self, f: F)
    where
        F: FnOnce(&OutputFormatter),
    {
        if let Some(pm) = self.progress_manager {
            pm.suspend(|| f(self.formatter));
        } else {
            f(self.formatter);
        }
    }

    pub fn report_event(&self, event: &ExtractionEvent) {
        // Directory entries are too frequent to interrupt the spinner for
        if matches!(event, ExtractionEvent::EnteringDirectory(_)) && !self.formatter.should_show_message(2) {
            return;
        }
        self.suspend_and_print(|f| f.report_event(event));
    }
}
