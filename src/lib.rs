pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod extractor;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{Config, ExtractionConfig, TraversalConfig, CliOverrides};
pub use error::{RawDumpError, UserFriendlyError, Result};

// Core functionality re-exports
pub use scanner::{should_skip_directory, TargetScanner, TargetSet, TargetFile, SKIP_DIRECTORIES};
pub use extractor::{extract_targets, Extractor, ExtractionEvent, ExtractionProgress, ExtractionReport, RecordWriter};
pub use ui::{ProgressManager, OutputFormatter, OutputMode, ProgressAwareOutput};

use console::Term;
use std::path::Path;

/// Main library interface for RawDump functionality
pub struct RawDump {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl RawDump {
    /// Create a new RawDump instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_spinner =
            output_mode == OutputMode::Human && !quiet && Term::stdout().is_term();
        let progress_manager = ProgressManager::new(show_spinner);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create RawDump instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Run one extraction with the configured targets, root and output file
    pub fn run(&self) -> Result<ExtractionReport> {
        let root_dir = &self.config.extraction.root_dir;
        let output_file = &self.config.extraction.output_file;

        self.output_formatter.start_operation(&format!(
            "Collecting {} target file name(s) under {}",
            self.config.extraction.targets.len(),
            root_dir.display()
        ));

        let spinner = self.progress_manager.create_spinner("Scanning...");
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));
        let event_callback = |event: &ExtractionEvent| {
            ui::progress::update_scan_spinner(&spinner, event);
            output.report_event(event);
        };

        let extractor = Extractor::from_config(&self.config);
        let result = extractor.extract(root_dir, output_file, Some(&event_callback));

        let progress = match result {
            Ok(progress) => progress,
            Err(e) => {
                spinner.abandon();
                self.progress_manager.clear();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(&spinner, &progress);
        self.progress_manager.clear();

        self.output_formatter.debug(&progress.statistics.display_summary());

        let report = ExtractionReport::new(&self.config, &progress);
        self.output_formatter.print_extraction_summary(&report);
        self.output_formatter.print_completion(output_file);

        Ok(report)
    }

    /// Print what a run would do without touching the filesystem
    pub fn describe_plan(&self) {
        self.output_formatter.print_plan(&self.config);
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(RawDumpError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &RawDumpError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
