use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rawdump")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect named source files from a directory tree into one text file")]
#[command(
    long_about = "RawDump walks a directory tree, skips dependency, build and hidden \
                  directories, and appends the path and content of every file whose \
                  name is in the target list to a single dump file."
)]
#[command(after_help = "EXAMPLES:\n  \
    rawdump\n  \
    rawdump ./app --targets battle-screen.tsx,battleManager.js\n  \
    rawdump ~/projects/game --output game.txt --skip-unreadable-dirs\n  \
    rawdump --config rawdump.toml --output-format json")]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Dump file to write (defaults to raw.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File names to collect (comma-separated)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "File names to collect (e.g., battle-screen.tsx,battleManager.js)"
    )]
    pub targets: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip directories that cannot be listed instead of aborting
    #[arg(long)]
    pub skip_unreadable_dirs: bool,

    /// Keep the operating system's directory order instead of sorting by name
    #[arg(long)]
    pub no_sort: bool,

    /// Output format for the operator log
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show what would be extracted without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a sample configuration file
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_targets(self.targets.clone())
            .with_root_dir(self.root.clone())
            .with_output_file(self.output.clone())
            .with_skip_unreadable_dirs(self.skip_unreadable_dirs)
            .with_no_sort(self.no_sort)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
