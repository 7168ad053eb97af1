use crate::error::{RawDumpError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "raw.txt";

pub const DEFAULT_TARGETS: &[&str] = &["battle-screen.tsx", "battleManager.js", "battle-results.tsx"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub traversal: TraversalConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub targets: Vec<String>,
    pub root_dir: PathBuf,
    pub output_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub skip_unreadable_dirs: bool,
    pub sort_entries: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            targets: DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect(),
            root_dir: PathBuf::from("."),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            skip_unreadable_dirs: false, // Fail fast on unlistable directories
            sort_entries: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RawDumpError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| RawDumpError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| RawDumpError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["rawdump.toml", ".rawdump.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref targets) = cli_args.targets {
            self.extraction.targets = targets
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ref root_dir) = cli_args.root_dir {
            self.extraction.root_dir = root_dir.clone();
        }

        if let Some(ref output_file) = cli_args.output_file {
            self.extraction.output_file = output_file.clone();
        }

        if cli_args.skip_unreadable_dirs {
            self.traversal.skip_unreadable_dirs = true;
        }

        if cli_args.no_sort {
            self.traversal.sort_entries = false;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.extraction.output_file.as_os_str().is_empty() {
            return Err(RawDumpError::Config {
                message: "Output file path must not be empty".to_string(),
            });
        }

        if self.extraction.root_dir.as_os_str().is_empty() {
            return Err(RawDumpError::Config {
                message: "Root directory path must not be empty".to_string(),
            });
        }

        // Targets are matched against basenames only
        for target in &self.extraction.targets {
            if target.is_empty() {
                return Err(RawDumpError::Config {
                    message: "Target file names must not be empty".to_string(),
                });
            }
            if target.contains('/') || target.contains('\\') {
                return Err(RawDumpError::Config {
                    message: format!(
                        "Target '{}' must be a file name, not a path",
                        target
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub targets: Option<Vec<String>>,
    pub root_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub skip_unreadable_dirs: bool,
    pub no_sort: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_targets(mut self, targets: Option<Vec<String>>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_root_dir(mut self, root_dir: Option<PathBuf>) -> Self {
        self.root_dir = root_dir;
        self
    }

    pub fn with_output_file(mut self, output_file: Option<PathBuf>) -> Self {
        self.output_file = output_file;
        self
    }

    pub fn with_skip_unreadable_dirs(mut self, skip: bool) -> Self {
        self.skip_unreadable_dirs = skip;
        self
    }

    pub fn with_no_sort(mut self, no_sort: bool) -> Self {
        self.no_sort = no_sort;
        self
    }
}
