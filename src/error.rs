use thiserror::Error;

#[derive(Error, Debug)]
pub enum RawDumpError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read directory: {path}")]
    DirectoryAccess {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Cannot write output file: {path}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },
}

impl RawDumpError {
    pub fn output_write<P: AsRef<std::path::Path>>(path: P, source: std::io::Error) -> Self {
        RawDumpError::OutputWrite {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for RawDumpError {
    fn user_message(&self) -> String {
        match self {
            RawDumpError::DirectoryAccess { path, source } => {
                let reason = source
                    .io_error()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| source.to_string());
                format!("Cannot read directory {}: {}", path, reason)
            }
            RawDumpError::OutputWrite { path, source } => {
                format!("Cannot write output file {}: {}", path, source)
            }
            RawDumpError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            RawDumpError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            RawDumpError::DirectoryAccess { .. } => Some(
                "Check the directory permissions, or pass --skip-unreadable-dirs to skip directories that cannot be listed.".to_string()
            ),
            RawDumpError::OutputWrite { .. } => Some(
                "Ensure the output location is writable and the disk is not full, or choose another file with --output.".to_string()
            ),
            RawDumpError::Config { .. } => Some(
                "Check your configuration file syntax. Run with --generate-config to see a complete example.".to_string()
            ),
            RawDumpError::InvalidPath { .. } => Some(
                "Pass an existing directory as the root to scan (defaults to the current directory).".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RawDumpError>;
