use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error reading {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },

    #[error("Invalid config from {origin}: {source}")]
    Parse {
        origin: String,
        source: toml::de::Error,
    },

    #[error("Could not run the op CLI: {source}")]
    OpUnavailable { source: io::Error },

    #[error("op read failed for '{reference}': {stderr}")]
    OpRead { reference: String, stderr: String },
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Must provide either --hours or --csv")]
    NoItems,

    #[error("Error reading {}: {}", .path.display(), .source)]
    CsvOpen { path: PathBuf, source: csv::Error },

    #[error("Invalid CSV row: {source}")]
    CsvRow {
        #[from]
        source: csv::Error,
    },

    #[error("Line {line}: {field} is not a number: '{value}'")]
    InvalidNumber {
        line: u64,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{count} line items do not fit on one page (at most {max})")]
    TooManyItems { count: usize, max: usize },

    #[error("Error writing {}: {}", .path.display(), .source)]
    Create { path: PathBuf, source: io::Error },

    #[error("PDF error: {source}")]
    Pdf {
        #[from]
        source: lopdf::Error,
    },
}
