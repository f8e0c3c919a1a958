//! Error types for badge-dl
//!
//! This module provides the error taxonomy of the library:
//! - Validation errors for missing or malformed inputs
//! - Transport and HTTP status errors from the badge service
//! - Persistence errors from the atomic write sequence
//! - Exit code mapping for the command line front-end

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for badge-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for badge-dl
///
/// Each variant carries enough context (field, URL, status code, path) for a
/// caller to print a targeted message and pick a distinct exit code.
#[derive(Debug, Error)]
pub enum Error {
    /// Required input missing or option rejected
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No response from the badge service (DNS, connection, timeout)
    #[error("failed to download badge from {url}: {message}")]
    Transport {
        /// The URL that was requested
        url: String,
        /// Human-readable cause reported by the HTTP client
        message: String,
    },

    /// The badge service responded with something other than 200
    #[error("failed to download badge from {url}: HTTP {code}")]
    HttpStatus {
        /// The URL that was requested
        url: String,
        /// Numeric HTTP status code
        code: u16,
    },

    /// Saving the badge to disk failed
    #[error("failed to save badge: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "timeout")
        key: Option<String>,
    },

    /// I/O error outside the persistence sequence (e.g. reading a config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Input validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A single required field is missing or empty
    #[error("missing required input: {field}")]
    MissingField {
        /// Name of the first missing field ("label", "status" or "path")
        field: String,
    },

    /// Several required fields are missing or empty
    #[error("missing required inputs: {}", fields.join(", "))]
    MissingFields {
        /// Every missing field, in evaluation order
        fields: Vec<String>,
    },

    /// An option value was rejected
    #[error("invalid {option}: {reason}")]
    InvalidOption {
        /// The option name as given on the command line (e.g. "style")
        option: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl ValidationError {
    /// Names of the missing required fields, if this is a missing-field error
    pub fn missing_fields(&self) -> Vec<&str> {
        match self {
            ValidationError::MissingField { field } => vec![field.as_str()],
            ValidationError::MissingFields { fields } => {
                fields.iter().map(String::as_str).collect()
            }
            ValidationError::InvalidOption { .. } => Vec::new(),
        }
    }
}

/// Errors raised while persisting a downloaded badge
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The output directory could not be created
    #[error("could not create directory {path}: {source}")]
    CreateDirectory {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The output directory exists but is not writable
    #[error("directory is not writable: {path}")]
    NotWritable {
        /// Directory that failed the writability check
        path: PathBuf,
    },

    /// Writing the temporary file failed
    #[error("could not write to temporary file {path}: {source}")]
    WriteTemp {
        /// Temporary file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Moving the temporary file over the target failed
    #[error("could not move temporary file to {dest_path}: {source}")]
    Rename {
        /// Temporary file that was being moved
        temp_path: PathBuf,
        /// Final output path
        dest_path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The output path cannot name a file
    #[error("invalid output path {path}: {reason}")]
    InvalidPath {
        /// The rejected path
        path: PathBuf,
        /// Why the path is unusable
        reason: String,
    },
}

/// Map errors to process exit codes for the command line front-end
pub trait ToExitCode {
    /// Process exit code for this error (never 0)
    fn exit_code(&self) -> i32;

    /// Machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToExitCode for Error {
    fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) => 2,
            Error::Transport { .. } => 3,
            Error::HttpStatus { .. } => 4,
            Error::Persistence(_) => 5,
            Error::Config { .. } | Error::Io(_) | Error::Serialization(_) => 1,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Validation(e) => match e {
                ValidationError::MissingField { .. } => "missing_field",
                ValidationError::MissingFields { .. } => "missing_fields",
                ValidationError::InvalidOption { .. } => "invalid_option",
            },
            Error::Transport { .. } => "transport_error",
            Error::HttpStatus { .. } => "http_status",
            Error::Persistence(e) => match e {
                PersistenceError::CreateDirectory { .. } => "create_directory_failed",
                PersistenceError::NotWritable { .. } => "directory_not_writable",
                PersistenceError::WriteTemp { .. } => "write_failed",
                PersistenceError::Rename { .. } => "rename_failed",
                PersistenceError::InvalidPath { .. } => "invalid_path",
            },
            Error::Config { .. } => "config_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
        }
    }
}
