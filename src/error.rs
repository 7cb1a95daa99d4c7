//! Centralized error handling for thermoview

use std::fmt;
use std::io;

/// Error type for temperature sources and the surrounding plumbing.
///
/// The first four variants are the read-path taxonomy: none of them is fatal,
/// the reader turns every one into the unavailable sentinel.
#[derive(Debug)]
pub enum ThermoError {
    /// The platform refused the query (SELinux, missing permission)
    PermissionDenied(String),
    /// A source root, file or program does not exist or cannot be opened
    SourceUnavailable(String),
    /// Raw data was present but not a number
    ParseFailure(String),
    /// The source answered but had nothing for the requested target
    NoData(String),
    /// Other I/O errors
    Io(io::Error),
    /// Configuration errors
    Config(String),
}

impl fmt::Display for ThermoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermoError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            ThermoError::SourceUnavailable(msg) => write!(f, "Source unavailable: {}", msg),
            ThermoError::ParseFailure(msg) => write!(f, "Parse error: {}", msg),
            ThermoError::NoData(msg) => write!(f, "No data: {}", msg),
            ThermoError::Io(err) => write!(f, "I/O error: {}", err),
            ThermoError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for ThermoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThermoError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ThermoError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => ThermoError::PermissionDenied(error.to_string()),
            io::ErrorKind::NotFound => ThermoError::SourceUnavailable(error.to_string()),
            _ => ThermoError::Io(error),
        }
    }
}

/// Type alias for Results in thermoview
pub type Result<T> = std::result::Result<T, ThermoError>;
