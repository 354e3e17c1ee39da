// src/error.rs
//! Error types for the weight and balance calculator

use std::fmt;

pub type Result<T> = std::result::Result<T, WnbError>;

#[derive(Debug)]
pub enum WnbError {
    Io(std::io::Error),
    Serial(tokio_serial::Error),
    Json(serde_json::Error),
    Connection(String),
    Parse(String),
    /// A non-blank numeric field that does not parse as a real number
    InvalidNumber { field: String, text: String },
    /// Station index outside `0..MAX_STATIONS`
    StationIndex { index: usize, max: usize },
    TooManyStations(usize),
    Validation(String),
    Config(String),
    NotFound(String),
    Other(String),
}

impl WnbError {
    pub fn invalid_number(field: impl Into<String>, text: &str) -> Self {
        WnbError::InvalidNumber {
            field: field.into(),
            text: text.to_string(),
        }
    }
}

impl fmt::Display for WnbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WnbError::Io(e) => write!(f, "IO error: {}", e),
            WnbError::Serial(e) => write!(f, "Serial error: {}", e),
            WnbError::Json(e) => write!(f, "JSON error: {}", e),
            WnbError::Connection(msg) => write!(f, "Connection error: {}", msg),
            WnbError::Parse(msg) => write!(f, "Parse error: {}", msg),
            WnbError::InvalidNumber { field, text } => {
                write!(f, "Invalid number in {}: '{}'", field, text)
            }
            WnbError::StationIndex { index, max } => {
                write!(f, "Station index {} out of range (0..{})", index, max)
            }
            WnbError::TooManyStations(max) => {
                write!(f, "Too many stations (at most {} allowed)", max)
            }
            WnbError::Validation(msg) => write!(f, "Validation error: {}", msg),
            WnbError::Config(msg) => write!(f, "Configuration error: {}", msg),
            WnbError::NotFound(name) => write!(f, "Profile not found: {}", name),
            WnbError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for WnbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WnbError::Io(e) => Some(e),
            WnbError::Serial(e) => Some(e),
            WnbError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WnbError {
    fn from(error: std::io::Error) -> Self {
        WnbError::Io(error)
    }
}

impl From<tokio_serial::Error> for WnbError {
    fn from(error: tokio_serial::Error) -> Self {
        WnbError::Serial(error)
    }
}

impl From<serde_json::Error> for WnbError {
    fn from(error: serde_json::Error) -> Self {
        WnbError::Json(error)
    }
}

impl From<anyhow::Error> for WnbError {
    fn from(error: anyhow::Error) -> Self {
        WnbError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_number_display() {
        let err = WnbError::invalid_number("station 2 weight", "abc");
        assert_eq!(err.to_string(), "Invalid number in station 2 weight: 'abc'");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: WnbError = io.into();
        assert!(matches!(err, WnbError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
