/*!
 * Error types for the gosubtitle application.
 *
 * Document-level failures abort a conversion, cue-level failures are collected
 * as diagnostics while extraction carries on with the remaining cues.
 */

use thiserror::Error;

/// Fatal errors for a whole Movie XML document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// The input is not well-formed markup
    #[error("Malformed Movie XML: {0}")]
    MalformedMarkup(String),

    /// The root element carries no duration attribute
    #[error("Movie XML root element missing 'duration' attribute")]
    MissingDuration,

    /// The duration attribute is present but not a number
    #[error("Movie XML 'duration' attribute is not numeric: '{value}'")]
    InvalidDuration {
        /// Raw attribute value
        value: String,
    },
}

/// Recoverable errors for a single tts candidate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CueError {
    /// A timing child element is absent
    #[error("Cue {index}: missing <{element}> element")]
    MissingTiming {
        /// Position among the tts candidates
        index: usize,
        /// Name of the missing element
        element: &'static str,
    },

    /// A numeric field could not be parsed
    #[error("Cue {index}: invalid {field} value '{value}'")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        value: String,
    },

    /// A numeric field parsed to NaN or infinity
    #[error("Cue {index}: {field} is not a finite number")]
    NonFiniteNumber {
        index: usize,
        field: &'static str,
    },

    /// Stop frame lies before the start frame
    #[error("Cue {index}: stop {stop} is before start {start}")]
    InvertedRange {
        index: usize,
        start: f64,
        stop: f64,
    },
}

/// Errors raised while validating configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Maximum words per line must be at least 1 (got {0})")]
    InvalidMaxWords(usize),

    #[error("Speaking rate must be a positive number (got {0})")]
    InvalidSpeakingRate(f64),

    #[error("Minimum subtitle duration must be zero or positive (got {0})")]
    InvalidMinDuration(f64),

    #[error("Frame rate must be a positive number (got {0})")]
    InvalidFrameRate(f64),

    #[error("Invalid speaker replacement '{0}', expected 'OldName:NewName'")]
    InvalidReplacement(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document parsing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
