/*!
 * Tests for error types and conversions
 */

use gosubtitle::errors::{AppError, ConfigError, CueError, DocumentError};

#[test]
fn test_documentError_missingDuration_shouldNameAttribute() {
    let display = format!("{}", DocumentError::MissingDuration);
    assert!(display.contains("'duration'"));
}

#[test]
fn test_documentError_invalidDuration_shouldShowValue() {
    let error = DocumentError::InvalidDuration { value: "abc".to_string() };
    let display = format!("{}", error);
    assert!(display.contains("not numeric"));
    assert!(display.contains("abc"));
}

#[test]
fn test_documentError_malformedMarkup_shouldKeepParserDetail() {
    let error = DocumentError::MalformedMarkup("unexpected end of stream".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Malformed Movie XML"));
    assert!(display.contains("unexpected end of stream"));
}

#[test]
fn test_cueError_variants_shouldIdentifyCue() {
    let missing = CueError::MissingTiming { index: 3, element: "stop" };
    assert_eq!(format!("{}", missing), "Cue 3: missing <stop> element");

    let invalid = CueError::InvalidNumber { index: 1, field: "start", value: "x1".to_string() };
    assert_eq!(format!("{}", invalid), "Cue 1: invalid start value 'x1'");

    let non_finite = CueError::NonFiniteNumber { index: 2, field: "stop" };
    assert_eq!(format!("{}", non_finite), "Cue 2: stop is not a finite number");

    let inverted = CueError::InvertedRange { index: 0, start: 20.0, stop: 10.0 };
    assert!(format!("{}", inverted).contains("stop 10 is before start 20"));
}

#[test]
fn test_appError_fromDocumentError_shouldWrapCorrectly() {
    let app_error: AppError = DocumentError::MissingDuration.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Document error"));
}

#[test]
fn test_appError_fromConfigError_shouldWrapCorrectly() {
    let app_error: AppError = ConfigError::InvalidMaxWords(0).into();
    let display = format!("{}", app_error);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("at least 1"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let anyhow_error = anyhow::anyhow!("Something went wrong");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("Something went wrong"));
}
