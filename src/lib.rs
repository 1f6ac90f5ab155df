/*!
 * # GoSubtitle - Movie XML to SRT converter
 *
 * A Rust library for turning Movie XML timed-text exports (frame based cues tagged for
 * text-to-speech) into SRT subtitles.
 *
 * ## Features
 *
 * - Extract tts cues from Movie XML, skipping malformed ones with a diagnostic
 * - Merge temporally overlapping cues, combining speakers as "A/B"
 * - Split long cues along sentence and word boundaries
 * - Re-time split cues from an estimated speaking rate
 * - Offset all cues and rename speakers after conversion
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `pipeline`: The conversion stages:
 *   - `pipeline::extractor`: Movie XML reading
 *   - `pipeline::merger`: Overlap merging
 *   - `pipeline::splitter`: Line segmentation
 *   - `pipeline::timing`: Timing allocation
 * - `subtitle_processor`: Cue model, timestamps and post-processing
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod pipeline;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ConfigError, CueError, DocumentError};
pub use pipeline::{ProcessedSubtitles, ProcessingReport, ProcessingSettings, SubtitleProcessor};
pub use subtitle_processor::{Cue, SubtitleDocument, format_time};
