/*!
 * Conversion pipeline from Movie XML to subtitle cues.
 *
 * Stages run strictly in order:
 * - `extractor`: reads tts cues from the document
 * - `merger`: collapses overlapping cues
 * - `splitter`: breaks long cues into readable lines
 * - `timing`: spreads the original span over the split lines
 *
 * Stage functions are pure and return their diagnostics; `SubtitleProcessor` is the only
 * place that turns them into log records.
 */

pub mod extractor;
pub mod merger;
pub mod splitter;
pub mod timing;

use log::{debug, info, warn};

use crate::errors::{ConfigError, CueError, DocumentError};
use crate::subtitle_processor::{SubtitleDocument, FPS};

pub use extractor::{extract_cues, Extraction, ExtractionStatus};
pub use merger::{merge_overlapping, MergeOutcome};
pub use splitter::{split_cue, split_text};
pub use timing::{allocate, TimeSlot};

/// Default maximum words on one subtitle line
pub const DEFAULT_MAX_WORDS_PER_LINE: usize = 10;

/// Default speaking rate in words per second
pub const DEFAULT_WORDS_PER_SECOND: f64 = 2.5;

/// Default minimum duration of a split subtitle in seconds
pub const DEFAULT_MIN_DURATION_SECS: f64 = 0.5;

/// Tunables for splitting and timing
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingSettings {
    pub max_words_per_line: usize,
    pub words_per_second: f64,
    pub min_duration_secs: f64,
    pub fps: f64,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            max_words_per_line: DEFAULT_MAX_WORDS_PER_LINE,
            words_per_second: DEFAULT_WORDS_PER_SECOND,
            min_duration_secs: DEFAULT_MIN_DURATION_SECS,
            fps: FPS,
        }
    }
}

impl ProcessingSettings {
    /// Minimum split duration expressed in frames
    pub fn min_duration_frames(&self) -> f64 {
        self.min_duration_secs * self.fps
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_words_per_line == 0 {
            return Err(ConfigError::InvalidMaxWords(self.max_words_per_line));
        }
        if !(self.words_per_second.is_finite() && self.words_per_second > 0.0) {
            return Err(ConfigError::InvalidSpeakingRate(self.words_per_second));
        }
        if !(self.min_duration_secs.is_finite() && self.min_duration_secs >= 0.0) {
            return Err(ConfigError::InvalidMinDuration(self.min_duration_secs));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::InvalidFrameRate(self.fps));
        }
        Ok(())
    }
}

/// What happened during one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingReport {
    /// tts candidates found in the document
    pub candidates: usize,
    /// Cues that survived extraction
    pub extracted: usize,
    /// Candidates rejected with a reason
    pub skipped: Vec<CueError>,
    /// Candidates dropped for blank text
    pub discarded_empty: usize,
    /// Overlap merges performed
    pub merges: usize,
    /// Merged cues that were split into several lines
    pub split_cues: usize,
    /// Cues in the final document
    pub emitted: usize,
    pub status: ExtractionStatus,
}

/// Final document plus the report describing how it was produced
#[derive(Debug, Clone)]
pub struct ProcessedSubtitles {
    pub document: SubtitleDocument,
    pub report: ProcessingReport,
}

/// Runs the extract, merge, split pipeline with fixed settings
#[derive(Debug, Clone, Default)]
pub struct SubtitleProcessor {
    settings: ProcessingSettings,
}

impl SubtitleProcessor {
    /// Create a processor, rejecting settings that would produce invalid timings
    pub fn new(settings: ProcessingSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ProcessingSettings {
        &self.settings
    }

    /// Convert Movie XML content into split, non-overlapping cues
    pub fn process(&self, content: &str) -> Result<ProcessedSubtitles, DocumentError> {
        let extraction = extract_cues(content)?;
        info!(
            "Movie XML parsed: {} frames, {} tts candidate(s)",
            extraction.document.duration, extraction.candidates
        );

        for skipped in &extraction.skipped {
            warn!("Skipping sound element: {}", skipped);
        }
        if extraction.discarded_empty > 0 {
            debug!("Dropped {} sound element(s) with empty text", extraction.discarded_empty);
        }

        let status = extraction.status();
        if status == ExtractionStatus::Empty {
            warn!("No subtitles found in Movie XML");
        }

        let Extraction { document, skipped, discarded_empty, candidates } = extraction;
        let extracted = document.cues.len();

        let merged = merge_overlapping(document.cues);
        if merged.merges > 0 {
            debug!("Merged {} overlapping cue(s)", merged.merges);
        }

        let mut split_cues = 0;
        let mut cues = Vec::with_capacity(merged.cues.len());
        for cue in &merged.cues {
            let parts = split_cue(cue, &self.settings);
            if parts.len() > 1 {
                debug!("Split cue at frame {} into {} segments", cue.start, parts.len());
                split_cues += 1;
            }
            cues.extend(parts);
        }

        info!("Extracted {} subtitle(s), emitting {}", extracted, cues.len());

        let report = ProcessingReport {
            candidates,
            extracted,
            skipped,
            discarded_empty,
            merges: merged.merges,
            split_cues,
            emitted: cues.len(),
            status,
        };

        Ok(ProcessedSubtitles {
            document: SubtitleDocument::new(document.duration, cues),
            report,
        })
    }
}
