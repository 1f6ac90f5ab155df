use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;
use log::debug;

use crate::errors::ConfigError;

// @module: Cue model, timestamp rendering and post-processing

/// Native frame rate of Movie XML exports
pub const FPS: f64 = 24.0;

// @struct: Single timed speech unit
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Start frame
    pub start: f64,

    // @field: Stop frame
    pub stop: f64,

    // @field: Trimmed subtitle text, may hold line breaks after merging
    pub text: String,

    // @field: Display name of the speaker
    pub speaker: String,
}

impl Cue {
    /// Creates a new cue
    pub fn new(start: f64, stop: f64, text: impl Into<String>, speaker: impl Into<String>) -> Self {
        Cue {
            start,
            stop,
            text: text.into(),
            speaker: speaker.into(),
        }
    }

    /// Length of the cue in frames
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }

    /// Render this cue as one SRT block with the given 1-based index
    pub fn to_srt_block(&self, index: usize, fps: f64) -> String {
        format!(
            "{}\n{} --> {}\n{}: {}\n\n",
            index,
            format_time(self.start, fps),
            format_time(self.stop, fps),
            self.speaker,
            self.text
        )
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{} - {}] {}: {}", self.start, self.stop, self.speaker, self.text)
    }
}

/// Ordered cues plus the declared total duration of the source document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubtitleDocument {
    /// Total duration in frames, from the root element
    pub duration: f64,

    /// Cues in non-decreasing start order
    pub cues: Vec<Cue>,
}

impl SubtitleDocument {
    /// Create a document from already ordered cues
    pub fn new(duration: f64, cues: Vec<Cue>) -> Self {
        SubtitleDocument { duration, cues }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Shift every cue by `delta` frames
    pub fn apply_offset(&mut self, delta: f64) {
        apply_offset(&mut self.cues, delta);
    }

    /// Rename speakers according to `replacements`
    pub fn replace_speakers(&mut self, replacements: &BTreeMap<String, String>) -> ReplacementReport {
        replace_speakers(&mut self.cues, replacements)
    }

    /// Change the speaker of one cue; false when `index` is out of range
    pub fn set_speaker(&mut self, index: usize, speaker: impl Into<String>) -> bool {
        match self.cues.get_mut(index) {
            Some(cue) => {
                let speaker = speaker.into();
                debug!("Changed speaker at index {} from '{}' to '{}'", index, cue.speaker, speaker);
                cue.speaker = speaker;
                true
            }
            None => false,
        }
    }

    /// Change the text of one cue; false when `index` is out of range
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.cues.get_mut(index) {
            Some(cue) => {
                cue.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Sorted, deduplicated speaker names, combined speakers included
    pub fn unique_speakers(&self) -> Vec<String> {
        let mut speakers: Vec<String> = self.cues.iter().map(|cue| cue.speaker.clone()).collect();
        speakers.sort();
        speakers.dedup();
        speakers
    }

    /// Summary counts for reporting
    pub fn statistics(&self) -> SubtitleStats {
        let mut speaker_counts = BTreeMap::new();
        let mut total_duration = 0.0;

        for cue in &self.cues {
            *speaker_counts.entry(cue.speaker.clone()).or_insert(0) += 1;
            total_duration += cue.duration();
        }

        SubtitleStats {
            cue_count: self.cues.len(),
            total_duration,
            speaker_counts,
        }
    }

    /// Render the whole document in SRT format
    pub fn to_srt_string(&self, fps: f64) -> String {
        let mut out = String::new();
        for (i, cue) in self.cues.iter().enumerate() {
            out.push_str(&cue.to_srt_block(i + 1, fps));
        }
        out
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Document")?;
        writeln!(f, "Duration: {} frames", self.duration)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}

/// Format a frame count as an SRT timestamp (HH:MM:SS,mmm)
///
/// Milliseconds are truncated, hours are unbounded. Negative positions clamp to zero
/// since SRT has no representation for them.
pub fn format_time(frames: f64, fps: f64) -> String {
    let seconds = (frames / fps).max(0.0);
    let whole = seconds.trunc() as u64;

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    let millis = ((seconds.fract() * 1000.0) as u64).min(999);

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Human readable duration such as "1h 23m 45s"
pub fn format_duration(frames: f64, fps: f64) -> String {
    let whole = (frames / fps).max(0.0).trunc() as u64;
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    parts.push(format!("{}s", secs));

    parts.join(" ")
}

/// Add `delta` frames to the start and stop of every cue
pub fn apply_offset(cues: &mut [Cue], delta: f64) {
    for cue in cues.iter_mut() {
        cue.start += delta;
        cue.stop += delta;
    }
}

/// Remembers the cumulative offset so a new total only shifts by the difference
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OffsetTracker {
    current: f64,
}

impl OffsetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative offset applied so far
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Move the cues to `total` frames of offset, returns the delta applied
    pub fn set(&mut self, cues: &mut [Cue], total: f64) -> f64 {
        let delta = total - self.current;
        apply_offset(cues, delta);
        self.current = total;
        delta
    }

    /// Forget the applied offset, used when a fresh document is loaded
    pub fn reset(&mut self) {
        self.current = 0.0;
    }
}

/// One renamed speaker and how many cues it touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub new_name: String,
    pub count: usize,
}

/// Replacement counts keyed by the old speaker name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementReport {
    pub replacements: BTreeMap<String, Replacement>,
}

impl ReplacementReport {
    /// Total number of cues renamed
    pub fn total(&self) -> usize {
        self.replacements.values().map(|r| r.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn count_for(&self, old_name: &str) -> usize {
        self.replacements.get(old_name).map_or(0, |r| r.count)
    }
}

/// Replace the speaker of every cue whose speaker exactly matches a key
pub fn replace_speakers(cues: &mut [Cue], replacements: &BTreeMap<String, String>) -> ReplacementReport {
    let mut report = ReplacementReport::default();

    for cue in cues.iter_mut() {
        if let Some(new_name) = replacements.get(&cue.speaker) {
            let old_name = std::mem::replace(&mut cue.speaker, new_name.clone());
            report
                .replacements
                .entry(old_name)
                .or_insert_with(|| Replacement { new_name: new_name.clone(), count: 0 })
                .count += 1;
        }
    }

    report
}

/// Parse an "OldName:NewName" pair, split on the first colon
pub fn parse_replacement(pair: &str) -> Result<(String, String), ConfigError> {
    let (old_name, new_name) = pair
        .split_once(':')
        .ok_or_else(|| ConfigError::InvalidReplacement(pair.to_string()))?;

    let old_name = old_name.trim();
    let new_name = new_name.trim();
    if old_name.is_empty() || new_name.is_empty() {
        return Err(ConfigError::InvalidReplacement(pair.to_string()));
    }

    Ok((old_name.to_string(), new_name.to_string()))
}

/// Summary of a cue list
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleStats {
    pub cue_count: usize,
    /// Sum of cue durations in frames
    pub total_duration: f64,
    pub speaker_counts: BTreeMap<String, usize>,
}

impl SubtitleStats {
    /// Multi-line report in the style of the console output
    pub fn render(&self, fps: f64) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Subtitle Statistics ===");
        let _ = writeln!(out, "Total subtitles: {}", self.cue_count);
        let _ = writeln!(out, "Total duration: {}", format_time(self.total_duration, fps));
        let _ = writeln!(out, "Unique speakers: {}", self.speaker_counts.len());
        let _ = writeln!(out, "Speaker breakdown:");
        for (speaker, count) in &self.speaker_counts {
            let _ = writeln!(out, "  {}: {} subtitle(s)", speaker, count);
        }
        let _ = writeln!(out, "===========================");
        out
    }
}
