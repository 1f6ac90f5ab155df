/*!
 * Cue extraction from Movie XML documents.
 *
 * Only `<sound tts="1">` elements are read. Each one holds `<start>`/`<stop>` frame
 * values and a `<ttsdata>` block with the spoken `<text>` and the `<voice>` label.
 */

use roxmltree::Node;

use crate::errors::{CueError, DocumentError};
use crate::subtitle_processor::{Cue, SubtitleDocument};

/// Speaker used when a candidate has no voice label
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Whether extraction found anything to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// At least one cue survived, with the count
    Populated(usize),
    /// The document parsed but yielded no cues
    Empty,
}

/// Raw cues plus the diagnostics gathered while reading them
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Cues sorted by start, ties kept in document order
    pub document: SubtitleDocument,
    /// Candidates rejected for malformed timing
    pub skipped: Vec<CueError>,
    /// Candidates dropped because their text was blank
    pub discarded_empty: usize,
    /// Number of tts candidates seen
    pub candidates: usize,
}

impl Extraction {
    pub fn status(&self) -> ExtractionStatus {
        match self.document.cues.len() {
            0 => ExtractionStatus::Empty,
            n => ExtractionStatus::Populated(n),
        }
    }
}

/// Parse Movie XML content into raw, start-ordered cues
pub fn extract_cues(content: &str) -> Result<Extraction, DocumentError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(content, options)
        .map_err(|e| DocumentError::MalformedMarkup(e.to_string()))?;
    let root = xml.root_element();

    let duration_attr = root.attribute("duration").ok_or(DocumentError::MissingDuration)?;
    let duration = parse_frames(duration_attr)
        .filter(|d| d.is_finite())
        .ok_or_else(|| DocumentError::InvalidDuration { value: duration_attr.to_string() })?;

    let mut extraction = Extraction {
        document: SubtitleDocument::new(duration, Vec::new()),
        ..Extraction::default()
    };

    let candidates = root
        .descendants()
        .filter(|n| *n != root && n.has_tag_name("sound") && n.attribute("tts") == Some("1"));

    for (index, sound) in candidates.enumerate() {
        extraction.candidates += 1;
        match read_candidate(index, sound) {
            Ok(Some(cue)) => extraction.document.cues.push(cue),
            Ok(None) => extraction.discarded_empty += 1,
            Err(e) => extraction.skipped.push(e),
        }
    }

    // Vec::sort_by is stable, so equal starts keep document order
    extraction.document.cues.sort_by(|a, b| a.start.total_cmp(&b.start));

    Ok(extraction)
}

// @returns: Cue, or None when the text is blank
fn read_candidate(index: usize, sound: Node) -> Result<Option<Cue>, CueError> {
    let start_elem = child(sound, "start").ok_or(CueError::MissingTiming { index, element: "start" })?;
    let stop_elem = child(sound, "stop").ok_or(CueError::MissingTiming { index, element: "stop" })?;

    let start = read_frame(index, "start", start_elem)?;
    let stop = read_frame(index, "stop", stop_elem)?;

    let text = find_path(sound, &["ttsdata", "text"])
        .and_then(|n| n.text())
        .unwrap_or("")
        .trim();
    if text.is_empty() {
        return Ok(None);
    }

    if stop < start {
        return Err(CueError::InvertedRange { index, start, stop });
    }

    let speaker = find_path(sound, &["ttsdata", "voice"])
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_SPEAKER);

    Ok(Some(Cue::new(start, stop, text, capitalize(speaker))))
}

// An element without text counts as frame 0
fn read_frame(index: usize, field: &'static str, node: Node) -> Result<f64, CueError> {
    let raw = match node.text() {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(0.0),
    };

    let value = parse_frames(raw).ok_or_else(|| CueError::InvalidNumber {
        index,
        field,
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(CueError::NonFiniteNumber { index, field });
    }

    Ok(value)
}

fn parse_frames(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

// First element reached by following `path` through child elements
fn find_path<'a, 'input>(node: Node<'a, 'input>, path: &[&str]) -> Option<Node<'a, 'input>> {
    match path.split_first() {
        None => Some(node),
        Some((head, rest)) => node
            .children()
            .filter(|n| n.has_tag_name(*head))
            .find_map(|n| find_path(n, rest)),
    }
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
