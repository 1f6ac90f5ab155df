/*!
 * Tests for the cue model, timestamp formatting and post-processing
 */

use std::collections::BTreeMap;
use gosubtitle::subtitle_processor::{
    apply_offset, format_duration, format_time, parse_replacement, replace_speakers, Cue,
    OffsetTracker, SubtitleDocument, FPS,
};
use gosubtitle::errors::ConfigError;

fn sample_cues() -> Vec<Cue> {
    vec![
        Cue::new(0.0, 48.0, "Hello", "Alice"),
        Cue::new(60.0, 90.5, "Hi there", "Bob"),
        Cue::new(100.0, 130.0, "Bye", "Alice"),
    ]
}

/// Test timestamp formatting at whole seconds
#[test]
fn test_format_time_withWholeSeconds_shouldPadAllFields() {
    assert_eq!(format_time(0.0, FPS), "00:00:00,000");
    assert_eq!(format_time(24.0, FPS), "00:00:01,000");
    assert_eq!(format_time(24.0 * 90.0, FPS), "00:01:30,000");
}

/// Test that milliseconds are truncated rather than rounded
#[test]
fn test_format_time_withFractionalFrames_shouldTruncateMillis() {
    // 1 frame = 41.666.. ms
    assert_eq!(format_time(1.0, FPS), "00:00:00,041");
    assert_eq!(format_time(36.0, FPS), "00:00:01,500");
    assert_eq!(format_time(90.5, FPS), "00:00:03,770");
}

/// Test that hours have no upper bound
#[test]
fn test_format_time_withLongDuration_shouldNotRollOver() {
    let frames = (25.0 * 3600.0 + 61.0) * FPS;
    assert_eq!(format_time(frames, FPS), "25:01:01,000");
}

/// Test that negative positions render as zero
#[test]
fn test_format_time_withNegativeFrames_shouldClampToZero() {
    assert_eq!(format_time(-48.0, FPS), "00:00:00,000");
}

/// Test human readable durations
#[test]
fn test_format_duration_withVariousLengths_shouldOmitZeroUnits() {
    assert_eq!(format_duration(0.0, FPS), "0s");
    assert_eq!(format_duration(24.0 * 90.0, FPS), "1m 30s");
    assert_eq!(format_duration(24.0 * 3600.0, FPS), "1h 0s");
    assert_eq!(format_duration(24.0 * 5025.0, FPS), "1h 23m 45s");
}

/// Test SRT block rendering
#[test]
fn test_cue_to_srt_block_withSpeaker_shouldPrefixText() {
    let cue = Cue::new(24.0, 54.0, "Good morning.", "John/Mary");

    let block = cue.to_srt_block(1, FPS);

    assert_eq!(block, "1\n00:00:01,000 --> 00:00:02,250\nJohn/Mary: Good morning.\n\n");
}

/// Test full document rendering numbers blocks from 1
#[test]
fn test_document_to_srt_string_withThreeCues_shouldNumberSequentially() {
    let document = SubtitleDocument::new(200.0, sample_cues());

    let srt = document.to_srt_string(FPS);

    let index_lines: Vec<&str> = srt.split("\n\n").filter(|b| !b.is_empty()).map(|b| b.lines().next().unwrap()).collect();
    assert_eq!(index_lines, vec!["1", "2", "3"]);
    assert!(srt.contains("Bob: Hi there\n"));
    assert!(srt.ends_with("Alice: Bye\n\n"));
}

/// Test that an offset and its negation restore the original timings
#[test]
fn test_apply_offset_withRoundTrip_shouldRestoreTimings() {
    let original = sample_cues();
    let mut cues = original.clone();

    apply_offset(&mut cues, 37.5);
    assert_eq!(cues[0].start, 37.5);
    assert_eq!(cues[1].stop, 128.0);

    apply_offset(&mut cues, -37.5);
    assert_eq!(cues, original);
}

/// Test offset tracking applies only the difference
#[test]
fn test_offset_tracker_withSuccessiveTotals_shouldApplyDeltas() {
    let mut cues = sample_cues();
    let mut tracker = OffsetTracker::new();

    assert_eq!(tracker.set(&mut cues, 24.0), 24.0);
    assert_eq!(tracker.set(&mut cues, 10.0), -14.0);
    assert_eq!(tracker.current(), 10.0);
    assert_eq!(cues[0].start, 10.0);
    assert_eq!(cues[2].stop, 140.0);

    tracker.set(&mut cues, 0.0);
    assert_eq!(cues, sample_cues());

    tracker.reset();
    assert_eq!(tracker.current(), 0.0);
}

/// Test speaker replacement counts per name
#[test]
fn test_replace_speakers_withMatchingNames_shouldCountReplacements() {
    let mut cues = sample_cues();
    let mut map = BTreeMap::new();
    map.insert("Alice".to_string(), "Alicia".to_string());
    map.insert("Carol".to_string(), "Caroline".to_string());

    let report = replace_speakers(&mut cues, &map);

    assert_eq!(report.count_for("Alice"), 2);
    assert_eq!(report.count_for("Carol"), 0);
    assert_eq!(report.total(), 2);
    assert_eq!(report.replacements["Alice"].new_name, "Alicia");
    assert_eq!(cues[0].speaker, "Alicia");
    assert_eq!(cues[1].speaker, "Bob");
}

/// Test that a mapping with no matching speaker changes nothing
#[test]
fn test_replace_speakers_withNoMatch_shouldLeaveCuesUntouched() {
    let mut cues = sample_cues();
    let mut map = BTreeMap::new();
    map.insert("John".to_string(), "Jane".to_string());

    let report = replace_speakers(&mut cues, &map);

    assert!(report.is_empty());
    assert_eq!(report.total(), 0);
    assert_eq!(cues, sample_cues());
}

/// Test that combined speakers only match exactly
#[test]
fn test_replace_speakers_withCombinedSpeaker_shouldRequireExactMatch() {
    let mut document = SubtitleDocument::new(100.0, vec![Cue::new(0.0, 10.0, "x", "Alice/Bob")]);
    let mut map = BTreeMap::new();
    map.insert("Alice".to_string(), "Alicia".to_string());

    assert_eq!(document.replace_speakers(&map).total(), 0);

    map.insert("Alice/Bob".to_string(), "Both".to_string());
    assert_eq!(document.replace_speakers(&map).total(), 1);
    assert_eq!(document.cues[0].speaker, "Both");
}

/// Test replacement pair parsing
#[test]
fn test_parse_replacement_withVariousInputs_shouldValidate() {
    assert_eq!(parse_replacement("John:Jane").unwrap(), ("John".to_string(), "Jane".to_string()));
    assert_eq!(parse_replacement(" A : B:C ").unwrap(), ("A".to_string(), "B:C".to_string()));
    assert_eq!(
        parse_replacement("NoColon"),
        Err(ConfigError::InvalidReplacement("NoColon".to_string()))
    );
    assert!(parse_replacement(":Jane").is_err());
    assert!(parse_replacement("John: ").is_err());
}

/// Test single cue edits
#[test]
fn test_document_edits_withIndexes_shouldRejectOutOfRange() {
    let mut document = SubtitleDocument::new(200.0, sample_cues());

    assert!(document.set_speaker(1, "Robert"));
    assert!(document.set_text(2, "Goodbye"));
    assert!(!document.set_speaker(3, "Nobody"));
    assert!(!document.set_text(10, "Nothing"));

    assert_eq!(document.cues[1].speaker, "Robert");
    assert_eq!(document.cues[2].text, "Goodbye");
}

/// Test unique speakers and statistics
#[test]
fn test_document_statistics_withSampleCues_shouldSummarize() {
    let document = SubtitleDocument::new(200.0, sample_cues());

    assert_eq!(document.unique_speakers(), vec!["Alice".to_string(), "Bob".to_string()]);

    let stats = document.statistics();
    assert_eq!(stats.cue_count, 3);
    assert_eq!(stats.total_duration, 48.0 + 30.5 + 30.0);
    assert_eq!(stats.speaker_counts["Alice"], 2);
    assert_eq!(stats.speaker_counts["Bob"], 1);

    let rendered = stats.render(FPS);
    assert!(rendered.contains("Total subtitles: 3"));
    assert!(rendered.contains("Unique speakers: 2"));
    assert!(rendered.contains("  Alice: 2 subtitle(s)"));
}
