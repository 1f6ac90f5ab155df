/*!
 * Segment splitting for long cues.
 *
 * Line breaks in the cue text are hard boundaries. Inside a paragraph, words are
 * accumulated until the word cap is reached or the segment ends a sentence.
 */

use crate::pipeline::timing;
use crate::pipeline::ProcessingSettings;
use crate::subtitle_processor::Cue;

/// Characters that close a sentence-like fragment
const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', ':'];

/// Break `text` into segments of at most `max_words` words.
///
/// A single word is never divided, so a one-word segment may still be long in
/// characters.
pub fn split_text(text: &str, max_words: usize) -> Vec<String> {
    let mut segments = Vec::new();

    for paragraph in text.split('\n') {
        let mut current: Vec<&str> = Vec::new();

        for word in paragraph.split_whitespace() {
            if let Some(last) = current.last() {
                let ends_sentence = last.ends_with(SENTENCE_TERMINATORS);
                if ends_sentence || current.len() >= max_words {
                    segments.push(current.join(" "));
                    current.clear();
                }
            }
            current.push(word);
        }

        if !current.is_empty() {
            segments.push(current.join(" "));
        }
    }

    segments
}

/// Split one cue into timed sub-cues.
///
/// Returns the cue unchanged when its text yields a single segment.
pub fn split_cue(cue: &Cue, settings: &ProcessingSettings) -> Vec<Cue> {
    let segments = split_text(&cue.text, settings.max_words_per_line);
    if segments.len() <= 1 {
        return vec![cue.clone()];
    }

    let word_counts: Vec<usize> = segments
        .iter()
        .map(|segment| segment.split_whitespace().count())
        .collect();

    let slots = timing::allocate(
        cue.start,
        cue.stop,
        &word_counts,
        settings.words_per_second,
        settings.min_duration_frames(),
    );

    segments
        .into_iter()
        .zip(slots)
        .map(|(text, slot)| Cue::new(slot.start, slot.stop, text, cue.speaker.clone()))
        .collect()
}
