/*!
 * Overlap merging for start-ordered cues.
 */

use crate::subtitle_processor::Cue;

/// Merged cues and how many merges happened
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub cues: Vec<Cue>,
    /// Number of incoming cues folded into a previous one
    pub merges: usize,
}

/// Collapse temporally overlapping cues in a single left-to-right scan.
///
/// A cue overlaps when its start is strictly before the open cue's stop. The open cue
/// keeps its start, takes the later stop, joins the texts with a line break and the
/// speakers as "A/B" when they differ.
pub fn merge_overlapping(cues: Vec<Cue>) -> MergeOutcome {
    let mut merged: Vec<Cue> = Vec::with_capacity(cues.len());
    let mut merges = 0;

    for cue in cues {
        match merged.last_mut() {
            Some(open) if cue.start < open.stop => {
                if cue.speaker != open.speaker {
                    open.speaker = format!("{}/{}", open.speaker, cue.speaker);
                }
                open.text.push('\n');
                open.text.push_str(&cue.text);
                open.stop = open.stop.max(cue.stop);
                merges += 1;
            }
            _ => merged.push(cue),
        }
    }

    MergeOutcome { cues: merged, merges }
}
