/*!
 * Timing allocation for split cues.
 *
 * Each segment gets time in proportion to its estimated speech duration, floored at a
 * minimum. The slots are contiguous and always cover the original span exactly.
 */

/// Sub-interval assigned to one segment, in frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlot {
    pub start: f64,
    pub stop: f64,
}

impl TimeSlot {
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }
}

/// Distribute `[start, stop]` over segments with the given word counts.
///
/// The second rescale after the minimum clamp can leave some slots shorter than
/// `min_duration_frames` when the span is too tight to honour it.
pub fn allocate(
    start: f64,
    stop: f64,
    word_counts: &[usize],
    words_per_second: f64,
    min_duration_frames: f64,
) -> Vec<TimeSlot> {
    if word_counts.is_empty() {
        return Vec::new();
    }

    let span = stop - start;
    let ideal: Vec<f64> = word_counts
        .iter()
        .map(|&count| count as f64 / words_per_second)
        .collect();
    let ideal_total: f64 = ideal.iter().sum();

    // a non-positive rate gives no usable estimate, fall back to equal shares
    let mut durations: Vec<f64> = if ideal_total.is_finite() && ideal_total > 0.0 {
        let scale = span / ideal_total;
        ideal.iter().map(|d| d * scale).collect()
    } else {
        vec![span / word_counts.len() as f64; word_counts.len()]
    };

    for duration in durations.iter_mut() {
        if *duration < min_duration_frames {
            *duration = min_duration_frames;
        }
    }

    let clamped_total: f64 = durations.iter().sum();
    if clamped_total > span {
        let scale = span / clamped_total;
        for duration in durations.iter_mut() {
            *duration *= scale;
        }
    }

    let mut slots = Vec::with_capacity(durations.len());
    let mut cursor = start;
    for duration in durations {
        slots.push(TimeSlot { start: cursor, stop: cursor + duration });
        cursor += duration;
    }

    // absorb floating point drift
    if let Some(last) = slots.last_mut() {
        last.stop = stop;
    }

    slots
}
