//! Structural-segment transition candidates
//!
//! Matches labelled sections of the outgoing track against sections near
//! the start of the incoming track using a fixed table of DJ-preferred
//! section pairings (e.g. chorus into intro).

use super::types::{sort_by_score, TransitionPoint, TransitionType};
use crate::config::SearchConfig;
use crate::features::{FeatureVector, SegmentType};

/// Preferred (outgoing section, incoming section) pairings and their weight
pub static SEGMENT_PREFERENCES: [(SegmentType, SegmentType, f64); 5] = [
    (SegmentType::Chorus, SegmentType::Intro, 1.0),
    (SegmentType::Outro, SegmentType::Intro, 0.9),
    (SegmentType::Verse, SegmentType::Verse, 0.8),
    (SegmentType::Chorus, SegmentType::Verse, 0.7),
    (SegmentType::Bridge, SegmentType::Intro, 0.8),
];

/// Lead-in before the end of the outgoing section (seconds)
const SECTION_LEAD_IN: f64 = 8.0;

/// Fixed length of a section-based transition (seconds)
const SECTION_TRANSITION_LENGTH: f64 = 16.0;

pub const MAX_SEGMENT_CANDIDATES: usize = 3;

/// Preference weight for a section pairing, `None` if not a preferred pair
pub fn segment_preference(from: SegmentType, to: SegmentType) -> Option<f64> {
    SEGMENT_PREFERENCES
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, weight)| *weight)
}

/// Technique suited to a section pairing
fn segment_transition_type(from: SegmentType, to: SegmentType) -> TransitionType {
    match (from, to) {
        (SegmentType::Outro, SegmentType::Intro) => TransitionType::EchoOut,
        (SegmentType::Chorus, SegmentType::Intro) => TransitionType::FilterFade,
        _ => TransitionType::Beatmatch,
    }
}

/// Section-matched candidates, best first (at most 3)
pub fn structural_points(
    from: &FeatureVector,
    to: &FeatureVector,
    config: &SearchConfig,
) -> Vec<TransitionPoint> {
    let incoming: Vec<_> = to
        .segments()
        .iter()
        .filter(|seg| seg.start < config.segment_window_secs)
        .collect();

    let mut points = Vec::new();
    for from_seg in from.segments() {
        for to_seg in &incoming {
            let Some(weight) = segment_preference(from_seg.kind, to_seg.kind) else {
                continue;
            };
            let confidence = from_seg.confidence * to_seg.confidence;
            points.push(TransitionPoint {
                // Clamped so short opening sections never cue before 0:00
                from_track_time: (from_seg.end - SECTION_LEAD_IN).max(0.0),
                to_track_time: to_seg.start,
                score: weight * confidence,
                transition_type: segment_transition_type(from_seg.kind, to_seg.kind),
                length: SECTION_TRANSITION_LENGTH,
                confidence,
            });
        }
    }

    sort_by_score(&mut points);
    points.truncate(MAX_SEGMENT_CANDIDATES);

    log::debug!("structural_points: {} candidates kept", points.len());
    points
}
