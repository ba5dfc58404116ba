//! Phrase-boundary transition candidates
//!
//! Dance music is built from 8/16/32-beat phrases. Cueing the outgoing
//! track on a phrase boundary and starting the incoming track on one of its
//! first two phrase boundaries keeps the arrangement of both tracks intact.

use super::beat::cue_length;
use super::types::{sort_by_score, TransitionPoint, TransitionType};
use crate::config::SearchConfig;
use crate::features::FeatureVector;

/// Phrase lengths in beats, searched in this order
pub const PHRASE_LENGTHS: [usize; 3] = [8, 16, 32];

/// Fixed score of a phrase-aligned candidate
const PHRASE_SCORE: f64 = 0.8;

pub const MAX_PHRASE_CANDIDATES: usize = 5;

/// Phrase-aligned candidates (at most 5)
pub fn phrase_boundary_points(
    from: &FeatureVector,
    to: &FeatureVector,
    config: &SearchConfig,
) -> Vec<TransitionPoint> {
    let from_beats = config.capped(from.beats());
    let to_beats = config.capped(to.beats());

    let mut points = Vec::new();
    for phrase in PHRASE_LENGTHS {
        // Incoming cues: the first two phrase boundaries only
        let incoming_end = to_beats.len().min(phrase * 2);

        for &from_time in from_beats.iter().step_by(phrase) {
            for &to_time in to_beats[..incoming_end].iter().step_by(phrase) {
                if to_time >= config.incoming_window_secs {
                    continue;
                }
                points.push(TransitionPoint {
                    from_track_time: from_time,
                    to_track_time: to_time,
                    score: PHRASE_SCORE,
                    transition_type: TransitionType::Beatmatch,
                    length: cue_length(from_time),
                    confidence: PHRASE_SCORE,
                });
            }
        }
    }

    let total = points.len();
    sort_by_score(&mut points);
    points.truncate(MAX_PHRASE_CANDIDATES);

    log::debug!(
        "phrase_boundary_points: {} phrase-aligned pairs, {} kept",
        total,
        points.len()
    );
    points
}
