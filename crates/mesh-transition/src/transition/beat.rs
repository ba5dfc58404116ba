//! Beat-alignment transition candidates
//!
//! Pairs strong beats (every 4th detected beat) of the outgoing track with
//! strong beats near the start of the incoming track, scoring each pair by
//! tempo ratio and phase agreement.

use std::f64::consts::PI;

use super::types::{sort_by_score, TransitionPoint, TransitionType};
use crate::config::SearchConfig;
use crate::features::FeatureVector;

/// Beats per bar; every bar's first beat is a strong beat
const BEATS_PER_BAR: usize = 4;

/// Pairs at or below this strength are discarded
const MIN_STRENGTH: f64 = 0.6;

/// Candidates kept from this generator
pub const MAX_BEAT_CANDIDATES: usize = 10;

/// BPM difference at which beat alignment bottoms out
const BPM_TOLERANCE: f64 = 20.0;

/// Beat-alignment score: 1.0 at equal tempo, 0.0 at 20+ BPM apart
pub fn bpm_score(bpm_from: f64, bpm_to: f64) -> f64 {
    (1.0 - (bpm_from - bpm_to).abs() / BPM_TOLERANCE).max(0.0)
}

/// Transition length for a cue at `from_time`: 8 s, growing to 12 s late in the track
pub fn cue_length(from_time: f64) -> f64 {
    (8.0 + (from_time / 30.0).min(4.0)).round()
}

/// Every 4th beat, starting with the first
fn strong_beats(beats: &[f64]) -> impl Iterator<Item = f64> + '_ {
    beats.iter().step_by(BEATS_PER_BAR).copied()
}

/// Beat-aligned candidates, strongest first (at most 10)
pub fn beat_alignment_points(
    from: &FeatureVector,
    to: &FeatureVector,
    config: &SearchConfig,
) -> Vec<TransitionPoint> {
    let bpm_from = from.tempo_bpm();
    let bpm_to = to.tempo_bpm();
    let bpm_ratio = bpm_from.min(bpm_to) / bpm_from.max(bpm_to);

    let incoming: Vec<f64> = strong_beats(config.capped(to.beats()))
        .filter(|&t| t < config.incoming_window_secs)
        .collect();

    let mut points: Vec<TransitionPoint> = strong_beats(config.capped(from.beats()))
        .flat_map(|f| incoming.iter().map(move |&t| (f, t)))
        .filter_map(|(f, t)| {
            let phase = (2.0 * PI * (f - t) / BEATS_PER_BAR as f64).cos();
            let strength = bpm_ratio * phase.abs();
            (strength > MIN_STRENGTH).then(|| TransitionPoint {
                from_track_time: f,
                to_track_time: t,
                score: strength,
                transition_type: TransitionType::Beatmatch,
                length: cue_length(f),
                confidence: strength,
            })
        })
        .collect();

    sort_by_score(&mut points);
    points.truncate(MAX_BEAT_CANDIDATES);

    log::debug!(
        "beat_alignment_points: {} incoming strong beats, {} candidates kept",
        incoming.len(),
        points.len()
    );
    points
}
