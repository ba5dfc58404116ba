//! Transition analysis between two tracks
//!
//! Combines beat-alignment, energy and key scores with the ranked candidate
//! points, then picks a technique, a length and an overall confidence.
//!
//! # Technique selection (first match wins)
//! 1. Mean of the three scores above 0.8 → beatmatch
//! 2. Energy match below 0.3 → echo out
//! 3. Key compatibility below 0.4 → filter fade
//! 4. Otherwise → beatmatch

use rayon::prelude::*;

use super::beat::bpm_score;
use super::search::TransitionPointSearch;
use super::types::{TransitionAnalysis, TransitionType};
use crate::compatibility::energy_score;
use crate::config::SearchConfig;
use crate::features::FeatureVector;
use crate::music::key_compatibility;

const BEATMATCH_THRESHOLD: f64 = 0.8;
const ENERGY_CLASH_THRESHOLD: f64 = 0.3;
const KEY_CLASH_THRESHOLD: f64 = 0.4;

/// Base transition length in beats of the outgoing track
const BASE_TRANSITION_BEATS: f64 = 16.0;

/// Stateless transition analyzer
#[derive(Debug, Clone, Default)]
pub struct TransitionAnalyzer {
    search: TransitionPointSearch,
}

impl TransitionAnalyzer {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            search: TransitionPointSearch::new(config),
        }
    }

    /// Analyze a mix from `from` into `to`
    pub fn analyze(&self, from: &FeatureVector, to: &FeatureVector) -> TransitionAnalysis {
        let beat_alignment_score = bpm_score(from.tempo_bpm(), to.tempo_bpm());
        let energy_match_score = energy_score(from.energy(), to.energy());
        let key_compatibility_score = key_compatibility(&from.key(), &to.key());

        let mut optimal_points = self.search.search(from, to);
        optimal_points.truncate(self.search.config().max_points);

        let transition_type = choose_transition_type(
            beat_alignment_score,
            energy_match_score,
            key_compatibility_score,
        );

        let analysis = TransitionAnalysis {
            optimal_points,
            beat_alignment_score,
            energy_match_score,
            key_compatibility_score,
            recommended_length: recommended_length(
                from.tempo_bpm(),
                beat_alignment_score,
                energy_match_score,
            ),
            transition_type,
            confidence: 0.4 * beat_alignment_score
                + 0.3 * energy_match_score
                + 0.3 * key_compatibility_score,
        };

        log::debug!(
            "analyze: {} -> {}: {} ({} points, confidence {:.2})",
            from.key(),
            to.key(),
            analysis.transition_type,
            analysis.optimal_points.len(),
            analysis.confidence
        );
        analysis
    }

    /// Analyze every adjacent pair of a playlist in parallel
    ///
    /// Returns `tracks.len() - 1` analyses in playlist order (none for fewer
    /// than two tracks).
    pub fn analyze_playlist<T>(&self, tracks: &[T]) -> Vec<TransitionAnalysis>
    where
        T: AsRef<FeatureVector> + Sync,
    {
        tracks
            .par_windows(2)
            .map(|pair| self.analyze(pair[0].as_ref(), pair[1].as_ref()))
            .collect()
    }
}

/// Technique for the given component scores
pub fn choose_transition_type(
    beat_alignment: f64,
    energy_match: f64,
    key_compatibility: f64,
) -> TransitionType {
    let triad = (beat_alignment + energy_match + key_compatibility) / 3.0;
    if triad > BEATMATCH_THRESHOLD {
        TransitionType::Beatmatch
    } else if energy_match < ENERGY_CLASH_THRESHOLD {
        TransitionType::EchoOut
    } else if key_compatibility < KEY_CLASH_THRESHOLD {
        TransitionType::FilterFade
    } else {
        TransitionType::Beatmatch
    }
}

/// Transition length in whole seconds
///
/// 16 beats at the outgoing tempo, scaled from 0.5x to 1.5x by the mean of
/// beat alignment and energy match. Never below one second.
pub fn recommended_length(bpm_from: f64, beat_alignment: f64, energy_match: f64) -> f64 {
    let base = 60.0 / bpm_from * BASE_TRANSITION_BEATS;
    let scale = 0.5 + (beat_alignment + energy_match) / 2.0;
    (base * scale).round().max(1.0)
}
