//! Combined transition-point search
//!
//! Runs the beat, phrase and structural generators in that order, drops
//! near-duplicate candidates (the first one seen wins) and ranks the rest.

use super::beat::beat_alignment_points;
use super::phrase::phrase_boundary_points;
use super::structure::structural_points;
use super::types::{sort_by_score, TransitionPoint};
use crate::config::SearchConfig;
use crate::features::FeatureVector;

/// Transition-point search over a pair of tracks
#[derive(Debug, Clone, Default)]
pub struct TransitionPointSearch {
    config: SearchConfig,
}

impl TransitionPointSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// All unique candidates, highest score first
    ///
    /// Not truncated; the analyzer keeps the top `max_points`.
    pub fn search(&self, from: &FeatureVector, to: &FeatureVector) -> Vec<TransitionPoint> {
        let mut candidates = beat_alignment_points(from, to, &self.config);
        candidates.extend(phrase_boundary_points(from, to, &self.config));
        candidates.extend(structural_points(from, to, &self.config));

        let mut unique = dedup_points(candidates, self.config.dedup_tolerance_secs);
        sort_by_score(&mut unique);
        unique
    }
}

/// Drop candidates within `tolerance` of an earlier one on both cue times
pub fn dedup_points(candidates: Vec<TransitionPoint>, tolerance: f64) -> Vec<TransitionPoint> {
    let total = candidates.len();
    let mut unique: Vec<TransitionPoint> = Vec::with_capacity(total);
    for point in candidates {
        if !unique.iter().any(|kept| kept.is_near(&point, tolerance)) {
            unique.push(point);
        }
    }
    log::debug!("dedup_points: {} candidates, {} unique", total, unique.len());
    unique
}
