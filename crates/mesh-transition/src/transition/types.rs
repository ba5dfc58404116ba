//! Transition point and analysis result types

use serde::{Deserialize, Serialize};

/// Mixing technique for a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    /// Tempo-matched blend with both tracks playing
    Beatmatch,
    /// Echo/delay tail on the outgoing track, incoming dropped in
    EchoOut,
    /// Filter sweep on the outgoing track while fading in
    FilterFade,
    /// Hard switch on a phrase boundary
    QuickCut,
}

impl TransitionType {
    pub fn name(&self) -> &'static str {
        match self {
            TransitionType::Beatmatch => "beatmatch",
            TransitionType::EchoOut => "echo_out",
            TransitionType::FilterFade => "filter_fade",
            TransitionType::QuickCut => "quick_cut",
        }
    }
}

impl std::fmt::Display for TransitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate moment to mix from one track into the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionPoint {
    /// Cue time in the outgoing track (seconds)
    pub from_track_time: f64,
    /// Cue time in the incoming track (seconds)
    pub to_track_time: f64,
    /// Ranking score (0.0-1.0)
    pub score: f64,
    #[serde(rename = "type")]
    pub transition_type: TransitionType,
    /// Transition length in seconds
    pub length: f64,
    pub confidence: f64,
}

impl TransitionPoint {
    /// Whether both cue times lie strictly within `tolerance` of `other`'s
    pub fn is_near(&self, other: &TransitionPoint, tolerance: f64) -> bool {
        (self.from_track_time - other.from_track_time).abs() < tolerance
            && (self.to_track_time - other.to_track_time).abs() < tolerance
    }
}

/// Complete analysis of a transition between two tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionAnalysis {
    /// Best candidate points, highest score first (at most 5 by default)
    pub optimal_points: Vec<TransitionPoint>,
    pub beat_alignment_score: f64,
    pub energy_match_score: f64,
    pub key_compatibility_score: f64,
    /// Suggested transition length in whole seconds
    pub recommended_length: f64,
    pub transition_type: TransitionType,
    pub confidence: f64,
}

impl TransitionAnalysis {
    /// Highest-ranked transition point, if any were found
    pub fn best_point(&self) -> Option<&TransitionPoint> {
        self.optimal_points.first()
    }
}

/// Sort points by descending score, keeping the existing order for ties
pub(crate) fn sort_by_score(points: &mut [TransitionPoint]) {
    points.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
