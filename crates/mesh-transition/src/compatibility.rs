//! Pairwise track compatibility scoring
//!
//! Scores two tracks along five independent dimensions (tempo, key, energy,
//! spectral brightness, rhythm) and combines them with fixed weights:
//!
//! ```text
//! overall = 0.30 * tempo + 0.25 * key + 0.20 * energy
//!         + 0.15 * spectral + 0.10 * rhythm
//! ```
//!
//! Every function here is total; missing data was already replaced by
//! defaults when the [`FeatureVector`] was built.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;
use crate::music::key_compatibility;

pub const TEMPO_WEIGHT: f64 = 0.30;
pub const KEY_WEIGHT: f64 = 0.25;
pub const ENERGY_WEIGHT: f64 = 0.20;
pub const SPECTRAL_WEIGHT: f64 = 0.15;
pub const RHYTHM_WEIGHT: f64 = 0.10;

/// Tempo bands: (max BPM difference, score). DJs think in discrete
/// pitch-fader ranges, so this is a step function.
static TEMPO_BANDS: [(f64, f64); 4] = [(0.0, 1.0), (5.0, 0.8), (10.0, 0.6), (20.0, 0.4)];
const TEMPO_OUT_OF_RANGE: f64 = 0.2;

/// Compatibility between two tracks, every field in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub overall: f64,
    pub tempo: f64,
    pub key: f64,
    pub energy: f64,
    pub spectral: f64,
    pub rhythm: f64,
}

/// A candidate track together with its score against a seed
#[derive(Debug, Clone, Copy)]
pub struct CompatibleTrack<'a, T> {
    pub track: &'a T,
    pub score: CompatibilityScore,
}

/// Score `b` against `a`
pub fn score(a: &FeatureVector, b: &FeatureVector) -> CompatibilityScore {
    let tempo = tempo_score(a.tempo_bpm(), b.tempo_bpm());
    let key = key_compatibility(&a.key(), &b.key());
    let energy = energy_score(a.energy(), b.energy());
    let spectral = spectral_score(a.spectral_centroid(), b.spectral_centroid());
    let rhythm = rhythm_score(a.tempo_bpm(), b.tempo_bpm());

    let overall = TEMPO_WEIGHT * tempo
        + KEY_WEIGHT * key
        + ENERGY_WEIGHT * energy
        + SPECTRAL_WEIGHT * spectral
        + RHYTHM_WEIGHT * rhythm;

    CompatibilityScore {
        overall,
        tempo,
        key,
        energy,
        spectral,
        rhythm,
    }
}

/// Rank `candidates` by compatibility with `seed`, best first
///
/// Scoring runs on the rayon pool. Ties keep their input order, and at most
/// `limit` results are returned.
pub fn find_compatible<'a, T>(
    seed: &FeatureVector,
    candidates: &'a [T],
    limit: usize,
) -> Vec<CompatibleTrack<'a, T>>
where
    T: AsRef<FeatureVector> + Sync,
{
    let mut ranked: Vec<CompatibleTrack<'a, T>> = candidates
        .par_iter()
        .map(|track| CompatibleTrack {
            track,
            score: score(seed, track.as_ref()),
        })
        .collect();

    // sort_by is stable, so equal scores stay in candidate order
    ranked.sort_by(|a, b| {
        b.score
            .overall
            .partial_cmp(&a.score.overall)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);

    log::debug!(
        "find_compatible: ranked {} candidates, returning {}",
        candidates.len(),
        ranked.len()
    );
    ranked
}

/// Step score over the absolute BPM difference
pub fn tempo_score(bpm_a: f64, bpm_b: f64) -> f64 {
    let diff = (bpm_a - bpm_b).abs();
    TEMPO_BANDS
        .iter()
        .find(|(max, _)| diff <= *max)
        .map(|(_, score)| *score)
        .unwrap_or(TEMPO_OUT_OF_RANGE)
}

/// Linear decay, reaching zero at an energy difference of 0.5
pub fn energy_score(energy_a: f64, energy_b: f64) -> f64 {
    (1.0 - 2.0 * (energy_a - energy_b).abs()).max(0.0)
}

/// Centroid difference relative to the brighter track (floored at 1 Hz)
///
/// The normalisation is evaluated literally as `|a - b| / max(a, b, 1)`.
/// A zero centroid (not measured) against a bright track scores close to
/// zero in either order.
pub fn spectral_score(centroid_a: f64, centroid_b: f64) -> f64 {
    let diff = (centroid_a - centroid_b).abs();
    let norm = diff / centroid_a.max(centroid_b).max(1.0);
    (1.0 - norm).max(0.0)
}

/// Tempo ratio, used as a stand-in for rhythmic similarity
pub fn rhythm_score(bpm_a: f64, bpm_b: f64) -> f64 {
    bpm_a.min(bpm_b) / bpm_a.max(bpm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{library, track};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_weights_sum_to_one() {
        let total = TEMPO_WEIGHT + KEY_WEIGHT + ENERGY_WEIGHT + SPECTRAL_WEIGHT + RHYTHM_WEIGHT;
        assert!((total - 1.0).abs() < EPS);
    }

    #[test]
    fn test_tempo_bands() {
        assert_eq!(tempo_score(128.0, 128.0), 1.0);
        assert_eq!(tempo_score(128.0, 133.0), 0.8);
        assert_eq!(tempo_score(128.0, 138.0), 0.6);
        assert_eq!(tempo_score(128.0, 148.0), 0.4);
        assert_eq!(tempo_score(174.0, 90.0), 0.2);
    }

    #[test]
    fn test_energy_decay() {
        assert!((energy_score(0.7, 0.72) - 0.96).abs() < EPS);
        assert_eq!(energy_score(0.2, 0.7), 0.0);
        assert_eq!(energy_score(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_spectral_zero_against_bright() {
        // Unmeasured centroid vs a bright track: near zero in both orders
        let forward = spectral_score(0.0, 5000.0);
        let backward = spectral_score(5000.0, 0.0);
        assert_eq!(forward, 0.0);
        assert_eq!(backward, 0.0);
        // Below 1 Hz the floor dominates the normalisation
        assert!((spectral_score(0.0, 0.5) - 0.5).abs() < EPS);
        assert!((spectral_score(0.5, 0.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_reference_pair() {
        let a = track(128.0, "A", 0.70);
        let b = track(130.0, "E", 0.72);
        let s = score(&a, &b);

        assert_eq!(s.tempo, 0.8);
        assert_eq!(s.key, 0.8);
        assert!((s.energy - 0.96).abs() < EPS);
        assert_eq!(s.spectral, 1.0);
        assert!((s.rhythm - 128.0 / 130.0).abs() < EPS);
        assert!((s.overall - 0.880_461_538).abs() < 1e-6, "overall = {}", s.overall);
    }

    #[test]
    fn test_identical_tracks_score_one() {
        for fv in library() {
            let s = score(&fv, &fv);
            assert_eq!(s.tempo, 1.0);
            assert_eq!(s.key, 1.0);
            assert_eq!(s.energy, 1.0);
            assert_eq!(s.rhythm, 1.0);
            assert_eq!(s.spectral, 1.0);
            assert!((s.overall - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_scores_in_unit_range_and_symmetric() {
        let tracks = library();
        for a in &tracks {
            for b in &tracks {
                let ab = score(a, b);
                let ba = score(b, a);
                for v in [ab.overall, ab.tempo, ab.key, ab.energy, ab.spectral, ab.rhythm] {
                    assert!((0.0..=1.0).contains(&v), "score {v} out of range");
                }
                assert_eq!(ab.tempo, ba.tempo);
                assert_eq!(ab.key, ba.key);
                assert_eq!(ab.energy, ba.energy);
                assert_eq!(ab.rhythm, ba.rhythm);
            }
        }
    }

    #[test]
    fn test_find_compatible_sorted_and_limited() {
        let tracks = library();
        let seed = &tracks[0];

        let ranked = find_compatible(seed, &tracks, 4);
        assert_eq!(ranked.len(), 4);
        for pair in ranked.windows(2) {
            assert!(pair[0].score.overall >= pair[1].score.overall);
        }
        // The seed itself is the best match
        assert!(std::ptr::eq(ranked[0].track, seed));

        let all = find_compatible(seed, &tracks, 100);
        assert_eq!(all.len(), tracks.len());
        assert!(find_compatible(seed, &tracks, 0).is_empty());
    }

    #[test]
    fn test_find_compatible_ties_keep_input_order() {
        let seed = track(128.0, "A", 0.7);
        let candidates = vec![track(100.0, "C", 0.1), track(100.0, "C", 0.1), track(100.0, "C", 0.1)];
        let ranked = find_compatible(&seed, &candidates, 3);
        for (i, r) in ranked.iter().enumerate() {
            assert!(std::ptr::eq(r.track, &candidates[i]));
        }
    }

    #[test]
    fn test_find_compatible_custom_track_type() {
        struct LibraryTrack {
            title: &'static str,
            features: FeatureVector,
        }
        impl AsRef<FeatureVector> for LibraryTrack {
            fn as_ref(&self) -> &FeatureVector {
                &self.features
            }
        }

        let seed = track(128.0, "A", 0.7);
        let library = vec![
            LibraryTrack { title: "far", features: track(90.0, "D#", 0.1) },
            LibraryTrack { title: "near", features: track(128.0, "A", 0.7) },
        ];
        let ranked = find_compatible(&seed, &library, 1);
        assert_eq!(ranked[0].track.title, "near");
    }
}
