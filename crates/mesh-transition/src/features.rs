//! Track feature vectors
//!
//! [`TrackFeatures`] is the loosely filled shape handed over by the feature
//! extraction pipeline: every scalar may be missing. [`FeatureVector`] is the
//! validated, immutable form the engine works with. Defaults for missing
//! fields are substituted exactly once, when a `FeatureVector` is built.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, FeatureResult};
use crate::music::MusicalKey;

/// Tempo assumed when a track has no BPM
pub const DEFAULT_TEMPO_BPM: f64 = 120.0;

/// Energy assumed when a track has no energy measurement
pub const DEFAULT_ENERGY: f64 = 0.5;

/// Spectral centroid assumed when none was measured
pub const DEFAULT_SPECTRAL_CENTROID: f64 = 0.0;

/// Structural section label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Intro,
    Verse,
    Chorus,
    Bridge,
    Outro,
}

/// A labelled time range within a track
///
/// Segments need not be contiguous or cover the whole track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (always greater than `start`)
    pub end: f64,
    #[serde(rename = "type")]
    pub kind: SegmentType,
    /// Detection confidence (0.0-1.0)
    pub confidence: f64,
}

impl StructureSegment {
    pub fn new(start: f64, end: f64, kind: SegmentType, confidence: f64) -> Self {
        Self {
            start,
            end,
            kind,
            confidence,
        }
    }
}

/// Raw analysed properties of one track, as produced upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackFeatures {
    pub tempo_bpm: Option<f64>,
    /// Pitch class with optional minor marker, e.g. "A", "F#m"
    pub musical_key: Option<String>,
    pub energy_level: Option<f64>,
    pub spectral_centroid: Option<f64>,
    /// Detected beat times in seconds, strictly increasing
    pub beat_positions: Vec<f64>,
    pub structure_segments: Vec<StructureSegment>,
}

/// Immutable, validated snapshot of one track's analysed properties
///
/// Built from [`TrackFeatures`] via [`FeatureVector::new`] (or `TryFrom`),
/// which substitutes defaults for missing scalars (120 BPM, key of C,
/// energy 0.5, centroid 0) and checks value ranges, beat ordering and
/// segment ranges. Deserialising a `FeatureVector` runs the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrackFeatures", into = "TrackFeatures")]
pub struct FeatureVector {
    tempo_bpm: f64,
    key: MusicalKey,
    energy: f64,
    spectral_centroid: f64,
    beats: Vec<f64>,
    segments: Vec<StructureSegment>,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            tempo_bpm: DEFAULT_TEMPO_BPM,
            key: MusicalKey::C_MAJOR,
            energy: DEFAULT_ENERGY,
            spectral_centroid: DEFAULT_SPECTRAL_CENTROID,
            beats: Vec::new(),
            segments: Vec::new(),
        }
    }
}

impl FeatureVector {
    /// Validate raw features and substitute defaults for missing fields
    pub fn new(raw: TrackFeatures) -> FeatureResult<Self> {
        let tempo_bpm = raw.tempo_bpm.unwrap_or(DEFAULT_TEMPO_BPM);
        if !tempo_bpm.is_finite() || tempo_bpm <= 0.0 {
            return Err(FeatureError::InvalidTempo(tempo_bpm));
        }

        let key = match raw.musical_key.as_deref() {
            None => MusicalKey::C_MAJOR,
            Some(s) => {
                MusicalKey::parse(s).ok_or_else(|| FeatureError::UnknownKey(s.to_string()))?
            }
        };

        let energy = raw.energy_level.unwrap_or(DEFAULT_ENERGY);
        if !(0.0..=1.0).contains(&energy) {
            return Err(FeatureError::EnergyOutOfRange(energy));
        }

        let spectral_centroid = raw.spectral_centroid.unwrap_or(DEFAULT_SPECTRAL_CENTROID);
        if !spectral_centroid.is_finite() || spectral_centroid < 0.0 {
            return Err(FeatureError::InvalidSpectralCentroid(spectral_centroid));
        }

        validate_beats(&raw.beat_positions)?;
        validate_segments(&raw.structure_segments)?;

        Ok(Self {
            tempo_bpm,
            key,
            energy,
            spectral_centroid,
            beats: raw.beat_positions,
            segments: raw.structure_segments,
        })
    }

    /// Tempo in BPM
    pub fn tempo_bpm(&self) -> f64 {
        self.tempo_bpm
    }

    pub fn key(&self) -> MusicalKey {
        self.key
    }

    /// Energy level (0.0-1.0)
    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn spectral_centroid(&self) -> f64 {
        self.spectral_centroid
    }

    /// Beat times in seconds, strictly increasing
    pub fn beats(&self) -> &[f64] {
        &self.beats
    }

    pub fn segments(&self) -> &[StructureSegment] {
        &self.segments
    }
}

impl AsRef<FeatureVector> for FeatureVector {
    fn as_ref(&self) -> &FeatureVector {
        self
    }
}

impl TryFrom<TrackFeatures> for FeatureVector {
    type Error = FeatureError;

    fn try_from(raw: TrackFeatures) -> FeatureResult<Self> {
        Self::new(raw)
    }
}

impl From<FeatureVector> for TrackFeatures {
    fn from(fv: FeatureVector) -> Self {
        Self {
            tempo_bpm: Some(fv.tempo_bpm),
            musical_key: Some(fv.key.to_string()),
            energy_level: Some(fv.energy),
            spectral_centroid: Some(fv.spectral_centroid),
            beat_positions: fv.beats,
            structure_segments: fv.segments,
        }
    }
}

fn validate_beats(beats: &[f64]) -> FeatureResult<()> {
    for (index, &beat) in beats.iter().enumerate() {
        if !beat.is_finite() {
            return Err(FeatureError::NonFiniteBeat { index });
        }
        if index > 0 && beat <= beats[index - 1] {
            return Err(FeatureError::NonIncreasingBeats {
                index,
                previous: beats[index - 1],
                current: beat,
            });
        }
    }
    Ok(())
}

fn validate_segments(segments: &[StructureSegment]) -> FeatureResult<()> {
    for (index, seg) in segments.iter().enumerate() {
        if !seg.start.is_finite() || !seg.end.is_finite() || seg.start >= seg.end {
            return Err(FeatureError::InvalidSegment {
                index,
                start: seg.start,
                end: seg.end,
            });
        }
        if !(0.0..=1.0).contains(&seg.confidence) {
            return Err(FeatureError::SegmentConfidenceOutOfRange {
                index,
                confidence: seg.confidence,
            });
        }
    }
    Ok(())
}

/// Load and validate a feature file (YAML, or JSON as a YAML subset)
pub fn load_features(path: &Path) -> Result<FeatureVector> {
    log::info!("load_features: Loading from {:?}", path);

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feature file: {:?}", path))?;
    let raw: TrackFeatures = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse feature file: {:?}", path))?;
    let features = FeatureVector::new(raw)
        .with_context(|| format!("Invalid features in {:?}", path))?;

    log::debug!(
        "load_features: {:.1} BPM, key {}, {} beats, {} segments",
        features.tempo_bpm(),
        features.key(),
        features.beats().len(),
        features.segments().len()
    );
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_fields_use_defaults() {
        let fv = FeatureVector::new(TrackFeatures::default()).unwrap();
        assert_eq!(fv.tempo_bpm(), 120.0);
        assert_eq!(fv.key(), MusicalKey::C_MAJOR);
        assert_eq!(fv.energy(), 0.5);
        assert_eq!(fv.spectral_centroid(), 0.0);
        assert!(fv.beats().is_empty());
        assert!(fv.segments().is_empty());
        assert_eq!(fv, FeatureVector::default());
    }

    #[test]
    fn test_rejects_bad_scalars() {
        let bad_tempo = TrackFeatures {
            tempo_bpm: Some(0.0),
            ..Default::default()
        };
        assert_eq!(FeatureVector::new(bad_tempo), Err(FeatureError::InvalidTempo(0.0)));

        let bad_energy = TrackFeatures {
            energy_level: Some(1.2),
            ..Default::default()
        };
        assert_eq!(
            FeatureVector::new(bad_energy),
            Err(FeatureError::EnergyOutOfRange(1.2))
        );

        let bad_centroid = TrackFeatures {
            spectral_centroid: Some(-1.0),
            ..Default::default()
        };
        assert!(FeatureVector::new(bad_centroid).is_err());

        let bad_key = TrackFeatures {
            musical_key: Some("X#".to_string()),
            ..Default::default()
        };
        assert_eq!(
            FeatureVector::new(bad_key),
            Err(FeatureError::UnknownKey("X#".to_string()))
        );
    }

    #[test]
    fn test_rejects_non_increasing_beats() {
        let raw = TrackFeatures {
            beat_positions: vec![0.0, 0.5, 0.5, 1.0],
            ..Default::default()
        };
        assert!(matches!(
            FeatureVector::new(raw),
            Err(FeatureError::NonIncreasingBeats { index: 2, .. })
        ));

        let raw = TrackFeatures {
            beat_positions: vec![0.0, f64::NAN],
            ..Default::default()
        };
        assert_eq!(
            FeatureVector::new(raw),
            Err(FeatureError::NonFiniteBeat { index: 1 })
        );
    }

    #[test]
    fn test_rejects_bad_segments() {
        let raw = TrackFeatures {
            structure_segments: vec![
                StructureSegment::new(0.0, 16.0, SegmentType::Intro, 0.9),
                StructureSegment::new(40.0, 32.0, SegmentType::Verse, 0.9),
            ],
            ..Default::default()
        };
        assert!(matches!(
            FeatureVector::new(raw),
            Err(FeatureError::InvalidSegment { index: 1, .. })
        ));

        let raw = TrackFeatures {
            structure_segments: vec![StructureSegment::new(0.0, 16.0, SegmentType::Intro, 1.5)],
            ..Default::default()
        };
        assert!(matches!(
            FeatureVector::new(raw),
            Err(FeatureError::SegmentConfidenceOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let yaml = "tempo_bpm: 128.0\nmusical_key: F#m\nbeat_positions: [0.0, 0.47, 0.94]\n";
        let fv: FeatureVector = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fv.tempo_bpm(), 128.0);
        assert_eq!(fv.key(), MusicalKey::new(6, true));
        assert_eq!(fv.energy(), 0.5);
        assert_eq!(fv.beats().len(), 3);

        let invalid = "tempo_bpm: -3.0\n";
        assert!(serde_yaml::from_str::<FeatureVector>(invalid).is_err());
    }

    #[test]
    fn test_segment_type_field_name() {
        let yaml = "structure_segments:\n  - {start: 0.0, end: 32.0, type: chorus, confidence: 0.8}\n";
        let fv: FeatureVector = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fv.segments()[0].kind, SegmentType::Chorus);
    }

    #[test]
    fn test_load_features_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"tempo_bpm": 174.0, "musical_key": "Am", "energy_level": 0.9, "beat_positions": [0.1, 0.44]}}"#
        )
        .unwrap();

        let fv = load_features(file.path()).unwrap();
        assert_eq!(fv.tempo_bpm(), 174.0);
        assert_eq!(fv.key().to_string(), "Am");
        assert_eq!(fv.energy(), 0.9);
    }

    #[test]
    fn test_load_features_missing_file() {
        assert!(load_features(Path::new("/nonexistent/track.yaml")).is_err());
    }
}
