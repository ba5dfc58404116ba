//! Feature vector fixtures shared by unit tests

use crate::features::{FeatureVector, SegmentType, StructureSegment, TrackFeatures};

/// Track with tempo, key and energy only
pub fn track(bpm: f64, key: &str, energy: f64) -> FeatureVector {
    FeatureVector::new(TrackFeatures {
        tempo_bpm: Some(bpm),
        musical_key: Some(key.to_string()),
        energy_level: Some(energy),
        ..Default::default()
    })
    .unwrap()
}

/// Evenly spaced beats at `bpm`, starting at `offset` seconds
pub fn beat_grid(bpm: f64, offset: f64, count: usize) -> Vec<f64> {
    let interval = 60.0 / bpm;
    (0..count).map(|i| offset + i as f64 * interval).collect()
}

pub fn segment(start: f64, end: f64, kind: SegmentType, confidence: f64) -> StructureSegment {
    StructureSegment::new(start, end, kind, confidence)
}

/// Fully analysed track with a beat grid and a typical club-track layout
pub fn club_track(bpm: f64, key: &str, energy: f64, centroid: f64) -> FeatureVector {
    let beats = beat_grid(bpm, 0.0, (bpm * 4.0) as usize);
    FeatureVector::new(TrackFeatures {
        tempo_bpm: Some(bpm),
        musical_key: Some(key.to_string()),
        energy_level: Some(energy),
        spectral_centroid: Some(centroid),
        beat_positions: beats,
        structure_segments: vec![
            segment(0.0, 30.0, SegmentType::Intro, 0.9),
            segment(30.0, 90.0, SegmentType::Verse, 0.7),
            segment(90.0, 150.0, SegmentType::Chorus, 0.8),
            segment(150.0, 180.0, SegmentType::Bridge, 0.6),
            segment(180.0, 240.0, SegmentType::Outro, 0.85),
        ],
    })
    .unwrap()
}

/// A spread of realistic tracks for property-style checks
pub fn library() -> Vec<FeatureVector> {
    vec![
        club_track(128.0, "A", 0.70, 2400.0),
        club_track(130.0, "E", 0.72, 2600.0),
        club_track(174.0, "F#m", 0.95, 3900.0),
        club_track(90.0, "C", 0.30, 1200.0),
        club_track(124.0, "Am", 0.55, 0.0),
        track(140.0, "Bb", 0.85),
        FeatureVector::default(),
    ]
}
