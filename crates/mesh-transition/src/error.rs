//! Error types for track feature validation
//!
//! Scoring and search never fail. The only fallible step is turning
//! externally supplied features into a [`FeatureVector`](crate::FeatureVector).

use thiserror::Error;

/// Errors raised while validating track features
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Tempo must be a finite, positive BPM value
    #[error("Invalid tempo: {0} BPM")]
    InvalidTempo(f64),

    /// Energy must lie in [0, 1]
    #[error("Energy level {0} out of range (expected 0.0-1.0)")]
    EnergyOutOfRange(f64),

    /// Spectral centroid must be finite and non-negative
    #[error("Invalid spectral centroid: {0}")]
    InvalidSpectralCentroid(f64),

    /// Key string could not be parsed
    #[error("Unknown musical key '{0}'")]
    UnknownKey(String),

    #[error("Beat {index} is not finite")]
    NonFiniteBeat { index: usize },

    /// Beat positions must be strictly increasing
    #[error("Beat {index} at {current}s does not follow previous beat at {previous}s")]
    NonIncreasingBeats {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// Segment range is empty, inverted or not finite
    #[error("Segment {index} has invalid range {start}s-{end}s")]
    InvalidSegment { index: usize, start: f64, end: f64 },

    #[error("Segment {index} confidence {confidence} out of range (expected 0.0-1.0)")]
    SegmentConfidenceOutOfRange { index: usize, confidence: f64 },
}

/// Result type for feature validation
pub type FeatureResult<T> = Result<T, FeatureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeatureError::UnknownKey("H#".to_string());
        assert!(err.to_string().contains("H#"));

        let err = FeatureError::NonIncreasingBeats {
            index: 3,
            previous: 1.5,
            current: 1.25,
        };
        assert!(err.to_string().contains("Beat 3"));
        assert!(err.to_string().contains("1.25"));
    }
}
