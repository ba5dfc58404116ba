//! Mesh Transition - track compatibility and mix transition planning
//!
//! Given two tracks' analysed features, scores how well they mix and finds
//! ranked cue points for the transition between them.

pub mod compatibility;
pub mod config;
pub mod error;
pub mod features;
pub mod instructions;
pub mod music;
pub mod transition;

#[cfg(test)]
mod test_support;

pub use compatibility::{find_compatible, score, CompatibilityScore, CompatibleTrack};
pub use error::{FeatureError, FeatureResult};
pub use features::{FeatureVector, SegmentType, StructureSegment, TrackFeatures};
pub use instructions::format_instructions;
pub use music::MusicalKey;
pub use transition::{
    TransitionAnalysis, TransitionAnalyzer, TransitionPoint, TransitionPointSearch, TransitionType,
};
