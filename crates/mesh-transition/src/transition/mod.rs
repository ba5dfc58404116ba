//! Transition-point search and analysis
//!
//! ```text
//! beat alignment ──┐
//! phrase bounds  ──┼─▶ dedup + rank ─▶ TransitionAnalyzer ─▶ TransitionAnalysis
//! segments       ──┘                         ▲
//!                        bpm / energy / key ─┘
//! ```

pub mod analyzer;
pub mod beat;
pub mod phrase;
pub mod search;
pub mod structure;
pub mod types;

pub use analyzer::TransitionAnalyzer;
pub use search::TransitionPointSearch;
pub use types::{TransitionAnalysis, TransitionPoint, TransitionType};
