//! Transition engine configuration
//!
//! The defaults reproduce the reference search behaviour exactly; changing
//! them trades recall for speed or widens the cue windows.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Transition-point search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Incoming-track beats must fall before this time to be cue candidates.
    /// Default: 30.0 seconds
    pub incoming_window_secs: f64,

    /// Incoming-track segments must start before this time.
    /// Default: 60.0 seconds
    pub segment_window_secs: f64,

    /// Two points closer than this on both cue times are duplicates.
    /// Default: 2.0 seconds
    pub dedup_tolerance_secs: f64,

    /// Number of points kept in an analysis.
    /// Default: 5
    pub max_points: usize,

    /// Optional cap on beats considered per track, applied before the
    /// beat cross products. Default: None (all beats)
    pub max_beats: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            incoming_window_secs: 30.0,
            segment_window_secs: 60.0,
            dedup_tolerance_secs: 2.0,
            max_points: 5,
            max_beats: None,
        }
    }
}

impl SearchConfig {
    /// Beat list truncated to `max_beats`
    pub fn capped<'a>(&self, beats: &'a [f64]) -> &'a [f64] {
        match self.max_beats {
            Some(cap) if cap < beats.len() => &beats[..cap],
            _ => beats,
        }
    }
}

/// Top-level configuration file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,

    /// Worker threads for batch analysis (clamped to 1-16).
    /// Default: 4
    pub parallel_workers: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            parallel_workers: 4,
        }
    }
}

impl EngineConfig {
    /// Build a rayon pool sized by `parallel_workers`
    pub fn build_thread_pool(&self) -> Result<rayon::ThreadPool> {
        let num_workers = self.parallel_workers.clamp(1, 16) as usize;
        log::info!("build_thread_pool: Using {} parallel workers", num_workers);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("transition-{}", i))
            .build()
            .context("Failed to create thread pool")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SearchConfig::default();
        assert_eq!(config.incoming_window_secs, 30.0);
        assert_eq!(config.segment_window_secs, 60.0);
        assert_eq!(config.dedup_tolerance_secs, 2.0);
        assert_eq!(config.max_points, 5);
        assert_eq!(config.max_beats, None);
        assert_eq!(EngineConfig::default().parallel_workers, 4);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: EngineConfig =
            serde_yaml::from_str("search:\n  max_beats: 512\nparallel_workers: 2\n").unwrap();
        assert_eq!(config.search.max_beats, Some(512));
        assert_eq!(config.search.incoming_window_secs, 30.0);
        assert_eq!(config.parallel_workers, 2);
    }

    #[test]
    fn test_capped_beats() {
        let beats = [0.0, 0.5, 1.0, 1.5];
        assert_eq!(SearchConfig::default().capped(&beats).len(), 4);

        let config = SearchConfig {
            max_beats: Some(2),
            ..Default::default()
        };
        assert_eq!(config.capped(&beats), &[0.0, 0.5]);
    }

    #[test]
    fn test_thread_pool_clamps_workers() {
        let config = EngineConfig {
            parallel_workers: 0,
            ..Default::default()
        };
        let pool = config.build_thread_pool().unwrap();
        assert_eq!(pool.current_num_threads(), 1);
    }
}
