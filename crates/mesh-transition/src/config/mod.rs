//! Engine configuration
//!
//! - Generic YAML config loading/saving
//! - Search window and candidate limits for transition-point search
//! - Default config file location
//!
//! # Usage
//!
//! ```ignore
//! use mesh_transition::config::{default_config_path, load_config, EngineConfig};
//!
//! let config: EngineConfig = load_config(&default_config_path());
//! let analyzer = TransitionAnalyzer::new(config.search);
//! ```

mod engine;
mod io;
mod paths;

pub use engine::{EngineConfig, SearchConfig};
pub use io::{load_config, save_config};
pub use paths::{default_config_path, CONFIG_FILENAME};
