//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads engine-wide settings from YAML: the default rounding
//! rule, manual-entry limits and the first day of the week.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default rounding: {:?}", config.settings().default_rounding);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, SETTINGS_FILE};
pub use types::EngineSettings;
