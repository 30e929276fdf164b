//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time, so
//! the documented defaults file and the compiled fallbacks never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    search: SearchDefaults,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    algorithm: String,
    depth: u32,
    evaluation: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Search
pub fn algorithm() -> &'static str {
    &DEFAULTS.search.algorithm
}
pub fn depth() -> u32 {
    DEFAULTS.search.depth
}
pub fn evaluation() -> &'static str {
    &DEFAULTS.search.evaluation
}
