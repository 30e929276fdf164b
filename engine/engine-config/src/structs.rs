//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_algorithm() -> String {
    defaults::algorithm().into()
}
fn d_depth() -> u32 {
    defaults::depth()
}
fn d_evaluation() -> String {
    defaults::evaluation().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub search: SearchSettings,
}

/// Adversarial search settings.
///
/// Names are kept as strings here; the search crate resolves them into its
/// closed enumerations and rejects unknown values.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchSettings {
    /// minimax | alphabeta | expectimax
    #[serde(default = "d_algorithm")]
    pub algorithm: String,
    /// Rounds to search; one round is one move by every agent
    #[serde(default = "d_depth")]
    pub depth: u32,
    /// score | better
    #[serde(default = "d_evaluation")]
    pub evaluation: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            algorithm: defaults::algorithm().into(),
            depth: defaults::depth(),
            evaluation: defaults::evaluation().into(),
        }
    }
}
