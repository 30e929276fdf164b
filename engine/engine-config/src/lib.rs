//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared by
//! every component that embeds the search engine.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`STRATAGEM_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! STRATAGEM_<SECTION>_<KEY>=value
//!
//! Examples:
//!     STRATAGEM_SEARCH_ALGORITHM=expectimax
//!     STRATAGEM_SEARCH_DEPTH=3
//!     STRATAGEM_SEARCH_EVALUATION=score
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
