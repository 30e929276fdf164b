//! Core traits and types for the Stratagem search engine
//!
//! This crate provides the abstractions a game must implement to be searched:
//! - `MultiAgentState`: immutable, turn-based view of a game with N agents
//! - `PelletFeatures`: read-only board queries used by feature-based heuristics
//! - `Position` / `manhattan_distance`: grid geometry shared by heuristics
//! - `next_turn`: the agent rotation and round counter every search follows

pub mod features;
pub mod game_utils;
pub mod typed;

// Re-export main types for convenience
pub use features::{AdversaryView, PelletFeatures};
pub use game_utils::{manhattan_distance, next_turn, Position};
pub use typed::{AgentIndex, MultiAgentState, StateError, CONTROLLED_AGENT};
