//! Depth-limited adversarial search for multi-agent games.
//!
//! This crate provides minimax, alpha-beta and expectimax search for any game
//! implementing the `engine-core` [`MultiAgentState`] trait. Agent 0 is the
//! controlled agent and maximizes; every other agent is an adversary.
//!
//! # Overview
//!
//! A search walks the game tree depth-first from the current state:
//!
//! 1. **Cutoff**: terminal states and states `depth_limit` rounds deep are
//!    scored by an [`Evaluator`]
//! 2. **Max rule**: the controlled agent takes the best successor value,
//!    keeping the first action on ties
//! 3. **Adversary rule**: the minimum over the adversary's successors, or
//!    their uniform average under [`Algorithm::Expectimax`]
//! 4. **Pruning**: under [`Algorithm::AlphaBeta`], siblings that cannot change
//!    the root decision are skipped
//!
//! # Usage
//!
//! ```rust
//! use games_tree::{Node, TreeState};
//! use minimax::{choose_action, Algorithm, ScoreEvaluator};
//!
//! let root = Node::branch([
//!     ("A", Node::branch([("a1", Node::leaf(3.0)), ("a2", Node::leaf(9.0))])),
//!     ("B", Node::branch([("b1", Node::leaf(2.0)), ("b2", Node::leaf(5.0))])),
//! ]);
//! let state = TreeState::new(root, 2);
//!
//! let result = choose_action(&state, Algorithm::AlphaBeta, 1, &ScoreEvaluator).unwrap();
//! assert_eq!(result.action.as_deref(), Some("A"));
//! assert_eq!(result.value, 3.0);
//! ```
//!
//! # Configuration
//!
//! [`SearchConfig`] selects the algorithm, the depth limit in rounds and the
//! named evaluation function. It converts from the `[search]` section of the
//! central `config.toml` via `TryFrom<&engine_config::SearchSettings>`.
//!
//! # Evaluators
//!
//! - [`ScoreEvaluator`]: the game's running score
//! - [`BetterEvaluator`]: score plus pellet-game features (default)
//! - any `Fn(&S) -> f64` closure

pub mod agent;
pub mod config;
pub mod evaluator;
pub mod search;

// Re-export main types
pub use agent::MultiAgentSearchAgent;
pub use config::SearchConfig;
pub use evaluator::{BetterEvaluator, EvaluationKind, Evaluator, FeatureWeights, ScoreEvaluator};
pub use search::{
    choose_action, Algorithm, SearchEngine, SearchError, SearchResult, SearchStats, SearchValue,
};

pub use engine_core::MultiAgentState;
