//! Shared utilities for multi-agent game implementations
//!
//! This module provides the grid geometry used by feature-based heuristics and
//! the turn rotation every search follows.

use crate::typed::{AgentIndex, CONTROLLED_AGENT};

/// A point on the game grid.
///
/// Coordinates are real-valued because agents moving at reduced speed can sit
/// halfway between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
        }
    }
}

/// Manhattan (L1) distance between two positions.
///
/// # Example
/// ```
/// use engine_core::game_utils::{manhattan_distance, Position};
///
/// let a = Position::from((1, 1));
/// let b = Position::from((4, 3));
/// assert_eq!(manhattan_distance(a, b), 5.0);
/// ```
#[inline]
pub fn manhattan_distance(a: Position, b: Position) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// The `(agent, depth)` pair that moves after `agent` at round `depth`.
///
/// Agents rotate in ascending order. The round counter advances only when the
/// rotation wraps back to the controlled agent, so one round is one move by
/// every agent.
///
/// # Example
/// ```
/// use engine_core::game_utils::next_turn;
///
/// // Three agents: 0 -> 1 -> 2 -> 0 (next round)
/// assert_eq!(next_turn(0, 0, 3), (1, 0));
/// assert_eq!(next_turn(1, 0, 3), (2, 0));
/// assert_eq!(next_turn(2, 0, 3), (0, 1));
/// ```
#[inline]
pub fn next_turn(agent: AgentIndex, depth: u32, num_agents: usize) -> (AgentIndex, u32) {
    if agent + 1 >= num_agents {
        (CONTROLLED_AGENT, depth + 1)
    } else {
        (agent + 1, depth)
    }
}
