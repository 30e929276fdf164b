//! Typed multi-agent state trait consumed by the search engine
//!
//! A state is an immutable snapshot of the game at one ply. Searching never
//! mutates a state: successors are produced as new values, so the states
//! reachable from a root form a tree addressed by action sequences.

use std::fmt::Debug;

/// Index of an agent in `[0, num_agents)`.
pub type AgentIndex = usize;

/// The agent the search plays for. Every other index is an adversary.
pub const CONTROLLED_AGENT: AgentIndex = 0;

/// Main trait for searchable game states
///
/// Agents move in ascending index order with wraparound: `0, 1, ..., n - 1, 0, ...`.
/// Agent `0` is always the controlled agent.
///
/// # Example
///
/// ```rust
/// use engine_core::typed::*;
///
/// /// Two agents alternately add 1 or 2 to a counter; agent 0 wins at 5.
/// #[derive(Debug, Clone)]
/// struct Counter {
///     total: u32,
/// }
///
/// impl MultiAgentState for Counter {
///     type Action = u32;
///
///     fn num_agents(&self) -> usize {
///         2
///     }
///
///     fn legal_actions(&self, _agent: AgentIndex) -> Vec<u32> {
///         if self.is_terminal() { Vec::new() } else { vec![1, 2] }
///     }
///
///     fn successor(&self, agent: AgentIndex, action: &u32) -> Result<Self, StateError> {
///         if !self.legal_actions(agent).contains(action) {
///             return Err(StateError::invalid_action(agent, action));
///         }
///         Ok(Counter { total: self.total + action })
///     }
///
///     fn is_win(&self) -> bool { self.total == 5 }
///     fn is_lose(&self) -> bool { self.total > 5 }
///     fn score(&self) -> f64 { self.total as f64 }
/// }
///
/// let next = Counter { total: 3 }.successor(0, &2).unwrap();
/// assert!(next.is_win());
/// ```
pub trait MultiAgentState: Sized {
    /// Action type - compared for tie-breaking tests, cloned into results
    type Action: Clone + PartialEq + Debug;

    /// Total number of agents, always at least 1
    fn num_agents(&self) -> usize;

    /// Legal actions for `agent`, in a deterministic order
    ///
    /// The order matters: searches break ties in favour of the first action listed.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state reached when `agent` plays `action`
    ///
    /// Fails with [`StateError::InvalidAction`] when `action` is not currently legal.
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Result<Self, StateError>;

    /// Whether the controlled agent has won
    fn is_win(&self) -> bool;

    /// Whether the controlled agent has lost
    fn is_lose(&self) -> bool;

    /// The game's running score from the controlled agent's point of view
    fn score(&self) -> f64;

    /// A state is terminal when it is either won or lost
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Errors raised by state implementations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("Action {action} is not legal for agent {agent}")]
    InvalidAction { agent: AgentIndex, action: String },
    #[error("Agent {agent} does not exist in a game with {num_agents} agents")]
    UnknownAgent {
        agent: AgentIndex,
        num_agents: usize,
    },
}

impl StateError {
    /// Build an [`StateError::InvalidAction`] from any debuggable action
    pub fn invalid_action(agent: AgentIndex, action: &impl Debug) -> Self {
        StateError::InvalidAction {
            agent,
            action: format!("{action:?}"),
        }
    }
}
