//! Depth-limited adversarial search.
//!
//! Minimax, alpha-beta and expectimax share one recursive traversal:
//! 1. Cutoff: terminal states and states at the depth limit are evaluated
//! 2. Max rule: the controlled agent picks its best action
//! 3. Adversary rule: the minimum (minimax, alpha-beta) or the uniform
//!    expectation (expectimax) over the adversary's actions
//! 4. Turn rotation: the round counter advances after the last adversary
//!
//! The [`Algorithm`] is the only thing that varies between the three: it picks
//! the adversary rule and decides whether the alpha/beta window prunes.

use std::fmt;
use std::str::FromStr;

use engine_core::{next_turn, AgentIndex, MultiAgentState, StateError, CONTROLLED_AGENT};
use thiserror::Error;
use tracing::{debug, trace};

use crate::evaluator::Evaluator;

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Agent {agent} has no legal actions in a non-terminal state at depth {depth}")]
    DegenerateState { agent: AgentIndex, depth: u32 },

    #[error("State error: {0}")]
    State(#[from] StateError),
}

/// Tree-search algorithm used to back up values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Full minimax: adversaries minimize, nothing is pruned.
    Minimax,
    /// Minimax with alpha-beta pruning; same root value as `Minimax`.
    AlphaBeta,
    /// Adversaries choose uniformly at random among their legal actions.
    Expectimax,
}

impl Algorithm {
    /// Whether the alpha/beta window is allowed to cut off siblings.
    #[inline]
    pub fn prunes(self) -> bool {
        matches!(self, Algorithm::AlphaBeta)
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alphabeta",
            Algorithm::Expectimax => "expectimax",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(Algorithm::AlphaBeta),
            "expectimax" => Ok(Algorithm::Expectimax),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown search algorithm '{other}'"
            ))),
        }
    }
}

/// Backed-up value of a node together with the action that achieves it.
///
/// `action` is `None` at leaves and at chance nodes, where no single action is
/// meaningful. Callers only read the action of the root.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchValue<A> {
    pub value: f64,
    pub action: Option<A>,
}

impl<A> SearchValue<A> {
    fn leaf(value: f64) -> Self {
        Self {
            value,
            action: None,
        }
    }

    fn chosen(value: f64, action: Option<A>) -> Self {
        Self { value, action }
    }
}

/// Counters collected during one decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior nodes whose actions were enumerated
    pub nodes_expanded: u64,
    /// Calls made to the evaluation function
    pub leaves_evaluated: u64,
    /// Alpha or beta cutoffs taken
    pub cutoffs: u64,
    /// Deepest round at which a state was evaluated
    pub max_depth_reached: u32,
}

/// Result of a search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Best action for the controlled agent; `None` when the root is a leaf
    pub action: Option<A>,

    /// Backed-up value of the root
    pub value: f64,

    /// Statistics for this decision
    pub stats: SearchStats,
}

/// Alpha/beta bounds along one root-to-node path.
///
/// Passed by value so a bound tightened in one subtree never leaks into a
/// sibling's.
#[derive(Debug, Clone, Copy)]
struct Window {
    alpha: f64,
    beta: f64,
}

impl Window {
    fn full() -> Self {
        Self {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }
}

/// Search state for a single decision.
pub struct SearchEngine<'a, E: ?Sized> {
    algorithm: Algorithm,
    depth_limit: u32,
    evaluator: &'a E,
    stats: SearchStats,
}

impl<'a, E: ?Sized> SearchEngine<'a, E> {
    /// Create a search engine, rejecting depth limits below one round.
    pub fn new(
        algorithm: Algorithm,
        depth_limit: u32,
        evaluator: &'a E,
    ) -> Result<Self, SearchError> {
        if depth_limit < 1 {
            return Err(SearchError::InvalidConfiguration(format!(
                "depth limit must be at least 1, got {depth_limit}"
            )));
        }

        Ok(Self {
            algorithm,
            depth_limit,
            evaluator,
            stats: SearchStats::default(),
        })
    }

    /// Statistics of the most recent [`run`](Self::run).
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search from `state` with the controlled agent to move.
    pub fn run<S>(&mut self, state: &S) -> Result<SearchResult<S::Action>, SearchError>
    where
        S: MultiAgentState,
        E: Evaluator<S>,
    {
        self.stats = SearchStats::default();

        let root = self.value(state, 0, CONTROLLED_AGENT, Window::full())?;

        debug!(
            algorithm = %self.algorithm,
            depth_limit = self.depth_limit,
            value = root.value,
            action = ?root.action,
            nodes = self.stats.nodes_expanded,
            leaves = self.stats.leaves_evaluated,
            cutoffs = self.stats.cutoffs,
            "Search complete"
        );

        Ok(SearchResult {
            action: root.action,
            value: root.value,
            stats: self.stats,
        })
    }

    /// Backed-up value of the node `(state, depth, agent)`.
    fn value<S>(
        &mut self,
        state: &S,
        depth: u32,
        agent: AgentIndex,
        window: Window,
    ) -> Result<SearchValue<S::Action>, SearchError>
    where
        S: MultiAgentState,
        E: Evaluator<S>,
    {
        if state.is_terminal() || depth == self.depth_limit {
            return Ok(SearchValue::leaf(self.evaluate(state, depth)));
        }

        self.stats.nodes_expanded += 1;

        if agent == CONTROLLED_AGENT {
            self.max_value(state, depth, window)
        } else {
            match self.algorithm {
                Algorithm::Minimax | Algorithm::AlphaBeta => {
                    self.min_value(state, depth, agent, window)
                }
                Algorithm::Expectimax => self.expect_value(state, depth, agent),
            }
        }
    }

    fn max_value<S>(
        &mut self,
        state: &S,
        depth: u32,
        mut window: Window,
    ) -> Result<SearchValue<S::Action>, SearchError>
    where
        S: MultiAgentState,
        E: Evaluator<S>,
    {
        let actions = legal_actions(state, CONTROLLED_AGENT, depth)?;
        let (next_agent, next_depth) = next_turn(CONTROLLED_AGENT, depth, state.num_agents());

        let mut best_value = f64::NEG_INFINITY;
        let mut best_action = None;

        for action in actions {
            let successor = state.successor(CONTROLLED_AGENT, &action)?;
            let value = self
                .value(&successor, next_depth, next_agent, window)?
                .value;

            // Strict comparison: the first action listed wins ties
            if value > best_value {
                best_value = value;
                best_action = Some(action);
            }

            if self.algorithm.prunes() {
                if best_value > window.beta {
                    self.stats.cutoffs += 1;
                    trace!(depth, value = best_value, beta = window.beta, "Beta cutoff");
                    return Ok(SearchValue::chosen(best_value, best_action));
                }
                window.alpha = window.alpha.max(best_value);
            }
        }

        Ok(SearchValue::chosen(best_value, best_action))
    }

    fn min_value<S>(
        &mut self,
        state: &S,
        depth: u32,
        agent: AgentIndex,
        mut window: Window,
    ) -> Result<SearchValue<S::Action>, SearchError>
    where
        S: MultiAgentState,
        E: Evaluator<S>,
    {
        let actions = legal_actions(state, agent, depth)?;
        let (next_agent, next_depth) = next_turn(agent, depth, state.num_agents());

        let mut best_value = f64::INFINITY;
        let mut best_action = None;

        for action in actions {
            let successor = state.successor(agent, &action)?;
            let value = self
                .value(&successor, next_depth, next_agent, window)?
                .value;

            if value < best_value {
                best_value = value;
                best_action = Some(action);
            }

            if self.algorithm.prunes() {
                if best_value < window.alpha {
                    self.stats.cutoffs += 1;
                    trace!(
                        depth,
                        agent,
                        value = best_value,
                        alpha = window.alpha,
                        "Alpha cutoff"
                    );
                    return Ok(SearchValue::chosen(best_value, best_action));
                }
                window.beta = window.beta.min(best_value);
            }
        }

        Ok(SearchValue::chosen(best_value, best_action))
    }

    fn expect_value<S>(
        &mut self,
        state: &S,
        depth: u32,
        agent: AgentIndex,
    ) -> Result<SearchValue<S::Action>, SearchError>
    where
        S: MultiAgentState,
        E: Evaluator<S>,
    {
        let actions = legal_actions(state, agent, depth)?;
        let (next_agent, next_depth) = next_turn(agent, depth, state.num_agents());

        let probability = 1.0 / actions.len() as f64;
        let mut expected = 0.0;

        for action in actions {
            let successor = state.successor(agent, &action)?;
            let value = self
                .value(&successor, next_depth, next_agent, Window::full())?
                .value;
            expected += probability * value;
        }

        Ok(SearchValue::leaf(expected))
    }

    fn evaluate<S>(&mut self, state: &S, depth: u32) -> f64
    where
        S: MultiAgentState,
        E: Evaluator<S>,
    {
        self.stats.leaves_evaluated += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);

        let value = self.evaluator.evaluate(state);
        trace!(depth, value, terminal = state.is_terminal(), "Leaf evaluated");
        value
    }
}

/// Legal actions of `agent`, which must have at least one.
fn legal_actions<S: MultiAgentState>(
    state: &S,
    agent: AgentIndex,
    depth: u32,
) -> Result<Vec<S::Action>, SearchError> {
    let actions = state.legal_actions(agent);
    if actions.is_empty() {
        return Err(SearchError::DegenerateState { agent, depth });
    }
    Ok(actions)
}

/// Convenience function to run a single search.
pub fn choose_action<S, E>(
    state: &S,
    algorithm: Algorithm,
    depth_limit: u32,
    evaluator: &E,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: MultiAgentState,
    E: Evaluator<S> + ?Sized,
{
    let mut engine = SearchEngine::new(algorithm, depth_limit, evaluator)?;
    engine.run(state)
}
