//! Explicit game trees for the Stratagem search engine
//!
//! This crate provides a reference implementation of [`MultiAgentState`]
//! whose whole game is written out as a tree: every branch lists its actions
//! in order, every leaf carries a score. Action order is fixed by
//! construction, which makes searches over these trees fully reproducible.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::MultiAgentState;
//! use games_tree::{Node, TreeState};
//!
//! // Agent 0 picks A or B, then agent 1 replies.
//! let root = Node::branch([
//!     ("A", Node::branch([("a1", Node::leaf(3.0)), ("a2", Node::leaf(9.0))])),
//!     ("B", Node::branch([("b1", Node::leaf(2.0)), ("b2", Node::leaf(5.0))])),
//! ]);
//! let state = TreeState::new(root, 2);
//!
//! assert_eq!(state.legal_actions(0), vec!["A".to_string(), "B".to_string()]);
//! let next = state.successor(0, &"B".to_string()).unwrap();
//! assert_eq!(next.to_move(), 1);
//! ```

use std::sync::Arc;

use engine_core::{AgentIndex, MultiAgentState, StateError, CONTROLLED_AGENT};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// How a node ends the game, if it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Win,
    Lose,
}

/// A node of an explicit game tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A node without children.
    ///
    /// An ongoing leaf that the search tries to expand has no legal actions,
    /// which lets tests build degenerate positions on purpose.
    Leaf { score: f64, outcome: Outcome },
    /// A decision point for the agent to move; children keep their order.
    Branch {
        score: f64,
        children: Vec<(String, Arc<Node>)>,
    },
}

impl Node {
    /// Ongoing leaf with the given score
    pub fn leaf(score: f64) -> Self {
        Node::Leaf {
            score,
            outcome: Outcome::Ongoing,
        }
    }

    /// Terminal leaf won by the controlled agent
    pub fn win(score: f64) -> Self {
        Node::Leaf {
            score,
            outcome: Outcome::Win,
        }
    }

    /// Terminal leaf lost by the controlled agent
    pub fn lose(score: f64) -> Self {
        Node::Leaf {
            score,
            outcome: Outcome::Lose,
        }
    }

    /// Branch with a zero running score
    pub fn branch<L, I>(children: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, Node)>,
    {
        Self::scored_branch(0.0, children)
    }

    /// Branch carrying its own running score
    pub fn scored_branch<L, I>(score: f64, children: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, Node)>,
    {
        Node::Branch {
            score,
            children: children
                .into_iter()
                .map(|(label, child)| (label.into(), Arc::new(child)))
                .collect(),
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Node::Leaf { score, .. } | Node::Branch { score, .. } => *score,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Node::Leaf { outcome, .. } => *outcome,
            Node::Branch { .. } => Outcome::Ongoing,
        }
    }

    /// Number of childless nodes below (and including) this node
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Branch { children, .. } => {
                children.iter().map(|(_, child)| child.leaf_count()).sum()
            }
        }
    }
}

/// A position inside an explicit game tree.
///
/// Cloning is cheap: nodes are shared, only the path is copied.
#[derive(Debug, Clone)]
pub struct TreeState {
    node: Arc<Node>,
    num_agents: usize,
    to_move: AgentIndex,
    path: Vec<String>,
}

impl TreeState {
    /// Root of a tree where agent 0 moves first
    pub fn new(root: Node, num_agents: usize) -> Self {
        assert!(num_agents >= 1, "a game needs at least one agent");
        Self {
            node: Arc::new(root),
            num_agents,
            to_move: CONTROLLED_AGENT,
            path: Vec::new(),
        }
    }

    /// The agent whose turn it is
    pub fn to_move(&self) -> AgentIndex {
        self.to_move
    }

    /// Actions played from the root to reach this position
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Number of individual moves played from the root
    pub fn plies(&self) -> usize {
        self.path.len()
    }

    pub fn node(&self) -> &Node {
        &self.node
    }
}

impl MultiAgentState for TreeState {
    type Action = String;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, agent: AgentIndex) -> Vec<String> {
        if agent != self.to_move {
            return Vec::new();
        }
        match self.node.as_ref() {
            Node::Leaf { .. } => Vec::new(),
            Node::Branch { children, .. } => {
                children.iter().map(|(label, _)| label.clone()).collect()
            }
        }
    }

    fn successor(&self, agent: AgentIndex, action: &String) -> Result<Self, StateError> {
        if agent >= self.num_agents {
            return Err(StateError::UnknownAgent {
                agent,
                num_agents: self.num_agents,
            });
        }
        if agent != self.to_move {
            return Err(StateError::invalid_action(agent, action));
        }

        let child = match self.node.as_ref() {
            Node::Branch { children, .. } => children
                .iter()
                .find(|(label, _)| label == action)
                .map(|(_, child)| Arc::clone(child)),
            Node::Leaf { .. } => None,
        }
        .ok_or_else(|| StateError::invalid_action(agent, action))?;

        let mut path = self.path.clone();
        path.push(action.clone());

        Ok(Self {
            node: child,
            num_agents: self.num_agents,
            to_move: (agent + 1) % self.num_agents,
            path,
        })
    }

    fn is_win(&self) -> bool {
        self.node.outcome() == Outcome::Win
    }

    fn is_lose(&self) -> bool {
        self.node.outcome() == Outcome::Lose
    }

    fn score(&self) -> f64 {
        self.node.score()
    }
}

/// Shape of a randomly generated game tree.
#[derive(Debug, Clone)]
pub struct RandomTreeConfig {
    /// Agents taking turns, agent 0 first
    pub num_agents: usize,
    /// Full rounds before the tree bottoms out
    pub rounds: u32,
    /// Inclusive range of actions per decision point
    pub min_branching: usize,
    pub max_branching: usize,
    /// Chance that an interior node is replaced by a won or lost leaf
    pub terminal_chance: f64,
    /// Leaf scores are integers drawn from `-score_range..=score_range`
    pub score_range: i32,
}

impl Default for RandomTreeConfig {
    fn default() -> Self {
        Self {
            num_agents: 2,
            rounds: 2,
            min_branching: 2,
            max_branching: 3,
            terminal_chance: 0.0,
            score_range: 50,
        }
    }
}

impl RandomTreeConfig {
    /// Builder pattern: set the number of agents.
    pub fn with_agents(mut self, n: usize) -> Self {
        self.num_agents = n;
        self
    }

    /// Builder pattern: set the number of rounds.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Builder pattern: set the branching range.
    pub fn with_branching(mut self, min: usize, max: usize) -> Self {
        self.min_branching = min;
        self.max_branching = max;
        self
    }

    /// Builder pattern: set the terminal chance.
    pub fn with_terminal_chance(mut self, chance: f64) -> Self {
        self.terminal_chance = chance;
        self
    }

    /// Total number of individual moves from root to the deepest leaves
    pub fn plies(&self) -> usize {
        self.rounds as usize * self.num_agents
    }

    /// Generate a tree and return its root position.
    pub fn generate(&self, rng: &mut ChaCha20Rng) -> TreeState {
        let root = random_node(self, self.plies(), rng, true);
        TreeState::new(root, self.num_agents)
    }
}

fn random_node(config: &RandomTreeConfig, plies_left: usize, rng: &mut ChaCha20Rng, root: bool) -> Node {
    let score = rng.gen_range(-config.score_range..=config.score_range) as f64;
    if plies_left == 0 {
        return Node::leaf(score);
    }
    if !root && config.terminal_chance > 0.0 && rng.gen_bool(config.terminal_chance) {
        return if rng.gen_bool(0.5) {
            Node::win(score)
        } else {
            Node::lose(score)
        };
    }

    let width = rng.gen_range(config.min_branching..=config.max_branching);
    let children: Vec<(String, Node)> = (0..width)
        .map(|i| {
            (
                format!("m{i}"),
                random_node(config, plies_left - 1, rng, false),
            )
        })
        .collect();
    Node::scored_branch(score, children)
}

#[cfg(test)]
mod tests;
