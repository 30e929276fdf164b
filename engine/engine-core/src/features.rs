//! Read-only board queries for pellet-collecting games.
//!
//! Feature-based heuristics need more than the running score: where the
//! controlled agent stands, what is left to collect, and where the adversaries
//! are. Games that want to use those heuristics implement [`PelletFeatures`]
//! on top of [`MultiAgentState`].

use crate::game_utils::Position;
use crate::typed::MultiAgentState;

/// Snapshot of one adversary as seen by a heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdversaryView {
    /// Current grid position
    pub position: Position,
    /// Remaining moves during which the adversary is vulnerable and flees.
    /// Zero means it is dangerous.
    pub scared_timer: u32,
}

impl AdversaryView {
    pub fn new(position: Position, scared_timer: u32) -> Self {
        Self {
            position,
            scared_timer,
        }
    }

    /// Whether approaching this adversary is favourable.
    pub fn is_vulnerable(&self) -> bool {
        self.scared_timer > 0
    }
}

/// Board queries for games with collectible food, power capsules and
/// adversaries that can temporarily become vulnerable.
pub trait PelletFeatures: MultiAgentState {
    /// Position of the controlled agent
    fn controlled_position(&self) -> Position;

    /// Locations of every remaining food item
    fn food(&self) -> Vec<Position>;

    /// Every adversary, in agent index order (agent 1 first)
    fn adversaries(&self) -> Vec<AdversaryView>;

    /// Locations of every remaining capsule
    fn capsules(&self) -> Vec<Position>;
}
