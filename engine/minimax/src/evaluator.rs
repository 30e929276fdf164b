//! Evaluation functions for search cutoffs.
//!
//! An evaluator maps a state to a real number, higher being better for the
//! controlled agent. It is called on terminal states and on states at the depth
//! limit. Any `Fn(&S) -> f64` closure is an evaluator; two named evaluators are
//! provided and can be selected from configuration through [`EvaluationKind`].

use std::fmt;
use std::str::FromStr;

use engine_core::{manhattan_distance, MultiAgentState, PelletFeatures};

use crate::search::SearchError;

/// Trait for leaf evaluators.
pub trait Evaluator<S> {
    /// Score `state` from the controlled agent's point of view.
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> f64,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Evaluator that returns the game's running score unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluator;

impl<S: MultiAgentState> Evaluator<S> for ScoreEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        state.score()
    }
}

/// Weights of the pellet-game features combined by [`BetterEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureWeights {
    /// Reward for closeness to the nearest food item
    pub nearest_food: f64,
    /// Reward for closeness to a vulnerable adversary
    pub vulnerable_adversary: f64,
    /// Penalty for closeness to a dangerous adversary
    pub dangerous_adversary: f64,
    /// Penalty per remaining food item
    pub food_remaining: f64,
    /// Penalty per remaining capsule
    pub capsule_remaining: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            nearest_food: 1.0,
            vulnerable_adversary: 10.0,
            dangerous_adversary: 2.0,
            food_remaining: 2.0,
            capsule_remaining: 20.0,
        }
    }
}

/// Feature-based evaluator for pellet-collecting games.
///
/// Starting from the running score it adds:
/// - `nearest_food / d` for the nearest food item, when any food remains
/// - `vulnerable_adversary / d` per vulnerable adversary
/// - `-dangerous_adversary / d` per dangerous adversary
/// - `-food_remaining` per food item and `-capsule_remaining` per capsule
///
/// `d` is the Manhattan distance from the controlled agent. Every distance
/// term is skipped when `d` is zero, including the reward for a vulnerable
/// adversary standing on the controlled agent's cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct BetterEvaluator {
    weights: FeatureWeights,
}

impl BetterEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }
}

impl<S: PelletFeatures> Evaluator<S> for BetterEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        let w = &self.weights;
        let me = state.controlled_position();
        let food = state.food();
        let mut value = state.score();

        let nearest_food = food
            .iter()
            .map(|&item| manhattan_distance(me, item))
            .fold(f64::INFINITY, f64::min);
        if nearest_food.is_finite() && nearest_food > 0.0 {
            value += w.nearest_food / nearest_food;
        }

        for adversary in state.adversaries() {
            let distance = manhattan_distance(me, adversary.position);
            if distance <= 0.0 {
                continue;
            }
            if adversary.is_vulnerable() {
                value += w.vulnerable_adversary / distance;
            } else {
                value -= w.dangerous_adversary / distance;
            }
        }

        value -= w.food_remaining * food.len() as f64;
        value -= w.capsule_remaining * state.capsules().len() as f64;

        value
    }
}

/// Closed set of named evaluators that configuration can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvaluationKind {
    /// [`ScoreEvaluator`]
    Score,
    /// [`BetterEvaluator`] with default weights
    #[default]
    Better,
}

impl EvaluationKind {
    pub fn name(self) -> &'static str {
        match self {
            EvaluationKind::Score => "score",
            EvaluationKind::Better => "better",
        }
    }

    /// Whether the evaluator needs [`PelletFeatures`] from the state.
    pub fn requires_features(self) -> bool {
        matches!(self, EvaluationKind::Better)
    }

    /// The evaluator this kind names.
    pub fn resolve<S>(self) -> Box<dyn Evaluator<S>>
    where
        S: PelletFeatures + 'static,
    {
        match self {
            EvaluationKind::Score => Box::new(ScoreEvaluator),
            EvaluationKind::Better => Box::new(BetterEvaluator::new()),
        }
    }

    /// The evaluator this kind names, for states without pellet features.
    pub fn resolve_without_features<S>(self) -> Result<Box<dyn Evaluator<S>>, SearchError>
    where
        S: MultiAgentState + 'static,
    {
        if self.requires_features() {
            return Err(SearchError::InvalidConfiguration(format!(
                "evaluation '{self}' requires a state with pellet features"
            )));
        }
        Ok(Box::new(ScoreEvaluator))
    }
}

impl fmt::Display for EvaluationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvaluationKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" | "scoreevaluationfunction" => Ok(EvaluationKind::Score),
            "better" | "betterevaluationfunction" => Ok(EvaluationKind::Better),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown evaluation function '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{AdversaryView, AgentIndex, Position, StateError};

    // A frozen board: no moves, only features.
    #[derive(Debug, Clone)]
    struct Board {
        score: f64,
        me: Position,
        food: Vec<Position>,
        adversaries: Vec<AdversaryView>,
        capsules: Vec<Position>,
    }

    impl Board {
        fn empty(score: f64) -> Self {
            Self {
                score,
                me: Position::from((0, 0)),
                food: Vec::new(),
                adversaries: Vec::new(),
                capsules: Vec::new(),
            }
        }
    }

    impl MultiAgentState for Board {
        type Action = ();

        fn num_agents(&self) -> usize {
            1 + self.adversaries.len()
        }

        fn legal_actions(&self, _agent: AgentIndex) -> Vec<()> {
            Vec::new()
        }

        fn successor(&self, agent: AgentIndex, action: &()) -> Result<Self, StateError> {
            Err(StateError::invalid_action(agent, action))
        }

        fn is_win(&self) -> bool {
            false
        }

        fn is_lose(&self) -> bool {
            false
        }

        fn score(&self) -> f64 {
            self.score
        }
    }

    impl PelletFeatures for Board {
        fn controlled_position(&self) -> Position {
            self.me
        }

        fn food(&self) -> Vec<Position> {
            self.food.clone()
        }

        fn adversaries(&self) -> Vec<AdversaryView> {
            self.adversaries.clone()
        }

        fn capsules(&self) -> Vec<Position> {
            self.capsules.clone()
        }
    }

    #[test]
    fn test_score_evaluator() {
        let board = Board::empty(-500.0);
        assert!((ScoreEvaluator.evaluate(&board) + 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_closure_is_evaluator() {
        let doubled = |b: &Board| b.score * 2.0;
        assert!((doubled.evaluate(&Board::empty(4.0)) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_better_empty_board_is_score() {
        let board = Board::empty(120.0);
        assert!((BetterEvaluator::new().evaluate(&board) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_better_food_terms() {
        let mut board = Board::empty(10.0);
        board.food = vec![Position::from((4, 0)), Position::from((1, 1))];

        // 10 + 1/2 (nearest is 2 away) - 2 * 2 food
        let value = BetterEvaluator::new().evaluate(&board);
        assert!((value - 6.5).abs() < 1e-9, "got {value}");
    }

    #[test]
    fn test_better_adversary_terms() {
        let mut board = Board::empty(0.0);
        board.adversaries = vec![
            AdversaryView::new(Position::from((0, 5)), 3), // vulnerable, +10/5
            AdversaryView::new(Position::from((2, 2)), 0), // dangerous, -2/4
            AdversaryView::new(Position::from((0, 0)), 0), // co-located, ignored
        ];

        let value = BetterEvaluator::new().evaluate(&board);
        assert!((value - 1.5).abs() < 1e-9, "got {value}");
    }

    #[test]
    fn test_better_vulnerable_co_located_is_finite() {
        let mut board = Board::empty(0.0);
        board.adversaries = vec![AdversaryView::new(Position::from((0, 0)), 5)];

        let value = BetterEvaluator::new().evaluate(&board);
        assert!(value.is_finite());
        assert!(value.abs() < 1e-9);
    }

    #[test]
    fn test_better_capsule_penalty() {
        let mut board = Board::empty(100.0);
        board.capsules = vec![Position::from((3, 3)), Position::from((9, 9))];

        let value = BetterEvaluator::new().evaluate(&board);
        assert!((value - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_better_custom_weights() {
        let mut board = Board::empty(0.0);
        board.food = vec![Position::from((0, 1))];
        let evaluator = BetterEvaluator::with_weights(FeatureWeights {
            nearest_food: 5.0,
            food_remaining: 0.0,
            ..FeatureWeights::default()
        });

        assert!((evaluator.evaluate(&board) - 5.0).abs() < 1e-9);
        assert!((evaluator.weights().capsule_remaining - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluation_kind_from_str() {
        assert_eq!("score".parse::<EvaluationKind>().unwrap(), EvaluationKind::Score);
        assert_eq!(
            "scoreEvaluationFunction".parse::<EvaluationKind>().unwrap(),
            EvaluationKind::Score
        );
        assert_eq!("Better".parse::<EvaluationKind>().unwrap(), EvaluationKind::Better);
        assert_eq!(
            "betterEvaluationFunction".parse::<EvaluationKind>().unwrap(),
            EvaluationKind::Better
        );
        assert!(matches!(
            "random".parse::<EvaluationKind>(),
            Err(SearchError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_evaluation_kind_resolve() {
        let mut board = Board::empty(7.0);
        board.capsules = vec![Position::from((1, 0))];

        let score = EvaluationKind::Score.resolve::<Board>();
        let better = EvaluationKind::Better.resolve::<Board>();
        assert!((score.evaluate(&board) - 7.0).abs() < 1e-9);
        assert!((better.evaluate(&board) + 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_without_features() {
        assert!(EvaluationKind::Score
            .resolve_without_features::<Board>()
            .is_ok());
        assert!(EvaluationKind::Better.requires_features());
        assert!(matches!(
            EvaluationKind::Better.resolve_without_features::<Board>(),
            Err(SearchError::InvalidConfiguration(_))
        ));
    }
}
