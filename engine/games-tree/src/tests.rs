use super::*;
use rand::SeedableRng;

fn two_by_two() -> TreeState {
    let root = Node::branch([
        ("A", Node::branch([("a1", Node::leaf(3.0)), ("a2", Node::leaf(9.0))])),
        ("B", Node::branch([("b1", Node::leaf(2.0)), ("b2", Node::leaf(5.0))])),
    ]);
    TreeState::new(root, 2)
}

#[test]
fn test_initial_state() {
    let state = two_by_two();
    assert_eq!(state.num_agents(), 2);
    assert_eq!(state.to_move(), 0);
    assert_eq!(state.plies(), 0);
    assert!(!state.is_terminal());
    assert_eq!(state.node().leaf_count(), 4);
}

#[test]
fn test_legal_actions_keep_order() {
    let state = two_by_two();
    assert_eq!(state.legal_actions(0), vec!["A", "B"]);
    // Not agent 1's turn yet
    assert!(state.legal_actions(1).is_empty());
}

#[test]
fn test_successor_rotates_turn() {
    let state = two_by_two();
    let after_a = state.successor(0, &"A".to_string()).unwrap();
    assert_eq!(after_a.to_move(), 1);
    assert_eq!(after_a.legal_actions(1), vec!["a1", "a2"]);

    let leaf = after_a.successor(1, &"a2".to_string()).unwrap();
    assert_eq!(leaf.to_move(), 0);
    assert_eq!(leaf.path(), &["A".to_string(), "a2".to_string()]);
    assert!((leaf.score() - 9.0).abs() < 1e-9);
    assert!(leaf.legal_actions(0).is_empty());

    // Source state is untouched
    assert_eq!(state.plies(), 0);
}

#[test]
fn test_invalid_actions() {
    let state = two_by_two();

    let err = state.successor(0, &"C".to_string()).unwrap_err();
    assert!(matches!(err, StateError::InvalidAction { agent: 0, .. }));

    // Wrong agent
    let err = state.successor(1, &"A".to_string()).unwrap_err();
    assert!(matches!(err, StateError::InvalidAction { agent: 1, .. }));

    let err = state.successor(4, &"A".to_string()).unwrap_err();
    assert_eq!(
        err,
        StateError::UnknownAgent {
            agent: 4,
            num_agents: 2
        }
    );
}

#[test]
fn test_terminal_leaves() {
    let root = Node::branch([("w", Node::win(500.0)), ("l", Node::lose(-500.0))]);
    let state = TreeState::new(root, 1);

    let won = state.successor(0, &"w".to_string()).unwrap();
    let lost = state.successor(0, &"l".to_string()).unwrap();

    assert!(won.is_win() && won.is_terminal());
    assert!(lost.is_lose() && lost.is_terminal());
    assert!(!won.is_lose());
}

#[test]
fn test_single_agent_keeps_turn() {
    let root = Node::branch([("x", Node::branch([("y", Node::leaf(1.0))]))]);
    let state = TreeState::new(root, 1);
    let next = state.successor(0, &"x".to_string()).unwrap();
    assert_eq!(next.to_move(), 0);
    assert_eq!(next.legal_actions(0), vec!["y"]);
}

#[test]
fn test_random_tree_shape() {
    let config = RandomTreeConfig::default()
        .with_agents(3)
        .with_rounds(1)
        .with_branching(2, 2);
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let state = config.generate(&mut rng);

    assert_eq!(config.plies(), 3);
    assert_eq!(state.num_agents(), 3);
    // Full binary tree three plies deep
    assert_eq!(state.node().leaf_count(), 8);
}

#[test]
fn test_random_tree_is_deterministic_per_seed() {
    let config = RandomTreeConfig::default().with_terminal_chance(0.2);
    let a = config.generate(&mut ChaCha20Rng::seed_from_u64(42));
    let b = config.generate(&mut ChaCha20Rng::seed_from_u64(42));
    assert_eq!(a.node(), b.node());
}

#[test]
fn test_random_tree_scores_in_range() {
    let config = RandomTreeConfig::default();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let state = config.generate(&mut rng);

    fn check(node: &Node, range: f64) {
        assert!(node.score().abs() <= range);
        assert_eq!(node.score().fract(), 0.0);
        if let Node::Branch { children, .. } = node {
            for (_, child) in children {
                check(child, range);
            }
        }
    }
    check(state.node(), config.score_range as f64);
}
