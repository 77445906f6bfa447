use crate::game_state::GameState;
use crate::types::Action;

/// Counts the leaves of the game tree to the given depth.
/// Used as a regression anchor for the movement rules.
pub fn perft(state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let actions = state.actions();

    if depth == 1 {
        return actions.len() as u64;
    }

    let mut nodes = 0;
    for action in actions {
        let new_state = state.apply(action);
        nodes += perft(&new_state, depth - 1);
    }

    nodes
}

/// Counts leaves per root action.
pub fn perft_divide(state: &GameState, depth: u8) -> Vec<(Action, u64)> {
    let actions = state.actions();
    let mut results = Vec::new();

    for action in actions {
        let new_state = state.apply(action);
        let nodes = if depth == 1 {
            1
        } else {
            perft(&new_state, depth - 1)
        };
        results.push((action, nodes));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::positions;

    #[test]
    fn test_perft_starting_position() {
        let state = GameState::new();

        // Depth 1: 99 placements. Depth 2: 99 * 98 placement pairs.
        // Depth 3: for each placement pair, the first player's knight
        // moves; the 11x9 knight graph has 568 directed moves, and each
        // of the 98 second placements blocks at most one of them, giving
        // 97 * 568 in total.
        let expected = &[(1, 99), (2, 9702), (3, 55_096)];

        for &(depth, expected) in expected {
            let result = perft(&state, depth);
            assert_eq!(
                result, expected,
                "Perft({}) failed: expected {}, got {}",
                depth, expected, result
            );
        }
    }

    #[test]
    fn test_perft_divide() {
        let state = GameState::new();
        let results = perft_divide(&state, 2);

        assert_eq!(results.len(), 99);
        assert_eq!(results.iter().map(|(_, n)| n).sum::<u64>(), 9702);
    }

    #[test]
    fn test_perft_terminal_position() {
        let state = GameState::from_notation(positions::STUCK).unwrap();
        assert_eq!(perft(&state, 1), 0);
        assert_eq!(perft(&state, 4), 0);
    }
}
