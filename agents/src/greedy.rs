use crate::evaluation::liberty_steal_score;
use crate::reporting::ActionSink;
use crate::Agent;
use isolation_core::{Action, GameState};

/// One-ply agent: scores each successor with the liberty heuristic and
/// takes the best. Ties keep the first action in enumeration order.
pub struct GreedyAgent {
    name: String,
}

impl GreedyAgent {
    pub fn new() -> Self {
        GreedyAgent {
            name: "Greedy".to_string(),
        }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn choose_action(&mut self, state: &GameState, sink: &ActionSink) -> Option<Action> {
        let player = state.to_move();

        let mut best_score = i32::MIN;
        let mut best_action = None;

        for action in state.actions() {
            let score = liberty_steal_score(&state.apply(action), player);
            if score > best_score {
                best_score = score;
                best_action = Some(action);
            }
        }

        if let Some(action) = best_action {
            sink.report(action);
        }

        best_action
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolation_core::Square;

    #[test]
    fn test_picks_first_of_the_tied_best() {
        let state = GameState::new();
        let sink = ActionSink::new();

        // Every interior cell two files and two ranks off the edge keeps
        // all eight knight moves; c3 is the lowest-indexed of them.
        let action = GreedyAgent::new().choose_action(&state, &sink);

        let c3 = Square::new(2, 2).unwrap();
        assert_eq!(action, Some(Action::Place(c3)));
        assert_eq!(sink.latest(), action);
    }

    #[test]
    fn test_chosen_action_is_legal() {
        let mut state = GameState::from_notation(isolation_core::positions::MIDGAME).unwrap();
        let mut agent = GreedyAgent::new();

        while !state.is_terminal() {
            let sink = ActionSink::new();
            let action = agent.choose_action(&state, &sink).unwrap();
            assert!(state.actions().contains(&action));
            state = state.apply(action);
        }
    }

    #[test]
    fn test_returns_none_when_stuck() {
        let state = GameState::from_notation(isolation_core::positions::STUCK).unwrap();
        let sink = ActionSink::new();

        assert_eq!(GreedyAgent::new().choose_action(&state, &sink), None);
        assert_eq!(sink.latest(), None);
    }
}
